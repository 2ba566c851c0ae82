// Copyright 2025 The ENKA-S Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! The structure-of-arrays particle data model.

use crate::math::Vector3D;

/// A collection of particles stored as three parallel arrays rather than a
/// vector of particle objects. Every generator produces one `System`, every
/// integrator owns exactly one for the duration of a run.
///
/// The three arrays always have equal length; there is no indirect particle
/// type. Index `i` denotes the same particle across `positions`, `velocities`
/// and `masses`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct System {
    pub positions: Vec<Vector3D>,
    pub velocities: Vec<Vector3D>,
    pub masses: Vec<f64>,
}

impl System {
    /// An empty system with no particles.
    pub fn new() -> Self {
        System::default()
    }

    /// Build a system from three equal-length arrays.
    ///
    /// # Panics
    ///
    /// Panics if the three arrays do not have the same length — this is a
    /// programmer error, not a runtime condition callers should recover
    /// from.
    pub fn from_arrays(positions: Vec<Vector3D>, velocities: Vec<Vector3D>, masses: Vec<f64>) -> Self {
        assert_eq!(positions.len(), velocities.len());
        assert_eq!(positions.len(), masses.len());
        System { positions, velocities, masses }
    }

    /// An empty system sized to hold `n` particles, all zeroed.
    pub fn resize(n: usize) -> Self {
        System {
            positions: vec![Vector3D::ZERO; n],
            velocities: vec![Vector3D::ZERO; n],
            masses: vec![0.0; n],
        }
    }

    /// Number of particles in the system.
    pub fn count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
