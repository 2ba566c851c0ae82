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
//! Positions, velocities and masses each drawn from independent isotropic
//! Gaussians.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::error::EngineError;
use crate::generation::settings::NormalSphereSettings;
use crate::math::Vector3D;
use crate::physics;
use crate::system::System;

pub fn create_system(settings: &NormalSphereSettings, seed: u64) -> Result<System, EngineError> {
    if !settings.is_valid() {
        return Err(EngineError::InvalidSettings("normal sphere settings failed validation".into()));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let pos_dist = Normal::new(0.0, settings.position_std_dev)
        .map_err(|e| EngineError::InvalidSettings(e.to_string()))?;
    let vel_dist = Normal::new(0.0, settings.velocity_std_dev)
        .map_err(|e| EngineError::InvalidSettings(e.to_string()))?;
    let mass_dist = Normal::new(settings.mass_mean, settings.mass_std_dev)
        .map_err(|e| EngineError::InvalidSettings(e.to_string()))?;

    let mut system = System::resize(settings.particle_count);
    for i in 0..settings.particle_count {
        system.positions[i] = Vector3D::new(
            pos_dist.sample(&mut rng),
            pos_dist.sample(&mut rng),
            pos_dist.sample(&mut rng),
        );
        system.velocities[i] = Vector3D::new(
            vel_dist.sample(&mut rng),
            vel_dist.sample(&mut rng),
            vel_dist.sample(&mut rng),
        );
        // A sampled mass can go negative in the tail of the distribution;
        // the reference generator takes its absolute value rather than
        // rejecting, which biases the mean slightly but keeps every draw.
        system.masses[i] = mass_dist.sample(&mut rng).abs();
    }

    physics::center_system(&mut system);
    Ok(system)
}
