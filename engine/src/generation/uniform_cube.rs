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
//! Particles uniformly distributed inside a cube, each with velocity of
//! fixed magnitude in a random direction.

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::error::EngineError;
use crate::generation::settings::UniformCubeSettings;
use crate::math::Vector3D;
use crate::physics;
use crate::system::System;

pub fn create_system(settings: &UniformCubeSettings, seed: u64) -> Result<System, EngineError> {
    if !settings.is_valid() {
        return Err(EngineError::InvalidSettings("uniform cube settings failed validation".into()));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let half_side = settings.side_length / 2.0;
    let particle_mass = settings.total_mass / settings.particle_count as f64;

    let mut system = System::resize(settings.particle_count);
    for i in 0..settings.particle_count {
        system.positions[i] = Vector3D::new(
            rng.gen_range(-half_side..=half_side),
            rng.gen_range(-half_side..=half_side),
            rng.gen_range(-half_side..=half_side),
        );
        let direction = Vector3D::new(rng.gen::<f64>(), rng.gen::<f64>(), rng.gen::<f64>());
        system.velocities[i] = direction.set_norm(settings.initial_velocity);
        system.masses[i] = particle_mass;
    }

    physics::center_system(&mut system);
    Ok(system)
}
