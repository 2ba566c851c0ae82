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
//! A homogeneous sphere carved out of a cube by rejection sampling.

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::error::EngineError;
use crate::generation::settings::UniformSphereSettings;
use crate::math::Vector3D;
use crate::physics;
use crate::system::System;

pub fn create_system(settings: &UniformSphereSettings, seed: u64) -> Result<System, EngineError> {
    if !settings.is_valid() {
        return Err(EngineError::InvalidSettings("uniform sphere settings failed validation".into()));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let r = settings.sphere_radius;
    let particle_mass = settings.total_mass / settings.particle_count as f64;

    let mut system = System::resize(settings.particle_count);
    for i in 0..settings.particle_count {
        let position = loop {
            let candidate = Vector3D::new(
                rng.gen_range(-r..=r),
                rng.gen_range(-r..=r),
                rng.gen_range(-r..=r),
            );
            if candidate.norm() <= r {
                break candidate;
            }
        };

        let direction = Vector3D::new(rng.gen::<f64>(), rng.gen::<f64>(), rng.gen::<f64>());
        system.positions[i] = position;
        system.velocities[i] = direction.set_norm(settings.initial_velocity);
        system.masses[i] = particle_mass;
    }

    physics::center_system(&mut system);
    Ok(system)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> UniformSphereSettings {
        UniformSphereSettings { particle_count: 200, sphere_radius: 5.0, initial_velocity: 1.5, total_mass: 50.0 }
    }

    #[test]
    fn positions_stay_inside_the_sphere() {
        let system = create_system(&settings(), 1).unwrap();
        for p in &system.positions {
            assert!(p.norm() <= settings().sphere_radius + 1e-9);
        }
    }

    #[test]
    fn velocities_all_have_the_requested_magnitude() {
        let system = create_system(&settings(), 1).unwrap();
        for v in &system.velocities {
            assert!((v.norm() - settings().initial_velocity).abs() < 1e-9);
        }
    }

    #[test]
    fn same_seed_is_reproducible() {
        let a = create_system(&settings(), 3).unwrap();
        let b = create_system(&settings(), 3).unwrap();
        assert_eq!(a, b);
    }
}
