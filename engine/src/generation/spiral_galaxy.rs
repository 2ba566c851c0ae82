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
//! An N-armed spiral disk orbiting a central black hole.

use std::f64::consts::PI;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::error::EngineError;
use crate::generation::settings::SpiralGalaxySettings;
use crate::math::Vector3D;
use crate::physics;
use crate::system::System;

pub fn create_system(settings: &SpiralGalaxySettings, seed: u64) -> Result<System, EngineError> {
    if !settings.is_valid() {
        return Err(EngineError::InvalidSettings("spiral galaxy settings failed validation".into()));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let stellar_mass = settings.total_mass / settings.particle_count as f64;
    let inner_radius = settings.radius / 40.0;
    let n_per_arm = settings.particle_count / settings.num_arms;
    let disk_thickness_dist = Normal::new(0.0, settings.radius / 100.0)
        .map_err(|e| EngineError::InvalidSettings(e.to_string()))?;

    // One slot per disk particle, plus the central black hole.
    let mut system = System::resize(n_per_arm * settings.num_arms + 1);

    let mut slot = 0;
    for arm in 0..settings.num_arms {
        for i in 0..n_per_arm {
            let distance = inner_radius + settings.radius * i as f64 / settings.particle_count as f64;
            let angle = settings.twist * PI * i as f64 / n_per_arm as f64 + 2.0 * PI * arm as f64 / settings.num_arms as f64;

            let mut position = Vector3D::new(angle.sin(), angle.cos(), 0.0).set_norm(distance);

            let eccentricity_mean = 0.4 / (1.0 + ((settings.particle_count as f64 / 50.0 - i as f64) / 4.0).exp()) + 0.05;
            let eccentricity_dist = Normal::new(eccentricity_mean, 0.1)
                .map_err(|e| EngineError::InvalidSettings(e.to_string()))?;
            let eccentricity = loop {
                let e = eccentricity_dist.sample(&mut rng);
                if e > 0.0 && e < 1.0 {
                    break e;
                }
            };

            let semi_major_axis = distance / (1.0 + eccentricity);
            let speed = (physics::G * (settings.black_hole_mass + settings.total_mass) * (2.0 / distance - 1.0 / semi_major_axis)).sqrt();
            let velocity = Vector3D::new(position.y, -position.x, 0.0).set_norm(speed) * -1.0;

            position.z = disk_thickness_dist.sample(&mut rng);

            system.positions[slot] = position;
            system.velocities[slot] = velocity;
            system.masses[slot] = stellar_mass;
            slot += 1;
        }
    }

    // Central black hole, at rest at the origin.
    system.masses[slot] = settings.black_hole_mass;

    physics::center_system(&mut system);
    Ok(system)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SpiralGalaxySettings {
        SpiralGalaxySettings {
            particle_count: 400,
            num_arms: 4,
            radius: 10.0,
            total_mass: 1.0e10,
            twist: 3.0,
            black_hole_mass: 1.0e6,
        }
    }

    #[test]
    fn allocates_one_slot_per_disk_particle_plus_the_black_hole() {
        let system = create_system(&settings(), 1).unwrap();
        let s = settings();
        let expected = (s.particle_count / s.num_arms) * s.num_arms + 1;
        assert_eq!(system.count(), expected);
    }

    #[test]
    fn the_black_hole_carries_its_configured_mass() {
        let system = create_system(&settings(), 1).unwrap();
        assert!(system.masses.contains(&settings().black_hole_mass));
    }

    #[test]
    fn is_centered_on_its_own_barycenter() {
        let system = create_system(&settings(), 1).unwrap();
        assert!(physics::center_of_mass_pos(&system).norm() < 1e-6);
        assert!(physics::center_of_mass_vel(&system).norm() < 1e-6);
    }

    #[test]
    fn same_seed_is_reproducible() {
        let a = create_system(&settings(), 9).unwrap();
        let b = create_system(&settings(), 9).unwrap();
        assert_eq!(a, b);
    }
}
