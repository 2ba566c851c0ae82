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
//! A Plummer-model sphere, following the algorithm in Aarseth, S. J. 2003,
//! *Gravitational N-Body Simulations* (originally Aarseth et al. 1974,
//! Astronomy and Astrophysics, vol. 37, no. 1).

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::error::EngineError;
use crate::generation::settings::PlummerSphereSettings;
use crate::math;
use crate::physics;
use crate::system::System;

pub fn create_system(settings: &PlummerSphereSettings, seed: u64) -> Result<System, EngineError> {
    if !settings.is_valid() {
        return Err(EngineError::InvalidSettings("plummer sphere settings failed validation".into()));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let plummer_radius = settings.sphere_radius;
    let particle_mass = settings.total_mass / settings.particle_count as f64;

    let mut system = System::resize(settings.particle_count);
    for i in 0..settings.particle_count {
        // Cumulative-mass inversion for the radial coordinate.
        let m_i = (i + 1) as f64 / settings.particle_count as f64;
        let r = plummer_radius / (m_i.powf(-2.0 / 3.0) - 1.0).sqrt();
        let position = math::rand_on_sphere(&mut rng) * r;

        // Rejection sampling of the velocity magnitude against
        // g(q) = q²(1−q²)^(7/2), envelope 0.1.
        let q = loop {
            let q = rng.gen::<f64>();
            let g_q = rng.gen::<f64>() * 0.1;
            if g_q <= q * q * (1.0 - q * q).powf(3.5) {
                break q;
            }
        };

        let escape_velocity =
            (2.0 * physics::G * settings.total_mass).sqrt() * (plummer_radius * plummer_radius + r * r).powf(-0.25);
        let speed = q * escape_velocity;
        let velocity = math::rand_on_sphere(&mut rng) * speed;

        system.positions[i] = position;
        system.velocities[i] = velocity;
        system.masses[i] = particle_mass;
    }

    physics::center_system(&mut system);
    Ok(system)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> PlummerSphereSettings {
        PlummerSphereSettings { particle_count: 300, sphere_radius: 4.0, total_mass: 1000.0 }
    }

    #[test]
    fn masses_sum_to_the_requested_total() {
        let system = create_system(&settings(), 1).unwrap();
        let total: f64 = system.masses.iter().sum();
        assert!((total - settings().total_mass).abs() < 1e-6);
    }

    #[test]
    fn is_centered_on_its_own_barycenter() {
        let system = create_system(&settings(), 1).unwrap();
        assert!(physics::center_of_mass_pos(&system).norm() < 1e-6);
        assert!(physics::center_of_mass_vel(&system).norm() < 1e-6);
    }

    #[test]
    fn same_seed_is_reproducible() {
        let a = create_system(&settings(), 5).unwrap();
        let b = create_system(&settings(), 5).unwrap();
        assert_eq!(a, b);
    }
}
