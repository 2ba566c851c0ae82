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
//! Two Plummer spheres on a collision course.

use crate::error::EngineError;
use crate::generation::plummer_sphere;
use crate::generation::settings::{CollisionModelSettings, PlummerSphereSettings};
use crate::physics;
use crate::system::System;

pub fn create_system(settings: &CollisionModelSettings, seed: u64) -> Result<System, EngineError> {
    if !settings.is_valid() {
        return Err(EngineError::InvalidSettings("collision model settings failed validation".into()));
    }

    let mut sphere1 = plummer_sphere::create_system(
        &PlummerSphereSettings {
            particle_count: settings.particle_count_1,
            sphere_radius: settings.radius_1,
            total_mass: settings.total_mass_1,
        },
        seed,
    )?;
    let mut sphere2 = plummer_sphere::create_system(
        &PlummerSphereSettings {
            particle_count: settings.particle_count_2,
            sphere_radius: settings.radius_2,
            total_mass: settings.total_mass_2,
        },
        seed + 1,
    )?;

    for pos in &mut sphere1.positions {
        pos.x += settings.separation / 2.0;
    }
    for vel in &mut sphere1.velocities {
        vel.x += settings.relative_velocity / 2.0;
    }
    for pos in &mut sphere2.positions {
        pos.x -= settings.separation / 2.0;
    }
    for vel in &mut sphere2.velocities {
        vel.x -= settings.relative_velocity / 2.0;
    }

    let mut system = System::resize(sphere1.count() + sphere2.count());
    system.positions[..sphere1.count()].copy_from_slice(&sphere1.positions);
    system.velocities[..sphere1.count()].copy_from_slice(&sphere1.velocities);
    system.masses[..sphere1.count()].copy_from_slice(&sphere1.masses);
    system.positions[sphere1.count()..].copy_from_slice(&sphere2.positions);
    system.velocities[sphere1.count()..].copy_from_slice(&sphere2.velocities);
    system.masses[sphere1.count()..].copy_from_slice(&sphere2.masses);

    physics::center_system(&mut system);
    Ok(system)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> CollisionModelSettings {
        CollisionModelSettings {
            particle_count_1: 100,
            radius_1: 2.0,
            total_mass_1: 500.0,
            particle_count_2: 80,
            radius_2: 1.5,
            total_mass_2: 300.0,
            separation: 10.0,
            relative_velocity: 4.0,
        }
    }

    #[test]
    fn combines_both_spheres_particle_counts() {
        let system = create_system(&settings(), 1).unwrap();
        let s = settings();
        assert_eq!(system.count(), s.particle_count_1 + s.particle_count_2);
    }

    #[test]
    fn masses_sum_to_the_combined_total() {
        let system = create_system(&settings(), 1).unwrap();
        let s = settings();
        let total: f64 = system.masses.iter().sum();
        assert!((total - (s.total_mass_1 + s.total_mass_2)).abs() < 1e-6);
    }

    #[test]
    fn is_centered_on_its_own_barycenter() {
        let system = create_system(&settings(), 1).unwrap();
        assert!(physics::center_of_mass_pos(&system).norm() < 1e-6);
        assert!(physics::center_of_mass_vel(&system).norm() < 1e-6);
    }

    #[test]
    fn same_seed_is_reproducible() {
        let a = create_system(&settings(), 2).unwrap();
        let b = create_system(&settings(), 2).unwrap();
        assert_eq!(a, b);
    }
}
