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
//! A Plummer sphere with one massive body drifting in from outside.

use crate::error::EngineError;
use crate::generation::plummer_sphere;
use crate::generation::settings::{FlybyModelSettings, PlummerSphereSettings};
use crate::math::Vector3D;
use crate::physics;
use crate::system::System;

pub fn create_system(settings: &FlybyModelSettings, seed: u64) -> Result<System, EngineError> {
    if !settings.is_valid() {
        return Err(EngineError::InvalidSettings("flyby model settings failed validation".into()));
    }

    let sphere = plummer_sphere::create_system(
        &PlummerSphereSettings {
            particle_count: settings.particle_count,
            sphere_radius: settings.sphere_radius,
            total_mass: settings.total_mass,
        },
        seed,
    )?;

    let distance = 6.0 * settings.sphere_radius.cbrt();

    let mut system = System::resize(sphere.count() + 1);
    system.positions[..sphere.count()].copy_from_slice(&sphere.positions);
    system.velocities[..sphere.count()].copy_from_slice(&sphere.velocities);
    system.masses[..sphere.count()].copy_from_slice(&sphere.masses);

    let last = sphere.count();
    system.positions[last] = Vector3D::new(distance, 3.0 * settings.sphere_radius, 0.0);
    system.velocities[last] = Vector3D::new(-4.0, 0.0, 0.0);
    system.masses[last] = settings.body_mass;

    physics::center_system(&mut system);
    Ok(system)
}
