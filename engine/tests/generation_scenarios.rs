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

use nbody_engine::generation::{
    self, GenerationConfig, GenerationSettings, NormalSphereSettings, UniformCubeSettings,
};
use nbody_engine::physics;

#[test]
fn uniform_cube_scenario_s1() {
    let config = GenerationConfig {
        seed: 42,
        settings: GenerationSettings::UniformCube(UniformCubeSettings {
            particle_count: 100,
            side_length: 10.0,
            initial_velocity: 1.0,
            total_mass: 1.0,
        }),
    };
    let system = generation::create(&config).unwrap();

    assert_eq!(system.count(), 100);
    assert!((physics::total_mass(&system) - 1.0).abs() < 1e-6);
    for pos in &system.positions {
        assert!(pos.x.abs() <= 6.0);
        assert!(pos.y.abs() <= 6.0);
        assert!(pos.z.abs() <= 6.0);
    }
    for vel in &system.velocities {
        assert!(vel.norm() <= 1.0 + 1e-9);
    }
}

#[test]
fn normal_sphere_scenario_s2() {
    let config = GenerationConfig {
        seed: 42,
        settings: GenerationSettings::NormalSphere(NormalSphereSettings {
            particle_count: 100,
            position_std_dev: 5.0,
            velocity_std_dev: 1.0,
            mass_mean: 1.0,
            mass_std_dev: 0.1,
        }),
    };
    let system = generation::create(&config).unwrap();
    assert!((physics::total_mass(&system) - 100.0).abs() < 5.0);
}

#[test]
fn every_generator_centers_its_system() {
    let configs = [
        GenerationConfig {
            seed: 1,
            settings: GenerationSettings::UniformCube(UniformCubeSettings {
                particle_count: 50,
                side_length: 4.0,
                initial_velocity: 1.0,
                total_mass: 10.0,
            }),
        },
        GenerationConfig {
            seed: 2,
            settings: GenerationSettings::NormalSphere(NormalSphereSettings {
                particle_count: 50,
                position_std_dev: 3.0,
                velocity_std_dev: 1.0,
                mass_mean: 1.0,
                mass_std_dev: 0.2,
            }),
        },
    ];

    for config in configs {
        let system = generation::create(&config).unwrap();
        assert!(physics::center_of_mass_pos(&system).norm() < 1e-9);
        assert!(physics::center_of_mass_vel(&system).norm() < 1e-9);
    }
}

#[test]
fn identical_seed_and_settings_reproduce_bit_identical_systems() {
    let config = GenerationConfig {
        seed: 123,
        settings: GenerationSettings::UniformCube(UniformCubeSettings {
            particle_count: 30,
            side_length: 6.0,
            initial_velocity: 2.0,
            total_mass: 9.0,
        }),
    };

    let a = generation::create(&config).unwrap();
    let b = generation::create(&config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn stream_generator_skips_malformed_rows_scenario_s5() {
    let csv = "pos_x,pos_y,pos_z,vel_x,vel_y,vel_z,mass\n\
               1,2,3,0,0,0,1\n\
               4,5,6,0,0,0,1\n\
               not,a,number,0,0,0,1\n\
               7,8,9,0,0,0,1\n\
               too,few,fields\n\
               10,11,12,0,0,0,1\n\
               13,14,15,0,0,0,1\n\
               also,broken\n";

    let system = generation::create_from_stream(csv.as_bytes()).unwrap();
    assert_eq!(system.count(), 5);
}
