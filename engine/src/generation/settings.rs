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
//! Per-generator settings and the tagged union that selects among them.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformCubeSettings {
    pub particle_count: usize,
    pub side_length: f64,
    pub initial_velocity: f64,
    pub total_mass: f64,
}

impl UniformCubeSettings {
    pub fn is_valid(&self) -> bool {
        self.particle_count > 0 && self.side_length > 0.0 && self.initial_velocity > 0.0 && self.total_mass > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSphereSettings {
    pub particle_count: usize,
    pub sphere_radius: f64,
    pub initial_velocity: f64,
    pub total_mass: f64,
}

impl UniformSphereSettings {
    pub fn is_valid(&self) -> bool {
        self.particle_count > 0 && self.sphere_radius > 0.0 && self.initial_velocity > 0.0 && self.total_mass > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalSphereSettings {
    pub particle_count: usize,
    pub position_std_dev: f64,
    pub velocity_std_dev: f64,
    pub mass_mean: f64,
    pub mass_std_dev: f64,
}

impl NormalSphereSettings {
    pub fn is_valid(&self) -> bool {
        self.particle_count > 0
            && self.position_std_dev > 0.0
            && self.velocity_std_dev > 0.0
            && self.mass_mean > 0.0
            && self.mass_std_dev > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlummerSphereSettings {
    pub particle_count: usize,
    pub sphere_radius: f64,
    pub total_mass: f64,
}

impl PlummerSphereSettings {
    pub fn is_valid(&self) -> bool {
        self.particle_count > 0 && self.sphere_radius > 0.0 && self.total_mass > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralGalaxySettings {
    pub particle_count: usize,
    pub num_arms: usize,
    pub radius: f64,
    pub total_mass: f64,
    pub twist: f64,
    pub black_hole_mass: f64,
}

impl SpiralGalaxySettings {
    pub fn is_valid(&self) -> bool {
        self.particle_count > 0
            && self.num_arms > 0
            && self.radius > 0.0
            && self.total_mass > 0.0
            && self.twist > 0.0
            && self.black_hole_mass > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionModelSettings {
    pub particle_count_1: usize,
    pub radius_1: f64,
    pub total_mass_1: f64,
    pub particle_count_2: usize,
    pub radius_2: f64,
    pub total_mass_2: f64,
    pub separation: f64,
    pub relative_velocity: f64,
}

impl CollisionModelSettings {
    pub fn is_valid(&self) -> bool {
        self.particle_count_1 > 0
            && self.radius_1 > 0.0
            && self.total_mass_1 > 0.0
            && self.particle_count_2 > 0
            && self.radius_2 > 0.0
            && self.total_mass_2 > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlybyModelSettings {
    pub particle_count: usize,
    pub sphere_radius: f64,
    pub total_mass: f64,
    pub body_mass: f64,
}

impl FlybyModelSettings {
    pub fn is_valid(&self) -> bool {
        self.particle_count > 0 && self.sphere_radius > 0.0 && self.total_mass > 0.0 && self.body_mass > 0.0
    }
}

/// The tagged union of every non-streaming generator's settings, mirroring
/// the reference implementation's `std::variant<...>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GenerationSettings {
    UniformCube(UniformCubeSettings),
    UniformSphere(UniformSphereSettings),
    NormalSphere(NormalSphereSettings),
    PlummerSphere(PlummerSphereSettings),
    SpiralGalaxy(SpiralGalaxySettings),
    CollisionModel(CollisionModelSettings),
    FlybyModel(FlybyModelSettings),
}

impl GenerationSettings {
    pub fn is_valid(&self) -> bool {
        match self {
            GenerationSettings::UniformCube(s) => s.is_valid(),
            GenerationSettings::UniformSphere(s) => s.is_valid(),
            GenerationSettings::NormalSphere(s) => s.is_valid(),
            GenerationSettings::PlummerSphere(s) => s.is_valid(),
            GenerationSettings::SpiralGalaxy(s) => s.is_valid(),
            GenerationSettings::CollisionModel(s) => s.is_valid(),
            GenerationSettings::FlybyModel(s) => s.is_valid(),
        }
    }
}

/// A seed plus the settings of the generator it will drive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub seed: u64,
    pub settings: GenerationSettings,
}

impl GenerationConfig {
    pub fn is_valid(&self) -> bool {
        self.settings.is_valid()
    }
}
