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
//! Initial-condition generators.
//!
//! Every generator produces one [`System`](crate::system::System) by value
//! and centers it on its own barycenter before returning. Randomized
//! generators are seeded once with [`rand::rngs::StdRng`] and never
//! reseeded mid-run, so identical settings and seed always reproduce a
//! bit-identical system.

mod collision_model;
mod flyby_model;
mod normal_sphere;
mod plummer_sphere;
mod settings;
mod spiral_galaxy;
mod stream;
mod uniform_cube;
mod uniform_sphere;

pub use settings::{
    CollisionModelSettings, FlybyModelSettings, GenerationConfig, GenerationSettings,
    NormalSphereSettings, PlummerSphereSettings, SpiralGalaxySettings, UniformCubeSettings,
    UniformSphereSettings,
};
pub use stream::create_system as create_from_stream;

use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use crate::system::System;

/// Which generation algorithm produced (or should produce) a system.
/// `Display`/`FromStr` round-trip the reference implementation's
/// human-readable identifiers, used when persisting settings to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMethod {
    NormalSphere,
    UniformCube,
    UniformSphere,
    PlummerSphere,
    SpiralGalaxy,
    CollisionModel,
    FlybyModel,
}

impl GenerationMethod {
    const fn as_str(self) -> &'static str {
        match self {
            GenerationMethod::NormalSphere => "Normal Sphere",
            GenerationMethod::UniformCube => "Uniform Cube",
            GenerationMethod::UniformSphere => "Uniform Sphere",
            GenerationMethod::PlummerSphere => "Plummer Model",
            GenerationMethod::SpiralGalaxy => "Spiral Galaxy",
            GenerationMethod::CollisionModel => "Collision Model",
            GenerationMethod::FlybyModel => "Flyby Model",
        }
    }
}

impl fmt::Display for GenerationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMethod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use GenerationMethod::*;
        [NormalSphere, UniformCube, UniformSphere, PlummerSphere, SpiralGalaxy, CollisionModel, FlybyModel]
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| EngineError::InvalidSettings(format!("unknown generation method {s:?}")))
    }
}

impl From<&GenerationSettings> for GenerationMethod {
    fn from(settings: &GenerationSettings) -> Self {
        match settings {
            GenerationSettings::NormalSphere(_) => GenerationMethod::NormalSphere,
            GenerationSettings::UniformCube(_) => GenerationMethod::UniformCube,
            GenerationSettings::UniformSphere(_) => GenerationMethod::UniformSphere,
            GenerationSettings::PlummerSphere(_) => GenerationMethod::PlummerSphere,
            GenerationSettings::SpiralGalaxy(_) => GenerationMethod::SpiralGalaxy,
            GenerationSettings::CollisionModel(_) => GenerationMethod::CollisionModel,
            GenerationSettings::FlybyModel(_) => GenerationMethod::FlybyModel,
        }
    }
}

/// Dispatch on `config`'s settings tag and run the matching generator,
/// mirroring the reference implementation's `std::visit`-based factory.
pub fn create(config: &GenerationConfig) -> Result<System, EngineError> {
    if !config.is_valid() {
        return Err(EngineError::InvalidSettings(format!(
            "{} settings failed validation",
            GenerationMethod::from(&config.settings)
        )));
    }

    match &config.settings {
        GenerationSettings::NormalSphere(s) => normal_sphere::create_system(s, config.seed),
        GenerationSettings::UniformCube(s) => uniform_cube::create_system(s, config.seed),
        GenerationSettings::UniformSphere(s) => uniform_sphere::create_system(s, config.seed),
        GenerationSettings::PlummerSphere(s) => plummer_sphere::create_system(s, config.seed),
        GenerationSettings::SpiralGalaxy(s) => spiral_galaxy::create_system(s, config.seed),
        GenerationSettings::CollisionModel(s) => collision_model::create_system(s, config.seed),
        GenerationSettings::FlybyModel(s) => flyby_model::create_system(s, config.seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_strings_round_trip() {
        for method in [
            GenerationMethod::NormalSphere,
            GenerationMethod::UniformCube,
            GenerationMethod::UniformSphere,
            GenerationMethod::PlummerSphere,
            GenerationMethod::SpiralGalaxy,
            GenerationMethod::CollisionModel,
            GenerationMethod::FlybyModel,
        ] {
            assert_eq!(method.to_string().parse::<GenerationMethod>().unwrap(), method);
        }
    }

    #[test]
    fn unknown_method_string_is_rejected() {
        assert!("Not A Real Method".parse::<GenerationMethod>().is_err());
    }

    #[test]
    fn factory_dispatches_to_the_matching_generator() {
        let config = GenerationConfig {
            seed: 1,
            settings: GenerationSettings::UniformCube(UniformCubeSettings {
                particle_count: 50,
                side_length: 4.0,
                initial_velocity: 1.0,
                total_mass: 10.0,
            }),
        };
        let system = create(&config).unwrap();
        assert_eq!(system.count(), 50);
    }

    #[test]
    fn factory_rejects_invalid_settings_without_mutating_anything() {
        let config = GenerationConfig {
            seed: 1,
            settings: GenerationSettings::UniformCube(UniformCubeSettings {
                particle_count: 0,
                side_length: 4.0,
                initial_velocity: 1.0,
                total_mass: 10.0,
            }),
        };
        assert!(create(&config).is_err());
    }
}
