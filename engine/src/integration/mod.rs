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
//! Time integrators: the schemes that advance a [`System`] forward in
//! simulated time.
//!
//! Every scheme implements [`Integrator`]. `set_system` takes ownership,
//! sizes its auxiliary arrays, computes initial forces and rescales the
//! system into Hénon units (`G = 1`, total mass 1, total energy -1/4) so
//! that every subsequent step runs with an implicit `G`.

mod barnes_hut;
mod euler;
mod hermite;
mod hits;
mod leapfrog;
mod octree;

use std::fmt;
use std::str::FromStr;

use crate::dataflow::CancellationToken;
use crate::error::EngineError;
use crate::system::System;

pub use barnes_hut::BarnesHutLeapfrogSimulator;
pub use euler::EulerSimulator;
pub use hermite::HermiteSimulator;
pub use hits::HitsSimulator;
pub use leapfrog::LeapfrogSimulator;

/// Common behaviour shared by every integration scheme.
pub trait Integrator {
    /// Take ownership of `initial`, precompute forces and rescale to
    /// Hénon units, and reset the clock to zero.
    fn set_system(&mut self, initial: System) -> Result<(), EngineError>;

    /// Advance the internal state by one scheme-specific unit of time —
    /// a fixed `dt` for the global schemes, one particle update for HITS.
    /// Checks `cancel` at entry and inside any O(N²) loop, returning
    /// early without mutating the system if it is set.
    fn step(&mut self, cancel: &CancellationToken);

    /// Current simulated time. For HITS this is the earliest particle
    /// time — the point up to which the whole system is validated.
    fn system_time(&self) -> f64;

    fn system(&self) -> &System;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerSettings {
    pub time_step: f64,
    pub softening_parameter: f64,
}

impl EulerSettings {
    pub fn is_valid(&self) -> bool {
        self.time_step != 0.0 && self.softening_parameter != 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeapfrogSettings {
    pub time_step: f64,
    pub softening_parameter: f64,
}

impl LeapfrogSettings {
    pub fn is_valid(&self) -> bool {
        self.time_step != 0.0 && self.softening_parameter != 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HermiteSettings {
    pub time_step: f64,
    pub softening_parameter: f64,
}

impl HermiteSettings {
    pub fn is_valid(&self) -> bool {
        self.time_step != 0.0 && self.softening_parameter != 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitsSettings {
    pub time_step_parameter: f64,
    pub softening_parameter: f64,
}

impl HitsSettings {
    pub fn is_valid(&self) -> bool {
        self.time_step_parameter != 0.0 && self.softening_parameter != 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarnesHutLeapfrogSettings {
    pub time_step: f64,
    pub theta_mac: f64,
    pub softening_parameter: f64,
}

impl BarnesHutLeapfrogSettings {
    pub fn is_valid(&self) -> bool {
        self.time_step > 0.0 && self.theta_mac >= 0.0 && self.softening_parameter > 0.0
    }
}

/// The settings tag for one of the five integration schemes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulationSettings {
    Euler(EulerSettings),
    Leapfrog(LeapfrogSettings),
    Hermite(HermiteSettings),
    Hits(HitsSettings),
    BarnesHutLeapfrog(BarnesHutLeapfrogSettings),
}

impl SimulationSettings {
    pub fn is_valid(&self) -> bool {
        match self {
            SimulationSettings::Euler(s) => s.is_valid(),
            SimulationSettings::Leapfrog(s) => s.is_valid(),
            SimulationSettings::Hermite(s) => s.is_valid(),
            SimulationSettings::Hits(s) => s.is_valid(),
            SimulationSettings::BarnesHutLeapfrog(s) => s.is_valid(),
        }
    }
}

/// Total wall-simulated duration plus the scheme to integrate it with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub duration: f64,
    pub settings: SimulationSettings,
}

impl SimulationConfig {
    pub fn is_valid(&self) -> bool {
        self.duration > 0.0 && self.settings.is_valid()
    }
}

/// Which integration scheme produced (or should produce) a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationMethod {
    Euler,
    Leapfrog,
    Hermite,
    Hits,
    BarnesHutLeapfrog,
}

impl SimulationMethod {
    const fn as_str(self) -> &'static str {
        match self {
            SimulationMethod::Euler => "Euler",
            SimulationMethod::Leapfrog => "Leapfrog",
            SimulationMethod::Hermite => "Hermite",
            SimulationMethod::Hits => "Hermite Individual Time Steps",
            SimulationMethod::BarnesHutLeapfrog => "Barnes-Hut Algorithm (Leapfrog)",
        }
    }
}

impl fmt::Display for SimulationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimulationMethod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use SimulationMethod::*;
        [Euler, Leapfrog, Hermite, Hits, BarnesHutLeapfrog]
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| EngineError::InvalidSettings(format!("unknown simulation method {s:?}")))
    }
}

impl From<&SimulationSettings> for SimulationMethod {
    fn from(settings: &SimulationSettings) -> Self {
        match settings {
            SimulationSettings::Euler(_) => SimulationMethod::Euler,
            SimulationSettings::Leapfrog(_) => SimulationMethod::Leapfrog,
            SimulationSettings::Hermite(_) => SimulationMethod::Hermite,
            SimulationSettings::Hits(_) => SimulationMethod::Hits,
            SimulationSettings::BarnesHutLeapfrog(_) => SimulationMethod::BarnesHutLeapfrog,
        }
    }
}

/// The five concrete integrators behind one set of methods, so the
/// runner can hold exactly one of five known types without the
/// per-step cost of a `Box<dyn Integrator>`.
pub enum Simulator {
    Euler(EulerSimulator),
    Leapfrog(LeapfrogSimulator),
    Hermite(HermiteSimulator),
    Hits(HitsSimulator),
    BarnesHutLeapfrog(BarnesHutLeapfrogSimulator),
}

impl Simulator {
    /// Build the simulator matching `settings`, mirroring the reference
    /// factory's dispatch on the settings variant.
    pub fn create(settings: SimulationSettings) -> Self {
        match settings {
            SimulationSettings::Euler(s) => Simulator::Euler(EulerSimulator::new(s)),
            SimulationSettings::Leapfrog(s) => Simulator::Leapfrog(LeapfrogSimulator::new(s)),
            SimulationSettings::Hermite(s) => Simulator::Hermite(HermiteSimulator::new(s)),
            SimulationSettings::Hits(s) => Simulator::Hits(HitsSimulator::new(s)),
            SimulationSettings::BarnesHutLeapfrog(s) => {
                Simulator::BarnesHutLeapfrog(BarnesHutLeapfrogSimulator::new(s))
            }
        }
    }
}

impl Integrator for Simulator {
    fn set_system(&mut self, initial: System) -> Result<(), EngineError> {
        match self {
            Simulator::Euler(s) => s.set_system(initial),
            Simulator::Leapfrog(s) => s.set_system(initial),
            Simulator::Hermite(s) => s.set_system(initial),
            Simulator::Hits(s) => s.set_system(initial),
            Simulator::BarnesHutLeapfrog(s) => s.set_system(initial),
        }
    }

    fn step(&mut self, cancel: &CancellationToken) {
        match self {
            Simulator::Euler(s) => s.step(cancel),
            Simulator::Leapfrog(s) => s.step(cancel),
            Simulator::Hermite(s) => s.step(cancel),
            Simulator::Hits(s) => s.step(cancel),
            Simulator::BarnesHutLeapfrog(s) => s.step(cancel),
        }
    }

    fn system_time(&self) -> f64 {
        match self {
            Simulator::Euler(s) => s.system_time(),
            Simulator::Leapfrog(s) => s.system_time(),
            Simulator::Hermite(s) => s.system_time(),
            Simulator::Hits(s) => s.system_time(),
            Simulator::BarnesHutLeapfrog(s) => s.system_time(),
        }
    }

    fn system(&self) -> &System {
        match self {
            Simulator::Euler(s) => s.system(),
            Simulator::Leapfrog(s) => s.system(),
            Simulator::Hermite(s) => s.system(),
            Simulator::Hits(s) => s.system(),
            Simulator::BarnesHutLeapfrog(s) => s.system(),
        }
    }
}
