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
//! First-order explicit (symplectic-Euler) integration. The reference
//! baseline every other scheme is checked against.

use crate::dataflow::CancellationToken;
use crate::error::EngineError;
use crate::math::Vector3D;
use crate::physics;
use crate::system::System;

use super::{EulerSettings, Integrator};

pub struct EulerSimulator {
    settings: EulerSettings,
    softening_sqr: f64,
    system_time: f64,
    system: System,
    accelerations: Vec<Vector3D>,
}

impl EulerSimulator {
    pub fn new(settings: EulerSettings) -> Self {
        let softening_sqr = settings.softening_parameter * settings.softening_parameter;
        EulerSimulator {
            settings,
            softening_sqr,
            system_time: 0.0,
            system: System::new(),
            accelerations: Vec::new(),
        }
    }

    fn update_forces(&mut self, cancel: &CancellationToken) {
        let n = self.system.count();
        self.accelerations.iter_mut().for_each(|a| *a = Vector3D::new(0.0, 0.0, 0.0));

        let positions = &self.system.positions;
        let masses = &self.system.masses;
        for i in 0..n {
            if cancel.is_cancelled() {
                return;
            }
            for j in (i + 1)..n {
                let r_ij = positions[j] - positions[i];
                let dist2 = r_ij.norm2() + self.softening_sqr;
                if dist2 <= 0.0 {
                    continue;
                }
                let dist_inv = 1.0 / dist2.sqrt();
                let dist_inv3 = dist_inv * dist_inv * dist_inv;
                self.accelerations[i] += r_ij * masses[j] * dist_inv3;
                self.accelerations[j] -= r_ij * masses[i] * dist_inv3;
            }
        }
    }
}

impl Integrator for EulerSimulator {
    fn set_system(&mut self, mut initial: System) -> Result<(), EngineError> {
        physics::scale_to_henon_units(&mut initial, self.settings.softening_parameter);
        self.accelerations = vec![Vector3D::new(0.0, 0.0, 0.0); initial.count()];
        self.system = initial;
        self.update_forces(&CancellationToken::new());
        self.system_time = 0.0;
        Ok(())
    }

    fn step(&mut self, cancel: &CancellationToken) {
        if cancel.is_cancelled() || self.system.is_empty() {
            return;
        }

        self.update_forces(cancel);
        if cancel.is_cancelled() {
            return;
        }

        let dt = self.settings.time_step;
        for i in 0..self.system.count() {
            self.system.positions[i] += self.system.velocities[i] * dt;
            self.system.velocities[i] += self.accelerations[i] * dt;
        }
        self.system_time += dt;
    }

    fn system_time(&self) -> f64 {
        self.system_time
    }

    fn system(&self) -> &System {
        &self.system
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::System;

    fn two_body() -> System {
        System::from_arrays(
            vec![Vector3D::new(-1.0, 0.0, 0.0), Vector3D::new(1.0, 0.0, 0.0)],
            vec![Vector3D::new(0.0, -0.1, 0.0), Vector3D::new(0.0, 0.1, 0.0)],
            vec![1.0, 1.0],
        )
    }

    #[test]
    fn set_system_rescales_to_henon_units() {
        let mut sim = EulerSimulator::new(EulerSettings { time_step: 0.01, softening_parameter: 0.01 });
        sim.set_system(two_body()).unwrap();
        assert!((physics::total_mass(sim.system()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn step_advances_time_by_dt() {
        let mut sim = EulerSimulator::new(EulerSettings { time_step: 0.05, softening_parameter: 0.01 });
        sim.set_system(two_body()).unwrap();
        sim.step(&CancellationToken::new());
        assert!((sim.system_time() - 0.05).abs() < 1e-12);
    }

    #[test]
    fn step_is_a_no_op_once_cancelled() {
        let mut sim = EulerSimulator::new(EulerSettings { time_step: 0.05, softening_parameter: 0.01 });
        sim.set_system(two_body()).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let before = sim.system().positions.clone();
        sim.step(&cancel);
        assert_eq!(sim.system().positions, before);
        assert_eq!(sim.system_time(), 0.0);
    }

    #[test]
    fn forces_on_an_isolated_pair_are_equal_and_opposite() {
        let mut sim = EulerSimulator::new(EulerSettings { time_step: 0.01, softening_parameter: 0.01 });
        sim.set_system(two_body()).unwrap();
        let sum = sim.accelerations[0] * 1.0 + sim.accelerations[1] * 1.0;
        assert!(sum.norm() < 1e-9);
    }
}
