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
//! Kick-drift-kick leapfrog: symplectic, preserves energy to O(dt²) over
//! long runs.

use crate::dataflow::CancellationToken;
use crate::error::EngineError;
use crate::math::Vector3D;
use crate::physics;
use crate::system::System;

use super::{Integrator, LeapfrogSettings};

pub struct LeapfrogSimulator {
    settings: LeapfrogSettings,
    softening_sqr: f64,
    system_time: f64,
    system: System,
    accelerations: Vec<Vector3D>,
}

impl LeapfrogSimulator {
    pub fn new(settings: LeapfrogSettings) -> Self {
        let softening_sqr = settings.softening_parameter * settings.softening_parameter;
        LeapfrogSimulator {
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

impl Integrator for LeapfrogSimulator {
    fn set_system(&mut self, mut initial: System) -> Result<(), EngineError> {
        physics::scale_to_henon_units(&mut initial, self.settings.softening_parameter);
        self.accelerations = vec![Vector3D::new(0.0, 0.0, 0.0); initial.count()];
        self.system = initial;
        self.update_forces(&CancellationToken::new());
        self.system_time = 0.0;
        Ok(())
    }

    fn step(&mut self, cancel: &CancellationToken) {
        let n = self.system.count();
        if cancel.is_cancelled() || n == 0 {
            return;
        }

        let dt = self.settings.time_step;

        for i in 0..n {
            self.system.velocities[i] += self.accelerations[i] * dt * 0.5;
        }
        for i in 0..n {
            self.system.positions[i] += self.system.velocities[i] * dt;
        }

        self.update_forces(cancel);
        if cancel.is_cancelled() {
            return;
        }

        for i in 0..n {
            self.system.velocities[i] += self.accelerations[i] * dt * 0.5;
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
    fn step_advances_time_by_dt() {
        let mut sim = LeapfrogSimulator::new(LeapfrogSettings { time_step: 0.02, softening_parameter: 0.01 });
        sim.set_system(two_body()).unwrap();
        sim.step(&CancellationToken::new());
        assert!((sim.system_time() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn energy_is_conserved_over_many_steps() {
        let mut sim = LeapfrogSimulator::new(LeapfrogSettings { time_step: 0.001, softening_parameter: 0.01 });
        sim.set_system(two_body()).unwrap();
        let e0 = physics::kinetic_energy(sim.system())
            + physics::potential_energy(sim.system(), 0.01, 1.0);
        let cancel = CancellationToken::new();
        for _ in 0..1000 {
            sim.step(&cancel);
        }
        let e1 = physics::kinetic_energy(sim.system())
            + physics::potential_energy(sim.system(), 0.01, 1.0);
        assert!((e1 - e0).abs() < 1e-3);
    }

    #[test]
    fn step_is_a_no_op_once_cancelled() {
        let mut sim = LeapfrogSimulator::new(LeapfrogSettings { time_step: 0.02, softening_parameter: 0.01 });
        sim.set_system(two_body()).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let before = sim.system().positions.clone();
        sim.step(&cancel);
        assert_eq!(sim.system().positions, before);
    }
}
