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
//! Leapfrog integration with an octree standing in for the O(N²) pairwise
//! force sum, trading exactness for O(N log N) per step.

use crate::dataflow::CancellationToken;
use crate::error::EngineError;
use crate::math::Vector3D;
use crate::physics;
use crate::system::System;

use super::octree::BarnesHutTree;
use super::{BarnesHutLeapfrogSettings, Integrator};

pub struct BarnesHutLeapfrogSimulator {
    settings: BarnesHutLeapfrogSettings,
    theta_mac_sqr: f64,
    softening_sqr: f64,
    system_time: f64,
    system: System,
    tree: BarnesHutTree,
    accelerations: Vec<Vector3D>,
}

impl BarnesHutLeapfrogSimulator {
    pub fn new(settings: BarnesHutLeapfrogSettings) -> Self {
        let theta_mac_sqr = settings.theta_mac * settings.theta_mac;
        let softening_sqr = settings.softening_parameter * settings.softening_parameter;
        BarnesHutLeapfrogSimulator {
            settings,
            theta_mac_sqr,
            softening_sqr,
            system_time: 0.0,
            system: System::new(),
            tree: BarnesHutTree::new(),
            accelerations: Vec::new(),
        }
    }

    fn update_forces(&mut self) {
        if self.system.is_empty() {
            return;
        }
        self.tree.build(&self.system);
        self.tree.update_forces(&self.system, self.theta_mac_sqr, self.softening_sqr, &mut self.accelerations);
    }
}

impl Integrator for BarnesHutLeapfrogSimulator {
    fn set_system(&mut self, mut initial: System) -> Result<(), EngineError> {
        physics::scale_to_henon_units(&mut initial, self.settings.softening_parameter);
        self.accelerations = vec![Vector3D::new(0.0, 0.0, 0.0); initial.count()];
        self.system = initial;
        self.update_forces();
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

        if cancel.is_cancelled() {
            return;
        }
        self.update_forces();

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

    fn small_cluster() -> System {
        System::from_arrays(
            vec![
                Vector3D::new(-1.0, 0.0, 0.0),
                Vector3D::new(1.0, 0.0, 0.0),
                Vector3D::new(0.0, 1.0, 0.0),
                Vector3D::new(0.0, -1.0, 0.0),
            ],
            vec![
                Vector3D::new(0.0, -0.1, 0.0),
                Vector3D::new(0.0, 0.1, 0.0),
                Vector3D::new(0.1, 0.0, 0.0),
                Vector3D::new(-0.1, 0.0, 0.0),
            ],
            vec![1.0, 1.0, 1.0, 1.0],
        )
    }

    #[test]
    fn step_advances_time_by_dt() {
        let mut sim = BarnesHutLeapfrogSimulator::new(BarnesHutLeapfrogSettings {
            time_step: 0.01,
            theta_mac: 0.5,
            softening_parameter: 0.01,
        });
        sim.set_system(small_cluster()).unwrap();
        sim.step(&CancellationToken::new());
        assert!((sim.system_time() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn exact_mac_reproduces_pairwise_energy_behaviour() {
        let mut sim = BarnesHutLeapfrogSimulator::new(BarnesHutLeapfrogSettings {
            time_step: 0.001,
            theta_mac: 0.0,
            softening_parameter: 0.01,
        });
        sim.set_system(small_cluster()).unwrap();
        let e0 = physics::kinetic_energy(sim.system()) + physics::potential_energy(sim.system(), 0.01, 1.0);
        let cancel = CancellationToken::new();
        for _ in 0..200 {
            sim.step(&cancel);
        }
        let e1 = physics::kinetic_energy(sim.system()) + physics::potential_energy(sim.system(), 0.01, 1.0);
        assert!((e1 - e0).abs() < 1e-2);
    }

    #[test]
    fn step_is_a_no_op_once_cancelled() {
        let mut sim = BarnesHutLeapfrogSimulator::new(BarnesHutLeapfrogSettings {
            time_step: 0.01,
            theta_mac: 0.5,
            softening_parameter: 0.01,
        });
        sim.set_system(small_cluster()).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let before = sim.system().positions.clone();
        sim.step(&cancel);
        assert_eq!(sim.system().positions, before);
    }
}
