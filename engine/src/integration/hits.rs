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
//! Hermite integration with individual per-particle time steps (Makino &
//! Aarseth). Unlike the global schemes, a `step` here advances exactly one
//! particle — whichever is due soonest — rather than the whole system by a
//! shared `dt`.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::dataflow::CancellationToken;
use crate::error::EngineError;
use crate::math::Vector3D;
use crate::physics;
use crate::system::System;

use super::{HitsSettings, Integrator};

pub struct HitsSimulator {
    settings: HitsSettings,
    softening_sqr: f64,
    system: System,

    times: Vec<f64>,
    time_steps: Vec<f64>,
    accelerations: Vec<Vector3D>,
    jerks: Vec<Vector3D>,
    snaps: Vec<Vector3D>,
    crackles: Vec<Vector3D>,

    /// Next-update time -> particle index. Always exactly N entries.
    schedule: BTreeMap<OrderedFloat<f64>, usize>,
    /// Each particle's current key, mirroring `schedule` so a specific
    /// particle's entry could be located without a linear scan.
    keys: Vec<OrderedFloat<f64>>,
}

fn pair_acc_jerk(r: Vector3D, v: Vector3D, mass_j: f64, softening_sqr: f64) -> (Vector3D, Vector3D) {
    let dist2 = r.norm2() + softening_sqr;
    if dist2 <= 0.0 {
        return (Vector3D::new(0.0, 0.0, 0.0), Vector3D::new(0.0, 0.0, 0.0));
    }
    let dist_inv = 1.0 / dist2.sqrt();
    let dist_inv3 = dist_inv * dist_inv * dist_inv;
    let dist_inv5 = dist_inv3 * dist_inv * dist_inv;
    let rv = r.dot(&v);

    let acc = r * (mass_j * dist_inv3);
    let jerk = v * (mass_j * dist_inv3) - r * (mass_j * 3.0 * rv * dist_inv5);
    (acc, jerk)
}

/// Cold-start time step for a particle with no snap/crackle history yet:
/// a first-order estimate of how long it takes the jerk to change the
/// acceleration by its own magnitude.
fn initial_time_step(acc: Vector3D, jerk: Vector3D, eta: f64) -> f64 {
    let j = jerk.norm();
    if j > 0.0 { eta * acc.norm() / j } else { eta }
}

fn aarseth_time_step(acc: Vector3D, jerk: Vector3D, snap: Vector3D, crackle: Vector3D, eta: f64) -> f64 {
    let a = acc.norm();
    let j = jerk.norm();
    let s = snap.norm();
    let c = crackle.norm();

    let numerator = (a * s + j * j).sqrt();
    let denominator = j * c + s * s;
    if denominator > 0.0 { eta * numerator / denominator } else { eta }
}

impl HitsSimulator {
    pub fn new(settings: HitsSettings) -> Self {
        let softening_sqr = settings.softening_parameter * settings.softening_parameter;
        HitsSimulator {
            settings,
            softening_sqr,
            system: System::new(),
            times: Vec::new(),
            time_steps: Vec::new(),
            accelerations: Vec::new(),
            jerks: Vec::new(),
            snaps: Vec::new(),
            crackles: Vec::new(),
            schedule: BTreeMap::new(),
            keys: Vec::new(),
        }
    }

    /// Acceleration and jerk on particle `i`, against every other particle
    /// at the positions/velocities given by `positions`/`velocities`.
    fn acc_jerk_on(
        &self,
        i: usize,
        positions: &[Vector3D],
        velocities: &[Vector3D],
    ) -> (Vector3D, Vector3D) {
        let n = self.system.count();
        let mut acc = Vector3D::new(0.0, 0.0, 0.0);
        let mut jrk = Vector3D::new(0.0, 0.0, 0.0);
        for k in 0..n {
            if k == i {
                continue;
            }
            let r = positions[k] - positions[i];
            let v = velocities[k] - velocities[i];
            let (a, j) = pair_acc_jerk(r, v, self.system.masses[k], self.softening_sqr);
            acc += a;
            jrk += j;
        }
        (acc, jrk)
    }
}

impl Integrator for HitsSimulator {
    fn set_system(&mut self, mut initial: System) -> Result<(), EngineError> {
        physics::scale_to_henon_units(&mut initial, self.settings.softening_parameter);
        let n = initial.count();
        self.system = initial;

        self.times = vec![0.0; n];
        self.accelerations = vec![Vector3D::new(0.0, 0.0, 0.0); n];
        self.jerks = vec![Vector3D::new(0.0, 0.0, 0.0); n];
        self.snaps = vec![Vector3D::new(0.0, 0.0, 0.0); n];
        self.crackles = vec![Vector3D::new(0.0, 0.0, 0.0); n];
        self.time_steps = vec![0.0; n];
        self.schedule.clear();
        self.keys = vec![OrderedFloat(0.0); n];

        let eta = self.settings.time_step_parameter;
        for i in 0..n {
            let (acc, jrk) = self.acc_jerk_on(i, &self.system.positions, &self.system.velocities);
            self.accelerations[i] = acc;
            self.jerks[i] = jrk;
            self.time_steps[i] = initial_time_step(acc, jrk, eta);

            let key = OrderedFloat(self.time_steps[i]);
            self.keys[i] = key;
            self.schedule.insert(key, i);
        }

        Ok(())
    }

    fn step(&mut self, cancel: &CancellationToken) {
        let n = self.system.count();
        if cancel.is_cancelled() || n == 0 {
            return;
        }

        let Some((OrderedFloat(t_next), i)) = self.schedule.pop_first() else {
            return;
        };

        let mut positions_pred = self.system.positions.clone();
        let mut velocities_pred = self.system.velocities.clone();
        for k in 0..n {
            if cancel.is_cancelled() {
                self.schedule.insert(OrderedFloat(t_next), i);
                return;
            }
            if k == i {
                continue;
            }
            let delta = t_next - self.times[k];
            positions_pred[k] = self.system.positions[k]
                + self.system.velocities[k] * delta
                + self.accelerations[k] * (delta * delta / 2.0)
                + self.jerks[k] * (delta * delta * delta / 6.0);
            velocities_pred[k] = self.system.velocities[k]
                + self.accelerations[k] * delta
                + self.jerks[k] * (delta * delta / 2.0);
        }

        let (a_pred, j_pred) = self.acc_jerk_on(i, &positions_pred, &velocities_pred);

        let h = t_next - self.times[i];
        let a0 = self.accelerations[i];
        let j0 = self.jerks[i];

        let vel_corrected =
            self.system.velocities[i] + (a0 + a_pred) * (h / 2.0) + (j0 - j_pred) * (h * h / 12.0);
        let pos_corrected = self.system.positions[i]
            + (self.system.velocities[i] + vel_corrected) * (h / 2.0)
            + (a0 - a_pred) * (h * h / 12.0);

        let h2 = h * h;
        let h3 = h2 * h;
        let snap = (-(a0 - a_pred) * 6.0 - (j0 * 4.0 + j_pred * 2.0) * h) / h2;
        let crackle = ((a0 - a_pred) * 12.0 + (j0 + j_pred) * (6.0 * h)) / h3;

        let eta = self.settings.time_step_parameter;
        let new_dt = aarseth_time_step(a_pred, j_pred, snap, crackle, eta);

        self.system.positions[i] = pos_corrected;
        self.system.velocities[i] = vel_corrected;
        self.accelerations[i] = a_pred;
        self.jerks[i] = j_pred;
        self.snaps[i] = snap;
        self.crackles[i] = crackle;
        self.times[i] = t_next;
        self.time_steps[i] = new_dt;

        let new_key = OrderedFloat(t_next + new_dt);
        self.keys[i] = new_key;
        self.schedule.insert(new_key, i);
    }

    fn system_time(&self) -> f64 {
        self.times.iter().copied().fold(f64::INFINITY, f64::min)
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
    fn schedule_always_has_exactly_n_entries() {
        let mut sim = HitsSimulator::new(HitsSettings { time_step_parameter: 0.01, softening_parameter: 0.01 });
        sim.set_system(two_body()).unwrap();
        let cancel = CancellationToken::new();
        for _ in 0..50 {
            assert_eq!(sim.schedule.len(), 2);
            sim.step(&cancel);
        }
        assert_eq!(sim.schedule.len(), 2);
    }

    #[test]
    fn system_time_is_the_minimum_particle_time() {
        let mut sim = HitsSimulator::new(HitsSettings { time_step_parameter: 0.01, softening_parameter: 0.01 });
        sim.set_system(two_body()).unwrap();
        let cancel = CancellationToken::new();
        for _ in 0..10 {
            sim.step(&cancel);
        }
        let expected = sim.times.iter().copied().fold(f64::INFINITY, f64::min);
        assert_eq!(sim.system_time(), expected);
    }

    #[test]
    fn stepping_advances_exactly_one_particle() {
        let mut sim = HitsSimulator::new(HitsSettings { time_step_parameter: 0.01, softening_parameter: 0.01 });
        sim.set_system(two_body()).unwrap();
        let times_before = sim.times.clone();
        sim.step(&CancellationToken::new());
        let changed = (0..2).filter(|&i| sim.times[i] != times_before[i]).count();
        assert_eq!(changed, 1);
    }
}
