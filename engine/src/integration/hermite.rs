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
//! Global fourth-order Hermite predictor-corrector: every particle shares
//! one fixed `dt`, but the force law also yields the jerk (the
//! time-derivative of acceleration), giving a cubic-spline correction
//! Euler and leapfrog don't have access to.

use crate::dataflow::CancellationToken;
use crate::error::EngineError;
use crate::math::Vector3D;
use crate::physics;
use crate::system::System;

use super::{HermiteSettings, Integrator};

pub struct HermiteSimulator {
    settings: HermiteSettings,
    softening_sqr: f64,
    system_time: f64,
    system: System,
    accelerations: Vec<Vector3D>,
    jerks: Vec<Vector3D>,
}

/// Acceleration and jerk contributed by pair (i, j) onto particle i, given
/// separation `r = posⱼ−posᵢ` and relative velocity `v = velⱼ−velᵢ`.
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

impl HermiteSimulator {
    pub fn new(settings: HermiteSettings) -> Self {
        let softening_sqr = settings.softening_parameter * settings.softening_parameter;
        HermiteSimulator {
            settings,
            softening_sqr,
            system_time: 0.0,
            system: System::new(),
            accelerations: Vec::new(),
            jerks: Vec::new(),
        }
    }

    fn accelerations_and_jerks_of(
        &self,
        system: &System,
        cancel: &CancellationToken,
    ) -> Option<(Vec<Vector3D>, Vec<Vector3D>)> {
        let n = system.count();
        let mut acc = vec![Vector3D::new(0.0, 0.0, 0.0); n];
        let mut jrk = vec![Vector3D::new(0.0, 0.0, 0.0); n];

        for i in 0..n {
            if cancel.is_cancelled() {
                return None;
            }
            for j in (i + 1)..n {
                let r = system.positions[j] - system.positions[i];
                let v = system.velocities[j] - system.velocities[i];

                let (a_ij, j_ij) = pair_acc_jerk(r, v, system.masses[j], self.softening_sqr);
                acc[i] += a_ij;
                jrk[i] += j_ij;

                let (a_ji, j_ji) = pair_acc_jerk(-r, -v, system.masses[i], self.softening_sqr);
                acc[j] += a_ji;
                jrk[j] += j_ji;
            }
        }
        Some((acc, jrk))
    }
}

impl Integrator for HermiteSimulator {
    fn set_system(&mut self, mut initial: System) -> Result<(), EngineError> {
        physics::scale_to_henon_units(&mut initial, self.settings.softening_parameter);
        let (acc, jrk) = self
            .accelerations_and_jerks_of(&initial, &CancellationToken::new())
            .unwrap_or_else(|| (vec![Vector3D::new(0.0, 0.0, 0.0); initial.count()], vec![Vector3D::new(0.0, 0.0, 0.0); initial.count()]));
        self.accelerations = acc;
        self.jerks = jrk;
        self.system = initial;
        self.system_time = 0.0;
        Ok(())
    }

    fn step(&mut self, cancel: &CancellationToken) {
        let n = self.system.count();
        if cancel.is_cancelled() || n == 0 {
            return;
        }

        let dt = self.settings.time_step;
        let dt2 = dt * dt;
        let dt3 = dt2 * dt;

        let mut predicted = self.system.clone();
        for i in 0..n {
            predicted.positions[i] = self.system.positions[i]
                + self.system.velocities[i] * dt
                + self.accelerations[i] * (dt2 / 2.0)
                + self.jerks[i] * (dt3 / 6.0);
            predicted.velocities[i] =
                self.system.velocities[i] + self.accelerations[i] * dt + self.jerks[i] * (dt2 / 2.0);
        }

        let Some((acc_new, jrk_new)) = self.accelerations_and_jerks_of(&predicted, cancel) else {
            return;
        };

        for i in 0..n {
            let a0 = self.accelerations[i];
            let j0 = self.jerks[i];
            let a1 = acc_new[i];
            let j1 = jrk_new[i];

            let vel_corrected =
                self.system.velocities[i] + (a0 + a1) * (dt / 2.0) + (j0 - j1) * (dt2 / 12.0);
            let pos_corrected = self.system.positions[i]
                + (self.system.velocities[i] + vel_corrected) * (dt / 2.0)
                + (a0 - a1) * (dt2 / 12.0);

            self.system.positions[i] = pos_corrected;
            self.system.velocities[i] = vel_corrected;
        }

        self.accelerations = acc_new;
        self.jerks = jrk_new;
        self.system_time += dt;
    }

    fn system_time(&self) -> f64 {
        self.system_time
    }

    fn system(&self) -> &System {
        &self.system
    }
}
