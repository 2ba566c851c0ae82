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
//! The orchestrator tying one [`Simulator`] to the dataflow pipeline:
//! steps the integrator, samples trajectory and diagnostics snapshots on
//! their own cadences, and publishes them to bounded queues for a
//! consumer thread to drain.

use crate::dataflow::{BoundedQueue, BufferPool, CancellationToken, Snapshot};
use crate::error::EngineError;
use crate::integration::{Integrator, Simulator};
use crate::physics::{self, Diagnostics};
use crate::system::System;

/// Sampling cadences and output selection for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunnerConfig {
    pub render_step: f64,
    pub diagnostics_step: f64,
    /// Reserved for a future third output stream; round-trips through
    /// configuration but this core neither reads nor emits it.
    pub analytics_step: f64,
    pub persist_trajectory: bool,
    pub persist_diagnostics: bool,
}

/// A trajectory snapshot buffer leased from a [`BufferPool`], ready to be
/// queued for a writer and returned to the pool once the writer drops it.
pub type TrajectorySnapshot = Snapshot<crate::dataflow::PoolLease<System>>;

pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        Runner { config }
    }

    /// Run `simulator` on `initial` for `duration` of simulated time,
    /// publishing trajectory and diagnostics snapshots to the given
    /// queues. `softening` is the same value the simulator was
    /// constructed with, needed to compute diagnostics against the
    /// Hénon-scaled system (`g = 1.0`, `G` is implicit by then).
    ///
    /// Pushes a `None` sentinel onto both queues once the run ends,
    /// whether by reaching `duration` or by cancellation.
    pub fn run(
        &self,
        mut simulator: Simulator,
        initial: System,
        duration: f64,
        softening: f64,
        pool: &BufferPool<System>,
        trajectory_queue: &BoundedQueue<Option<TrajectorySnapshot>>,
        diagnostics_queue: &BoundedQueue<Option<Snapshot<Diagnostics>>>,
        cancel: &CancellationToken,
    ) -> Result<(), EngineError> {
        simulator.set_system(initial)?;

        let mut next_render = 0.0;
        let mut next_diag = 0.0;
        let mut t = simulator.system_time();

        while !cancel.is_cancelled() && t < duration {
            simulator.step(cancel);
            t = simulator.system_time();

            if self.config.persist_trajectory && t >= next_render {
                let mut buffer = pool.acquire();
                *buffer = simulator.system().clone();
                trajectory_queue.push(Some(Snapshot::new(t, buffer)));
                next_render += self.config.render_step;
            }

            if self.config.persist_diagnostics && t >= next_diag {
                let diagnostics = Diagnostics::compute(simulator.system(), softening, 1.0);
                diagnostics_queue.push(Some(Snapshot::new(t, diagnostics)));
                next_diag += self.config.diagnostics_step;
            }
        }

        trajectory_queue.push(None);
        diagnostics_queue.push(None);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::{EulerSettings, EulerSimulator};
    use crate::math::Vector3D;

    fn two_body() -> System {
        System::from_arrays(
            vec![Vector3D::new(-1.0, 0.0, 0.0), Vector3D::new(1.0, 0.0, 0.0)],
            vec![Vector3D::new(0.0, -0.1, 0.0), Vector3D::new(0.0, 0.1, 0.0)],
            vec![1.0, 1.0],
        )
    }

    #[test]
    fn run_emits_a_sentinel_on_both_queues() {
        let softening = 0.01;
        let simulator = Simulator::Euler(EulerSimulator::new(EulerSettings {
            time_step: 0.1,
            softening_parameter: softening,
        }));
        let config = RunnerConfig {
            render_step: 0.2,
            diagnostics_step: 0.2,
            analytics_step: 0.0,
            persist_trajectory: true,
            persist_diagnostics: true,
        };
        let runner = Runner::new(config);

        // Sized comfortably above the handful of snapshots this short run
        // produces: nothing pops concurrently here, so every leased buffer
        // stays outstanding until the test drains the queue below.
        let pool = BufferPool::new(16, System::new).unwrap();
        let trajectory_queue = BoundedQueue::new(16);
        let diagnostics_queue = BoundedQueue::new(16);
        let cancel = CancellationToken::new();

        runner
            .run(simulator, two_body(), 1.0, softening, &pool, &trajectory_queue, &diagnostics_queue, &cancel)
            .unwrap();

        let mut saw_data = false;
        loop {
            match trajectory_queue.pop() {
                Some(Some(_)) => saw_data = true,
                Some(None) => break,
                None => panic!("queue closed before a sentinel was observed"),
            }
        }
        assert!(saw_data);

        assert!(matches!(diagnostics_queue.pop(), Some(Some(_)) | Some(None)));
    }

    #[test]
    fn cancellation_still_drains_a_sentinel() {
        let softening = 0.01;
        let simulator = Simulator::Euler(EulerSimulator::new(EulerSettings {
            time_step: 0.1,
            softening_parameter: softening,
        }));
        let config = RunnerConfig {
            render_step: 0.2,
            diagnostics_step: 0.2,
            analytics_step: 0.0,
            persist_trajectory: false,
            persist_diagnostics: false,
        };
        let runner = Runner::new(config);

        let pool = BufferPool::new(1, System::new).unwrap();
        let trajectory_queue = BoundedQueue::new(1);
        let diagnostics_queue = BoundedQueue::new(1);
        let cancel = CancellationToken::new();
        cancel.cancel();

        runner
            .run(simulator, two_body(), 100.0, softening, &pool, &trajectory_queue, &diagnostics_queue, &cancel)
            .unwrap();

        assert!(matches!(trajectory_queue.pop(), Some(None)));
        assert_eq!(diagnostics_queue.pop(), Some(None));
    }
}
