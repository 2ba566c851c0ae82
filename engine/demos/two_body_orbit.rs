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
//! A circular two-body orbit run with leapfrog, printing its energy drift.

use nbody_engine::dataflow::{BoundedQueue, BufferPool, CancellationToken};
use nbody_engine::integration::{LeapfrogSettings, LeapfrogSimulator, Simulator};
use nbody_engine::math::Vector3D;
use nbody_engine::runner::{Runner, RunnerConfig};
use nbody_engine::system::System;

fn main() {
    env_logger::init();

    let system = System::from_arrays(
        vec![Vector3D::new(-1.0, 0.0, 0.0), Vector3D::new(1.0, 0.0, 0.0)],
        vec![Vector3D::new(0.0, -0.5, 0.0), Vector3D::new(0.0, 0.5, 0.0)],
        vec![1.0, 1.0],
    );

    let softening = 0.01;
    let simulator = Simulator::Leapfrog(LeapfrogSimulator::new(LeapfrogSettings {
        time_step: 0.001,
        softening_parameter: softening,
    }));

    let config = RunnerConfig {
        render_step: 0.1,
        diagnostics_step: 0.1,
        analytics_step: 0.0,
        persist_trajectory: true,
        persist_diagnostics: true,
    };
    let runner = Runner::new(config);

    let pool = BufferPool::new(32, System::new).expect("pool size is positive");
    let trajectory_queue = BoundedQueue::new(32);
    let diagnostics_queue = BoundedQueue::new(32);
    let cancel = CancellationToken::new();

    runner
        .run(simulator, system, 5.0, softening, &pool, &trajectory_queue, &diagnostics_queue, &cancel)
        .expect("run should not fail on valid settings");

    let mut first_energy = None;
    let mut last_energy = 0.0;
    while let Some(Some(snapshot)) = diagnostics_queue.pop() {
        let e = snapshot.data.e_kin + snapshot.data.e_pot;
        first_energy.get_or_insert(e);
        last_energy = e;
    }
    if let Some(e0) = first_energy {
        println!("energy drift over the run: {:.6e}", (last_energy - e0).abs());
    }

    while trajectory_queue.pop().flatten().is_some() {}
}
