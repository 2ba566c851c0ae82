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
//! Two Plummer spheres on a collision course, evolved with the individual
//! time step (HITS) integrator.

use nbody_engine::dataflow::{BoundedQueue, BufferPool, CancellationToken};
use nbody_engine::generation::{self, CollisionModelSettings, GenerationConfig, GenerationSettings};
use nbody_engine::integration::{HitsSettings, HitsSimulator, Simulator};
use nbody_engine::runner::{Runner, RunnerConfig};
use nbody_engine::system::System;

fn main() {
    env_logger::init();

    let config = GenerationConfig {
        seed: 7,
        settings: GenerationSettings::CollisionModel(CollisionModelSettings {
            particle_count_1: 200,
            radius_1: 5.0,
            total_mass_1: 200.0,
            particle_count_2: 150,
            radius_2: 4.0,
            total_mass_2: 150.0,
            separation: 30.0,
            relative_velocity: 2.0,
        }),
    };
    let system = generation::create(&config).expect("valid settings");
    let particle_count = system.count();

    let softening = 0.05;
    let simulator = Simulator::Hits(HitsSimulator::new(HitsSettings {
        time_step_parameter: 0.01,
        softening_parameter: softening,
    }));

    let runner_config = RunnerConfig {
        render_step: 0.2,
        diagnostics_step: 0.1,
        analytics_step: 0.0,
        persist_trajectory: false,
        persist_diagnostics: true,
    };
    let runner = Runner::new(runner_config);

    let pool = BufferPool::new(4, System::new).expect("pool size is positive");
    let trajectory_queue = BoundedQueue::new(4);
    let diagnostics_queue = BoundedQueue::new(64);
    let cancel = CancellationToken::new();

    runner
        .run(simulator, system, 2.0, softening, &pool, &trajectory_queue, &diagnostics_queue, &cancel)
        .expect("run should not fail on valid settings");

    let mut samples = 0;
    while let Some(Some(snapshot)) = diagnostics_queue.pop() {
        samples += 1;
        if samples == 1 {
            println!(
                "{particle_count} particles, initial virial radius {:.3}, r_vir/ms_vel crossing time {:.3}",
                snapshot.data.r_vir, snapshot.data.t_cr
            );
        }
    }
    println!("collected {samples} diagnostics samples");
}
