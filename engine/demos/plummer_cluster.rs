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
//! Generates a Plummer sphere and evolves it with the Barnes-Hut leapfrog
//! integrator, writing both streams to CSV.

use nbody_engine::dataflow::{BoundedQueue, BufferPool, CancellationToken};
use nbody_engine::generation::{self, GenerationConfig, GenerationSettings, PlummerSphereSettings};
use nbody_engine::integration::{BarnesHutLeapfrogSettings, BarnesHutLeapfrogSimulator, Simulator};
use nbody_engine::runner::{Runner, RunnerConfig};
use nbody_engine::system::System;
use nbody_engine::writer::{CsvDiagnosticsWriter, CsvTrajectoryWriter, SnapshotWriter};

fn main() {
    env_logger::init();

    let config = GenerationConfig {
        seed: 42,
        settings: GenerationSettings::PlummerSphere(PlummerSphereSettings {
            particle_count: 500,
            sphere_radius: 10.0,
            total_mass: 500.0,
        }),
    };
    let system = generation::create(&config).expect("valid settings");

    let softening = 0.05;
    let simulator = Simulator::BarnesHutLeapfrog(BarnesHutLeapfrogSimulator::new(BarnesHutLeapfrogSettings {
        time_step: 0.005,
        theta_mac: 0.5,
        softening_parameter: softening,
    }));

    let runner_config = RunnerConfig {
        render_step: 0.1,
        diagnostics_step: 0.05,
        analytics_step: 0.0,
        persist_trajectory: true,
        persist_diagnostics: true,
    };
    let runner = Runner::new(runner_config);

    let pool = BufferPool::new(64, System::new).expect("pool size is positive");
    let trajectory_queue = BoundedQueue::new(64);
    let diagnostics_queue = BoundedQueue::new(64);
    let cancel = CancellationToken::new();

    let out_dir = std::env::temp_dir().join("enkas-plummer-demo");
    let mut trajectory_writer =
        CsvTrajectoryWriter::create(out_dir.join("trajectory.csv")).expect("writer opens");
    let mut diagnostics_writer =
        CsvDiagnosticsWriter::create(out_dir.join("diagnostics.csv")).expect("writer opens");

    std::thread::scope(|scope| {
        scope.spawn(|| {
            runner
                .run(simulator, system, 1.0, softening, &pool, &trajectory_queue, &diagnostics_queue, &cancel)
                .expect("run should not fail on valid settings");
        });

        while let Some(snapshot) = trajectory_queue.pop().flatten() {
            trajectory_writer.write_snapshot(snapshot.time, &snapshot.data).expect("write succeeds");
        }
        while let Some(snapshot) = diagnostics_queue.pop().flatten() {
            diagnostics_writer.write_snapshot(snapshot.time, &snapshot.data).expect("write succeeds");
        }
    });

    println!("wrote trajectory and diagnostics to {}", out_dir.display());
}
