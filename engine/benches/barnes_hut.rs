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
//! Compares the Barnes-Hut leapfrog step against direct O(N²) leapfrog as
//! particle count grows, to show the octree's asymptotic payoff.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use nbody_engine::dataflow::CancellationToken;
use nbody_engine::generation::{self, GenerationConfig, GenerationSettings, PlummerSphereSettings};
use nbody_engine::integration::{
    BarnesHutLeapfrogSettings, BarnesHutLeapfrogSimulator, Integrator, LeapfrogSettings, LeapfrogSimulator,
};

fn plummer_sphere(n: usize) -> nbody_engine::system::System {
    let config = GenerationConfig {
        seed: 3,
        settings: GenerationSettings::PlummerSphere(PlummerSphereSettings {
            particle_count: n,
            sphere_radius: 10.0,
            total_mass: n as f64,
        }),
    };
    generation::create(&config).unwrap()
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("n_squared_vs_octree");
    let cancel = CancellationToken::new();

    for &n in &[128usize, 512, 2048] {
        group.bench_with_input(BenchmarkId::new("direct_leapfrog", n), &n, |b, &n| {
            let mut sim = LeapfrogSimulator::new(LeapfrogSettings { time_step: 0.001, softening_parameter: 0.05 });
            sim.set_system(plummer_sphere(n)).unwrap();
            b.iter(|| sim.step(black_box(&cancel)));
        });

        group.bench_with_input(BenchmarkId::new("barnes_hut_leapfrog", n), &n, |b, &n| {
            let mut sim = BarnesHutLeapfrogSimulator::new(BarnesHutLeapfrogSettings {
                time_step: 0.001,
                theta_mac: 0.5,
                softening_parameter: 0.05,
            });
            sim.set_system(plummer_sphere(n)).unwrap();
            b.iter(|| sim.step(black_box(&cancel)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
