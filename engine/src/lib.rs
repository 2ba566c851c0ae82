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
//! # enkas-engine
//!
//! An N-body gravitational simulation engine: initial-condition
//! generators, a choice of time integrators from first-order Euler up to
//! Barnes-Hut leapfrog, and a bounded producer/consumer pipeline for
//! streaming trajectory and diagnostics snapshots out of a running
//! simulation.
//!
//! ## Layout
//!
//! - [`math`] — vectors, bivectors and rotors used throughout.
//! - [`system`] — the structure-of-arrays particle store.
//! - [`physics`] — energy, momentum and the Hénon-unit rescaling.
//! - [`generation`] — initial-condition generators.
//! - [`integration`] — the five time-stepping schemes.
//! - [`dataflow`] — the bounded queue and buffer pool the runner streams through.
//! - [`runner`] — the orchestrator tying an integrator to a dataflow pipeline.
//! - [`writer`] — CSV persistence of trajectory and diagnostics streams.

pub mod dataflow;
pub mod error;
pub mod generation;
pub mod integration;
pub mod math;
pub mod physics;
pub mod runner;
pub mod system;
pub mod writer;

pub use error::EngineError;
pub use system::System;
