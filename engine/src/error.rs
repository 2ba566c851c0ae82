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
//! The crate's error taxonomy.

use thiserror::Error;

/// Errors this crate's public API can return.
///
/// Malformed rows from [`crate::generation::create_from_stream`] are never
/// surfaced through this type — they are logged at `DEBUG` and the
/// offending row is skipped, per the reference contract. This enum covers
/// everything that actually halts a run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A generator's or integrator's settings failed validation. No state
    /// was mutated before the error was raised.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// A pool or octree arena could not allocate the capacity it was asked
    /// for. Fatal; propagates straight out of the constructor.
    #[error("allocation failure: {0}")]
    AllocationFailure(String),

    /// A writer could not open or write its destination.
    #[error("I/O failure: {0}")]
    IoFailure(#[from] std::io::Error),

    /// The run was cancelled cooperatively via a [`crate::dataflow::CancellationToken`].
    /// Not a hard failure — an orderly drain, distinguishable from `Ok`
    /// completion by callers that care.
    #[error("run cancelled")]
    Cancelled,
}
