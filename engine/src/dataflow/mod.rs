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
//! The back-pressured producer/consumer spine: a fixed-size buffer pool
//! feeding a bounded, blocking queue, plus cooperative cancellation.

mod cancellation;
mod pool;
mod queue;

pub use cancellation::CancellationToken;
pub use pool::{BufferPool, PoolLease};
pub use queue::BoundedQueue;

/// A value published at a point in simulated time. Immutable once created;
/// held by zero or more consumers and returned to its pool once the last
/// one releases it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<T> {
    pub time: f64,
    pub data: T,
}

impl<T> Snapshot<T> {
    pub fn new(time: f64, data: T) -> Self {
        Snapshot { time, data }
    }
}
