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
//! A fixed-capacity, blocking FIFO for handing snapshots from producer to
//! consumer without allocating in the hot loop.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};

struct Inner<T> {
    items: VecDeque<T>,
    closed: bool,
}

/// A blocking, bounded, multi-producer multi-consumer FIFO. Delivery is
/// strictly in push order and no element is ever dropped.
pub struct BoundedQueue<T> {
    capacity: usize,
    state: Mutex<Inner<T>>,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Arc<Self> {
        assert!(capacity > 0, "a zero-capacity queue can never be pushed to");
        Arc::new(BoundedQueue {
            capacity,
            state: Mutex::new(Inner { items: VecDeque::with_capacity(capacity), closed: false }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        })
    }

    /// Push `item`, blocking while the queue is at capacity.
    ///
    /// # Panics
    ///
    /// Panics if the queue has already been [`close`](Self::close)d — pushing
    /// after close is a producer bug, not a condition callers recover from.
    pub fn push(&self, item: T) {
        let mut state = self.state.lock().unwrap();
        loop {
            assert!(!state.closed, "push on a closed BoundedQueue");
            if state.items.len() < self.capacity {
                state.items.push_back(item);
                self.not_empty.notify_one();
                return;
            }
            state = self.not_full.wait(state).unwrap();
        }
    }

    /// Pop the oldest item, blocking while the queue is empty and open.
    /// Returns `None` once the queue is closed and drained.
    pub fn pop(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        loop {
            if let Some(item) = state.items.pop_front() {
                self.not_full.notify_one();
                return Some(item);
            }
            if state.closed {
                return None;
            }
            state = self.not_empty.wait(state).unwrap();
        }
    }

    /// Signal end-of-stream. Any blocked or future `pop` on an empty queue
    /// returns `None` instead of blocking forever.
    pub fn close(&self) {
        let mut state = self.state.lock().unwrap();
        state.closed = true;
        self.not_empty.notify_all();
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
