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
//! A fixed-size, blocking pool of reusable buffers.
//!
//! Unlike a growable cache, every instance a [`BufferPool`] will ever hand
//! out is allocated up front, all with the same shape (e.g. a `System`
//! sized to N particles). `acquire` blocks rather than allocates when the
//! roster is exhausted, which is what lets a producer and its downstream
//! consumers share a fixed number of snapshot buffers without the pool
//! itself becoming an unbounded allocator in the hot loop.

use std::sync::{Arc, Condvar, Mutex};

use crate::error::EngineError;

struct Inner<T> {
    idle: Mutex<Vec<T>>,
    available: Condvar,
}

/// A fixed roster of `T` instances, all built the same way at construction.
pub struct BufferPool<T> {
    inner: Arc<Inner<T>>,
    capacity: usize,
}

impl<T> Clone for BufferPool<T> {
    fn clone(&self) -> Self {
        BufferPool { inner: Arc::clone(&self.inner), capacity: self.capacity }
    }
}

impl<T> BufferPool<T> {
    /// Build a pool of `size` buffers, each produced by `make`.
    ///
    /// Returns [`EngineError::AllocationFailure`] only if `size` is zero —
    /// a pool that can never hand out a lease is a construction error, not
    /// a runtime one.
    pub fn new(size: usize, mut make: impl FnMut() -> T) -> Result<Self, EngineError> {
        if size == 0 {
            return Err(EngineError::AllocationFailure("buffer pool size must be positive".into()));
        }
        let idle = (0..size).map(|_| make()).collect();
        Ok(BufferPool {
            inner: Arc::new(Inner { idle: Mutex::new(idle), available: Condvar::new() }),
            capacity: size,
        })
    }

    /// Total number of buffers owned by this pool, leased or idle.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lease an idle buffer, blocking until one is available.
    pub fn acquire(&self) -> PoolLease<T> {
        let mut idle = self.inner.idle.lock().unwrap();
        let buffer = loop {
            if let Some(buffer) = idle.pop() {
                break buffer;
            }
            idle = self.inner.available.wait(idle).unwrap();
        };
        drop(idle);

        PoolLease { buffer: Some(buffer), inner: Arc::clone(&self.inner) }
    }
}

/// An RAII lease on one buffer. Returns it to the pool (and wakes one
/// waiting acquirer) when dropped.
pub struct PoolLease<T> {
    buffer: Option<T>,
    inner: Arc<Inner<T>>,
}

impl<T> std::ops::Deref for PoolLease<T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.buffer.as_ref().expect("buffer taken before drop")
    }
}

impl<T> std::ops::DerefMut for PoolLease<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.buffer.as_mut().expect("buffer taken before drop")
    }
}

impl<T> Drop for PoolLease<T> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.inner.idle.lock().unwrap().push(buffer);
            self.inner.available.notify_one();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn zero_size_pool_is_rejected() {
        assert!(BufferPool::new(0, Vec::<i32>::new).is_err());
    }

    #[test]
    fn lease_is_returned_on_drop() {
        let pool = BufferPool::new(1, || 0i32).unwrap();
        {
            let mut lease = pool.acquire();
            *lease = 42;
        }
        let lease = pool.acquire();
        assert_eq!(*lease, 42);
    }

    #[test]
    fn acquire_blocks_until_a_lease_is_released() {
        let pool = BufferPool::new(1, || 0i32).unwrap();
        let started = Arc::new(AtomicUsize::new(0));

        let first = pool.acquire();
        let pool2 = pool.clone();
        let started2 = Arc::clone(&started);
        let handle = thread::spawn(move || {
            started2.store(1, Ordering::SeqCst);
            let _second = pool2.acquire();
        });

        thread::sleep(Duration::from_millis(50));
        assert_eq!(started.load(Ordering::SeqCst), 1);

        drop(first);
        handle.join().unwrap();
    }

    #[test]
    fn no_instance_is_ever_lost() {
        let pool = BufferPool::new(3, || 0i32).unwrap();
        let leases: Vec<_> = (0..3).map(|_| pool.acquire()).collect();
        drop(leases);
        let _a = pool.acquire();
        let _b = pool.acquire();
        let _c = pool.acquire();
    }
}
