// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
A minimal exclusive spinlock for the global registries.

The wasm main thread is not allowed to block, so the registries can't use a `Mutex`.
Critical sections only clone or replace an `Arc` or a `Vec` of them.
*/

use std::cell::UnsafeCell;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::{Acquire, Relaxed, Release};

pub struct Spinlock<T> {
    data: UnsafeCell<T>,
    locked: AtomicBool,
}

unsafe impl<T: Send> Send for Spinlock<T> {}
unsafe impl<T: Send> Sync for Spinlock<T> {}

impl<T> Spinlock<T> {
    pub const fn new(data: T) -> Self {
        Spinlock {
            data: UnsafeCell::new(data),
            locked: AtomicBool::new(false),
        }
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        while self
            .locked
            .compare_exchange_weak(false, true, Acquire, Relaxed)
            .is_err()
        {
            std::hint::spin_loop();
        }
        //released on drop, so a panicking `f` does not wedge the lock
        let _unlock = Unlock(&self.locked);
        // SAFETY: the flag guarantees exclusive access until `_unlock` drops
        unsafe { f(&mut *self.data.get()) }
    }
}

struct Unlock<'a>(&'a AtomicBool);

impl Drop for Unlock<'_> {
    fn drop(&mut self) {
        self.0.store(false, Release);
    }
}
