// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
Per-thread, one-shot call stack corrections.

A [CorrectionSlot] holds at most one pending offset for each thread. Setting it overwrites
whatever was pending; taking it returns the offset and leaves the slot empty, so a correction
meant for one log statement can never leak into the next one.

The storage is a `thread_local!` map keyed by a process-unique slot id. Each thread only ever
touches its own map, so no lock is taken. On targets without threads the thread-local is
simply a global with the same contract.

Dropping a slot clears only the dropping thread's entry. A correction another thread set and
never consumed stays in that thread's map, one entry per abandoned slot, until the thread
exits. Ids are never reused, so such an entry can't reach a later slot.
*/

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static SLOT_ID: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static PENDING: RefCell<HashMap<u64, isize>> = RefCell::new(HashMap::new());
}

/**
A pending call stack correction for each thread.

```rust
use calltag::CorrectionSlot;

let slot = CorrectionSlot::new();
slot.set(2);
assert_eq!(slot.take(), Some(2));
assert_eq!(slot.take(), None);
```
*/
#[derive(Debug)]
pub struct CorrectionSlot {
    id: u64,
}

impl CorrectionSlot {
    pub fn new() -> Self {
        Self {
            id: SLOT_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Stores `offset` as the calling thread's pending correction, replacing any unconsumed one.
    pub fn set(&self, offset: isize) {
        PENDING.with(|pending| {
            pending.borrow_mut().insert(self.id, offset);
        });
    }

    /// Returns the calling thread's pending correction and clears it.
    pub fn take(&self) -> Option<isize> {
        PENDING.with(|pending| pending.borrow_mut().remove(&self.id))
    }
}

impl Default for CorrectionSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CorrectionSlot {
    fn drop(&mut self) {
        //other threads' entries are unreachable once the id is gone; ids are never reused
        let _ = PENDING.try_with(|pending| {
            if let Ok(mut pending) = pending.try_borrow_mut() {
                pending.remove(&self.id);
            }
        });
    }
}

/*
Boilerplate notes for CorrectionSlot:

- Clone: no. A clone would either share the id (two owners of one slot, and the first drop
  clears the other's pending value) or get a fresh one (surprising for something called clone).
- PartialEq/Eq/Hash: no, identity is the only sensible notion and nobody needs it.
- Send/Sync: automatic; the struct is just an id, the state is in thread-locals.
*/
