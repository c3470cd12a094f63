// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-global facade state: the loggers and the tag provider.
//!
//! Every log statement issued through the macros asks the global [`TagProvider`] for a tag,
//! builds a [`LogRecord`](crate::LogRecord) and hands a copy to each global [`Logger`].
//!
//! # Default Behavior
//!
//! Until configured, there is a single [`StdErrorLogger`], and the tag provider is a
//! [`CallerAwareTagger`] over a [`BacktraceResolver`] with the
//! [default base index](crate::DEFAULT_CALL_STACK_INDEX). On wasm32, where the stack cannot be
//! walked, the default provider is a [`FixedTagger`](crate::FixedTagger) instead.
//!
//! # Thread Safety
//!
//! Both registries sit behind a spinlock held only long enough to clone or replace `Arc`s,
//! so they can be read from any thread, including the wasm main thread. Loggers and
//! providers that get replaced stay alive until in-flight statements drop their `Arc`.
//!
//! # Examples
//!
//! ## Replacing the loggers
//!
//! ```
//! use calltag::global::{global_loggers, set_global_loggers};
//! use calltag::InMemoryLogger;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(InMemoryLogger::new());
//! set_global_loggers(vec![logger.clone()]);
//! assert_eq!(global_loggers().len(), 1);
//!
//! calltag::warn!(tag: "Disk", "almost full");
//! assert_eq!(logger.drain_logs(), "[Disk]: almost full");
//! ```
//!
//! ## Installing a tagger with a different base index
//!
//! ```
//! use calltag::global::set_tag_provider;
//! use calltag::{BacktraceResolver, CallerAwareTagger};
//! use std::sync::Arc;
//!
//! // logging goes through one extra layer of helpers in this application
//! let tagger = CallerAwareTagger::new(BacktraceResolver::new())
//!     .with_base_index(calltag::DEFAULT_CALL_STACK_INDEX + 1);
//! set_tag_provider(Arc::new(tagger));
//! ```

#[cfg(not(target_arch = "wasm32"))]
use crate::backtrace_resolver::BacktraceResolver;
#[cfg(target_arch = "wasm32")]
use crate::fixed_tagger::FixedTagger;
use crate::logger::Logger;
use crate::spinlock::Spinlock;
use crate::stderror_logger::StdErrorLogger;
#[cfg(not(target_arch = "wasm32"))]
use crate::tagger::CallerAwareTagger;
use crate::tagger::TagProvider;
use std::sync::{Arc, OnceLock};

static GLOBAL_LOGGERS: OnceLock<Spinlock<Vec<Arc<dyn Logger>>>> = OnceLock::new();
static TAG_PROVIDER: OnceLock<Spinlock<Arc<dyn TagProvider>>> = OnceLock::new();

/// Serializes tests that swap the global loggers or provider.
#[cfg(test)]
pub(crate) static TEST_LOGGER_GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

fn loggers() -> &'static Spinlock<Vec<Arc<dyn Logger>>> {
    GLOBAL_LOGGERS.get_or_init(|| Spinlock::new(vec![Arc::new(StdErrorLogger::new())]))
}

#[cfg(not(target_arch = "wasm32"))]
fn default_provider() -> Arc<dyn TagProvider> {
    Arc::new(CallerAwareTagger::new(BacktraceResolver::new()))
}

#[cfg(target_arch = "wasm32")]
fn default_provider() -> Arc<dyn TagProvider> {
    Arc::new(FixedTagger::default())
}

fn provider() -> &'static Spinlock<Arc<dyn TagProvider>> {
    TAG_PROVIDER.get_or_init(|| Spinlock::new(default_provider()))
}

/// Returns the current global loggers.
pub fn global_loggers() -> Vec<Arc<dyn Logger>> {
    loggers().with(|loggers| loggers.clone())
}

/// Appends a logger to the global loggers.
pub fn add_global_logger(logger: Arc<dyn Logger>) {
    loggers().with(|loggers| loggers.push(logger));
}

/**
Replaces all global loggers.

An empty vector is allowed; records are then dropped.
*/
pub fn set_global_loggers(new_loggers: Vec<Arc<dyn Logger>>) {
    let old = loggers().with(|loggers| std::mem::replace(loggers, new_loggers));
    //dropped outside the lock
    drop(old);
}

/// Asks every global logger to flush.
pub fn prepare_to_die() {
    for logger in global_loggers() {
        logger.prepare_to_die();
    }
}

/// Returns the global tag provider.
pub fn tag_provider() -> Arc<dyn TagProvider> {
    provider().with(|provider| provider.clone())
}

/// Replaces the global tag provider.
pub fn set_tag_provider(new_provider: Arc<dyn TagProvider>) {
    let old = provider().with(|provider| std::mem::replace(provider, new_provider));
    drop(old);
}

/**
Shifts the frame used for the next log statement on this thread.

Call this from a helper that wraps the logging macros, right before it logs. An offset of
`1` attributes the statement to the helper's caller instead of the helper.

```rust
use calltag::InMemoryLogger;
use calltag::global::set_global_loggers;
use std::sync::Arc;

#[inline(never)]
fn log_failure(what: &str) {
    calltag::set_call_stack_correction(1);
    calltag::error!("{} failed", what);
}

#[inline(never)]
fn open_database() {
    log_failure("open");
}

let logger = Arc::new(InMemoryLogger::new());
set_global_loggers(vec![logger.clone()]);
open_database();
let records = logger.drain_records();
assert!(records[0].tag().ends_with(" open_database]"));
```
*/
pub fn set_call_stack_correction(offset: isize) {
    tag_provider().set_call_stack_correction(offset);
}
