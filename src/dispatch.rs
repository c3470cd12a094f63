// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log statement dispatch.
//!
//! These are the functions the logging macros expand to. Each statement:
//! 1. asks the global [`TagProvider`](crate::TagProvider) for a tag, exactly once;
//! 2. builds a [`LogRecord`];
//! 3. hands a copy to every global logger.
//!
//! The functions on the path from a macro to the tag provider are never inlined, because
//! the [default base index](crate::DEFAULT_CALL_STACK_INDEX) counts their frames.

use crate::Level;
use crate::global::{global_loggers, tag_provider};
use crate::log_record::LogRecord;
use crate::resolver::ResolveError;
use std::fmt::Arguments;

/// Tag used by the crate's own diagnostics.
pub(crate) const INTERNAL_TAG: &str = "calltag";

#[inline(never)]
fn dispatch(level: Level, tag: Option<&str>, args: Arguments<'_>) -> Result<(), ResolveError> {
    let tag = tag_provider().resolve_tag(tag)?;
    post(LogRecord::new(level, tag, args.to_string()));
    Ok(())
}

fn post(record: LogRecord) {
    for logger in global_loggers() {
        logger.finish_log_record(record.clone());
    }
}

/**
Logs a statement, returning tag resolution failures to the caller.

```rust
use calltag::{InMemoryLogger, Level};
use calltag::global::set_global_loggers;
use std::sync::Arc;

let logger = Arc::new(InMemoryLogger::new());
set_global_loggers(vec![logger.clone()]);

calltag::try_log(Level::Info, Some("Boot"), format_args!("ready in {}ms", 12)).unwrap();
assert_eq!(logger.drain_logs(), "[Boot]: ready in 12ms");
```
*/
#[inline(never)]
pub fn try_log(level: Level, tag: Option<&str>, args: Arguments<'_>) -> Result<(), ResolveError> {
    let result = dispatch(level, tag, args);
    //not a tail call, so this frame stays on the stack
    std::hint::black_box(result)
}

/**
Logs a statement.

# Panics

If no tag can be resolved for the statement. That only happens when the base index or a call
stack correction points outside the call stack, which is a bug in the caller's accounting of
its wrapper layers. Use [try_log] to handle the error instead.
*/
#[inline(never)]
pub fn log(level: Level, tag: Option<&str>, args: Arguments<'_>) {
    if let Err(err) = dispatch(level, tag, args) {
        panic!("calltag: could not resolve a tag for this log statement: {}", err);
    }
}

/// Sends one of the crate's own diagnostics straight to the loggers, bypassing tag resolution.
pub(crate) fn internal(message: String) {
    post(LogRecord::new(Level::Debug, INTERNAL_TAG, message));
}
