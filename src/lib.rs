//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# calltag

calltag derives log tags from where the log statement is, and lets logging helpers correct
for the stack frames they add.

# The problem

A tag that names the source of a log line is the most useful part of the line, and the most
tedious to write. Deriving it from the call stack is easy until someone wraps the logging call
in a helper: now every line is attributed to the helper.

calltag resolves the tag by walking a fixed number of frames up the stack, and lets the helper
say "skip one more frame, for the next statement on this thread only":

```rust
# use calltag::InMemoryLogger;
# use std::sync::Arc;
# let logger = Arc::new(InMemoryLogger::new());
# calltag::global::set_global_loggers(vec![logger.clone()]);
#[inline(never)]
fn report(err: &str) {
    calltag::set_call_stack_correction(1);
    calltag::error!("request failed: {}", err);
}

#[inline(never)]
fn handle_request() {
    // tagged as `handle_request`, not `report`
    report("timeout");
}
# handle_request();
# assert!(logger.drain_records()[0].tag().ends_with(" handle_request]"));
```

The correction is consumed by the very next tag resolution on the thread, whether or not that
statement supplied its own tag, so it can never leak into an unrelated statement.

# The pieces

* [StackFrameResolver] turns a frame index into [StackData]. [BacktraceResolver] does this
  for the live stack.
* [CallerAwareTagger] combines a base index with the thread's pending correction, asks the
  resolver, and turns the frame into a tag like `[net.rs:42 connect]`. An explicit tag always
  wins.
* [TagProvider] is the capability the facade needs; install one with
  [global::set_tag_provider].
* The facade: the logging macros ([info!], [warn!], ...), [Logger] sinks,
  [global::set_global_loggers].

Resolution failures are never hidden behind a placeholder tag. [try_log] returns them;
the macros panic with them.

# Debug info

Derived tags depend on symbol and line information in the binary. Debug builds have it; release
builds need it switched on:

```toml
[profile.release]
debug = "line-tables-only"
```

Without it, inlined functions vanish from the stack and statements are silently attributed to
the wrong function. Explicit tags are unaffected.

# wasm32

`wasm32-unknown-unknown` offers no way to walk the stack, so the default tag provider there is a
[FixedTagger]: explicit tags as usual, and a fixed tag for everything else. Derived tags on
wasm32 need a [StackFrameResolver] of your own.

# Feature flags

* `calltag_internal`: the tagger reports consumed corrections and failed resolutions as
  records tagged `calltag`.
*/

mod backtrace_resolver;
mod correction;
mod dispatch;
mod fixed_tagger;
mod format;
pub mod global;
mod inmemory_logger;
mod level;
mod log_record;
mod logger;
mod macros;
mod resolver;
mod spinlock;
mod stack_data;
mod stderror_logger;
mod tagger;

pub(crate) use macros::debuginternal;

pub use backtrace_resolver::BacktraceResolver;
pub use correction::CorrectionSlot;
pub use dispatch::{log, try_log};
pub use fixed_tagger::FixedTagger;
pub use format::format_line;
pub use global::set_call_stack_correction;
pub use inmemory_logger::InMemoryLogger;
pub use level::Level;
pub use log_record::LogRecord;
pub use logger::Logger;
pub use resolver::{ResolveError, StackFrameResolver};
pub use stack_data::StackData;
pub use stderror_logger::StdErrorLogger;
pub use tagger::{CallerAwareTagger, DEFAULT_CALL_STACK_INDEX, TagProvider};
