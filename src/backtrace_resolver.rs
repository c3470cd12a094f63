// SPDX-License-Identifier: MIT OR Apache-2.0

//! A [StackFrameResolver] that inspects the live call stack.

use crate::resolver::{ResolveError, StackFrameResolver};
use crate::stack_data::StackData;

const ANCHOR_TYPE: &str = "BacktraceResolver";
const ANCHOR_METHOD: &str = "::resolve";

/**
Resolves frames of the current thread's call stack with the `backtrace` crate.

Frame 0 is the `resolve` frame of this resolver; everything the unwinder reports above it
(the unwinder's own frames) is skipped. Each symbol counts as one logical frame, so a
function that was inlined into its caller still occupies its own index, which keeps
indices stable between debug and release builds as long as debug info is present.

Frames without any symbol information are not counted. Binaries stripped of symbols
cannot be resolved at all; every request then fails with
[ResolveError::OutOfRangeFrame].

```rust
use calltag::{BacktraceResolver, StackFrameResolver};

let resolver = BacktraceResolver::new();
let own_frame = resolver.resolve(0).unwrap();
assert!(own_frame.function().ends_with("::resolve"));
```
*/
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BacktraceResolver {}

impl BacktraceResolver {
    pub const fn new() -> Self {
        Self {}
    }
}

fn is_anchor(function: &str) -> bool {
    function.contains(ANCHOR_TYPE) && function.ends_with(ANCHOR_METHOD)
}

fn stack_data(symbol: &backtrace::Symbol) -> StackData {
    let function = symbol
        .name()
        .map(|name| format!("{:#}", name))
        .unwrap_or_default();
    StackData::new(
        function,
        symbol.filename().map(|path| path.to_path_buf()),
        symbol.lineno(),
        symbol.colno(),
    )
}

impl StackFrameResolver for BacktraceResolver {
    #[inline(never)]
    fn resolve(&self, frame_index: usize) -> Result<StackData, ResolveError> {
        let mut anchored = false;
        let mut depth = 0usize;
        let mut found = None;
        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                if found.is_some() {
                    return;
                }
                let data = stack_data(symbol);
                if !anchored {
                    if !is_anchor(data.function()) {
                        return;
                    }
                    anchored = true;
                }
                if depth == frame_index {
                    found = Some(data);
                }
                depth += 1;
            });
            found.is_none()
        });
        found.ok_or(ResolveError::OutOfRangeFrame {
            index: frame_index as isize,
            depth: Some(depth),
        })
    }
}
