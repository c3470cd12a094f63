// SPDX-License-Identifier: MIT OR Apache-2.0

//! The stack frame resolver contract.

use crate::stack_data::StackData;
use std::fmt::Debug;

/// Errors produced while resolving a stack frame.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /**
    The requested index does not name a frame of the current call stack.

    This is deterministic: a wrong index is the result of a misconfigured base index
    or call stack correction, so it is never retried or papered over.
    */
    #[error(
        "frame index {index} is outside the call stack{}",
        .depth.map(|depth| format!(" (depth {depth})")).unwrap_or_default()
    )]
    OutOfRangeFrame {
        /// The effective index that was requested.
        index: isize,
        /// The number of frames that were available, if the stack was inspected.
        depth: Option<usize>,
    },
}

/**
Converts a frame index into [StackData].

Index 0 is the frame of the `resolve` call itself; higher indices walk outward
towards the thread's entry point.
*/
pub trait StackFrameResolver: Debug + Send + Sync {
    /**
    Returns the frame at `frame_index`.

    Fails with [ResolveError::OutOfRangeFrame] when the stack is not that deep.
    */
    fn resolve(&self, frame_index: usize) -> Result<StackData, ResolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn out_of_range_message() {
        let err = ResolveError::OutOfRangeFrame {
            index: 40,
            depth: Some(12),
        };
        assert_eq!(
            err.to_string(),
            "frame index 40 is outside the call stack (depth 12)"
        );

        let err = ResolveError::OutOfRangeFrame {
            index: -1,
            depth: None,
        };
        assert_eq!(err.to_string(), "frame index -1 is outside the call stack");
    }
}
