// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller-aware tag derivation.
//!
//! This module defines [`TagProvider`], the capability the facade uses to obtain a tag for
//! each log statement, and [`CallerAwareTagger`], the provider that derives the tag from
//! the location of the statement in the source.
//!
//! # Frame indices
//!
//! The tagger asks its [`StackFrameResolver`] for the frame `base_index + correction`. The
//! base index is the number of frames between the resolver's inspection point and the user's
//! call site when the facade is used directly. For the facade in this crate that chain is
//!
//! | index | frame                                   |
//! |-------|-----------------------------------------|
//! | 0     | `BacktraceResolver::resolve`            |
//! | 1     | `CallerAwareTagger::resolve_tag`        |
//! | 2     | the facade's dispatch                   |
//! | 3     | [`crate::log()`] or [`crate::try_log()`] |
//! | 4     | the function containing the log macro   |
//!
//! which is [`DEFAULT_CALL_STACK_INDEX`]. Adding a layer to this chain means re-deriving it.
//!
//! # Corrections
//!
//! A helper that wraps the logging macros adds frames of its own. Right before logging it
//! sets a correction on the current thread, and the very next resolution on that thread adds
//! the correction to the base index and clears it:
//!
//! ```rust
//! # fn main() -> Result<(), calltag::ResolveError> {
//! use calltag::{BacktraceResolver, CallerAwareTagger, TagProvider};
//!
//! let tagger = CallerAwareTagger::new(BacktraceResolver::new());
//! tagger.set_call_stack_correction(1);
//! // the correction is consumed even though an explicit tag wins
//! assert_eq!(tagger.resolve_tag(Some("Net"))?, "Net");
//! assert_eq!(tagger.take_call_stack_correction(), None);
//! # Ok(())
//! # }
//! ```

use crate::correction::CorrectionSlot;
use crate::resolver::{ResolveError, StackFrameResolver};
use crate::stack_data::StackData;
use std::fmt::Debug;
use std::sync::{Mutex, PoisonError};

/**
The base frame index for log statements issued through this crate's facade.

The count is only right when the binary carries at least line tables
(`debug = "line-tables-only"` in the Cargo profile). Without them, functions inlined into their
callers disappear from the stack and the tag silently names a different function.
*/
pub const DEFAULT_CALL_STACK_INDEX: usize = 4;

/**
Supplies the tag for a log statement.

The facade calls [TagProvider::resolve_tag] exactly once per log statement.
*/
pub trait TagProvider: Debug + Send + Sync {
    /**
    Returns the tag to attach to the current log statement.

    A non-empty `explicit_tag` is expected to win over any derived tag.
    */
    fn resolve_tag(&self, explicit_tag: Option<&str>) -> Result<String, ResolveError>;

    /**
    Adjusts the frame used by the next [Self::resolve_tag] on this thread.

    Providers that do not derive tags from the stack ignore this.
    */
    fn set_call_stack_correction(&self, _offset: isize) {}
}

/**
Derives tags from the caller's position in the call stack.

See the [module documentation](self) for how frame indices and corrections combine.
*/
#[derive(Debug)]
pub struct CallerAwareTagger<R> {
    resolver: R,
    base_index: usize,
    correction: CorrectionSlot,
    last_stack_data: Mutex<Option<StackData>>,
}

impl<R: StackFrameResolver> CallerAwareTagger<R> {
    /// Creates a tagger using [DEFAULT_CALL_STACK_INDEX].
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            base_index: DEFAULT_CALL_STACK_INDEX,
            correction: CorrectionSlot::new(),
            last_stack_data: Mutex::new(None),
        }
    }

    /// Replaces the base frame index.
    pub fn with_base_index(mut self, base_index: usize) -> Self {
        self.base_index = base_index;
        self
    }

    pub fn base_index(&self) -> usize {
        self.base_index
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Sets the calling thread's pending correction, replacing an unconsumed one.
    pub fn set_call_stack_correction(&self, offset: isize) {
        self.correction.set(offset);
    }

    /// Returns and clears the calling thread's pending correction.
    pub fn take_call_stack_correction(&self) -> Option<isize> {
        self.correction.take()
    }

    /**
    The frame found by the most recent successful resolution on any thread.

    Every resolution counts, including those for statements whose explicit tag won. `None`
    until a frame has been resolved at least once.
    */
    pub fn last_stack_data(&self) -> Option<StackData> {
        self.last_stack_data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<R: StackFrameResolver> TagProvider for CallerAwareTagger<R> {
    #[inline(never)]
    fn resolve_tag(&self, explicit_tag: Option<&str>) -> Result<String, ResolveError> {
        //consumed before anything else so it never survives into the next statement
        let correction = self.correction.take();
        if let Some(offset) = correction {
            crate::debuginternal!("consumed call stack correction {}", offset);
        }

        let offset = correction.unwrap_or(0);
        let resolved = match self.base_index.checked_add_signed(offset) {
            Some(frame_index) => self.resolver.resolve(frame_index),
            None => Err(ResolveError::OutOfRangeFrame {
                index: (self.base_index as isize).saturating_add(offset),
                depth: None,
            }),
        };
        match &resolved {
            Ok(stack_data) => {
                *self
                    .last_stack_data
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = Some(stack_data.clone());
            }
            Err(err) => {
                crate::debuginternal!("tag resolution failed: {}", err);
            }
        }

        //an explicit tag wins whether or not the frame could be resolved
        if let Some(tag) = explicit_tag.filter(|tag| !tag.is_empty()) {
            return Ok(tag.to_string());
        }
        let stack_data = resolved?;
        Ok(format!("[{}]", stack_data.short_tag()))
    }

    fn set_call_stack_correction(&self, offset: isize) {
        self.correction.set(offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    /// Serves a fixed stack and remembers which indices were requested.
    #[derive(Debug, Default)]
    struct FixedStack {
        depth: usize,
        requested: Mutex<Vec<usize>>,
    }

    impl FixedStack {
        fn with_depth(depth: usize) -> Self {
            Self {
                depth,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<usize> {
            self.requested.lock().unwrap().clone()
        }
    }

    fn frame(index: usize) -> StackData {
        StackData::new(
            format!("app::frame{}", index),
            Some(PathBuf::from(format!("src/frame{}.rs", index))),
            Some(index as u32 * 10),
            None,
        )
    }

    impl StackFrameResolver for FixedStack {
        fn resolve(&self, frame_index: usize) -> Result<StackData, ResolveError> {
            self.requested.lock().unwrap().push(frame_index);
            if frame_index < self.depth {
                Ok(frame(frame_index))
            } else {
                Err(ResolveError::OutOfRangeFrame {
                    index: frame_index as isize,
                    depth: Some(self.depth),
                })
            }
        }
    }

    fn tagger() -> CallerAwareTagger<FixedStack> {
        CallerAwareTagger::new(FixedStack::with_depth(20)).with_base_index(6)
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn correction_is_taken_once() {
        let tagger = tagger();
        tagger.set_call_stack_correction(3);
        assert_eq!(tagger.take_call_stack_correction(), Some(3));
        assert_eq!(tagger.take_call_stack_correction(), None);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn explicit_tag_wins_and_consumes_correction() {
        let tagger = tagger();
        tagger.set_call_stack_correction(2);
        assert_eq!(tagger.resolve_tag(Some("MyTag")).unwrap(), "MyTag");
        assert_eq!(tagger.take_call_stack_correction(), None);
        //the corrected frame is still resolved and remembered
        assert_eq!(tagger.resolver().requested(), vec![8]);
        assert_eq!(tagger.last_stack_data(), Some(frame(8)));
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn explicit_tag_ignores_resolver_state() {
        //an empty stack would fail any resolution
        let tagger = CallerAwareTagger::new(FixedStack::with_depth(0));
        tagger.set_call_stack_correction(100);
        assert_eq!(tagger.resolve_tag(Some("MyTag")).unwrap(), "MyTag");
        assert_eq!(tagger.last_stack_data(), None);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn explicit_tag_keeps_last_frame_on_failed_resolution() {
        let tagger = tagger();
        assert_eq!(tagger.resolve_tag(Some("First")).unwrap(), "First");
        assert_eq!(tagger.last_stack_data(), Some(frame(6)));

        tagger.set_call_stack_correction(-7);
        assert_eq!(tagger.resolve_tag(Some("Second")).unwrap(), "Second");
        tagger.set_call_stack_correction(40);
        assert_eq!(tagger.resolve_tag(Some("Third")).unwrap(), "Third");

        assert_eq!(tagger.resolver().requested(), vec![6, 46]);
        assert_eq!(tagger.last_stack_data(), Some(frame(6)));
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn derived_tag_uses_base_index() {
        let tagger = tagger();
        assert_eq!(tagger.last_stack_data(), None);
        let tag = tagger.resolve_tag(None).unwrap();
        assert_eq!(tag, format!("[{}]", frame(6).short_tag()));
        assert_eq!(tag, "[frame6.rs:60 frame6]");
        assert_eq!(tagger.resolver().requested(), vec![6]);
        assert_eq!(tagger.last_stack_data(), Some(frame(6)));
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn empty_explicit_tag_is_derived() {
        let tagger = tagger();
        assert_eq!(tagger.resolve_tag(Some("")).unwrap(), "[frame6.rs:60 frame6]");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn correction_shifts_frame_once() {
        let tagger = tagger();
        tagger.set_call_stack_correction(2);
        assert_eq!(tagger.resolve_tag(None).unwrap(), "[frame8.rs:80 frame8]");
        assert_eq!(tagger.take_call_stack_correction(), None);
        assert_eq!(tagger.resolve_tag(None).unwrap(), "[frame6.rs:60 frame6]");
        assert_eq!(tagger.resolver().requested(), vec![8, 6]);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn negative_correction() {
        let tagger = tagger();
        tagger.set_call_stack_correction(-2);
        assert_eq!(tagger.resolve_tag(None).unwrap(), "[frame4.rs:40 frame4]");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn out_of_range_propagates() {
        let tagger = tagger();
        tagger.resolve_tag(None).unwrap();
        let remembered = tagger.last_stack_data();

        tagger.set_call_stack_correction(50);
        let err = tagger.resolve_tag(None).unwrap_err();
        assert_eq!(
            err,
            ResolveError::OutOfRangeFrame {
                index: 56,
                depth: Some(20),
            }
        );
        //the correction is gone even though resolution failed
        assert_eq!(tagger.take_call_stack_correction(), None);
        assert_eq!(tagger.last_stack_data(), remembered);
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn negative_index_never_reaches_resolver() {
        let tagger = tagger();
        tagger.set_call_stack_correction(-7);
        let err = tagger.resolve_tag(None).unwrap_err();
        assert_eq!(
            err,
            ResolveError::OutOfRangeFrame {
                index: -1,
                depth: None,
            }
        );
        assert!(tagger.resolver().requested().is_empty());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn corrections_do_not_cross_threads() {
        use std::thread;

        let tagger = Arc::new(tagger());
        tagger.set_call_stack_correction(2);

        let other = tagger.clone();
        let tag = thread::spawn(move || {
            let tag = other.resolve_tag(None).unwrap();
            (tag, other.take_call_stack_correction())
        })
        .join()
        .expect("thread should complete");
        assert_eq!(tag, ("[frame6.rs:60 frame6]".to_string(), None));

        assert_eq!(tagger.resolve_tag(None).unwrap(), "[frame8.rs:80 frame8]");
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn usable_as_trait_object() {
        let provider: Arc<dyn TagProvider> = Arc::new(tagger());
        provider.set_call_stack_correction(1);
        assert_eq!(provider.resolve_tag(None).unwrap(), "[frame7.rs:70 frame7]");
    }
}
