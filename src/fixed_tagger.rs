// SPDX-License-Identifier: MIT OR Apache-2.0

//! A tag provider that never looks at the call stack.

use crate::resolver::ResolveError;
use crate::tagger::TagProvider;

/**
Tags each statement with its explicit tag, or with a fixed tag when it has none.

This is the default provider on wasm32, where the stack cannot be walked. It also suits
programs that are stripped of symbols. Call stack corrections are ignored.

```rust
use calltag::{FixedTagger, TagProvider};

let tagger = FixedTagger::new("[app]");
assert_eq!(tagger.resolve_tag(None).unwrap(), "[app]");
assert_eq!(tagger.resolve_tag(Some("Net")).unwrap(), "Net");
```
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixedTagger {
    tag: String,
}

impl FixedTagger {
    /// The tag used by [FixedTagger::default].
    pub const DEFAULT_TAG: &'static str = "[untagged]";

    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Default for FixedTagger {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TAG)
    }
}

impl TagProvider for FixedTagger {
    fn resolve_tag(&self, explicit_tag: Option<&str>) -> Result<String, ResolveError> {
        let tag = explicit_tag
            .filter(|tag| !tag.is_empty())
            .unwrap_or(&self.tag);
        Ok(tag.to_string())
    }
}
