// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snapshot of a single stack frame.

use std::fmt::Display;
use std::path::{Path, PathBuf};

const UNKNOWN: &str = "<unknown>";

/**
Identifying information for one stack frame.

A [StackData] is produced fresh by a [crate::StackFrameResolver] on every tag resolution.
It never changes after construction.

```rust
use calltag::StackData;

let data = StackData::new("app::net::connect", Some("src/net.rs".into()), Some(42), Some(9));
assert_eq!(data.short_tag(), "net.rs:42 connect");
```
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StackData {
    function: String,
    file: Option<PathBuf>,
    line: Option<u32>,
    column: Option<u32>,
}

impl StackData {
    pub fn new(
        function: impl Into<String>,
        file: Option<PathBuf>,
        line: Option<u32>,
        column: Option<u32>,
    ) -> Self {
        Self {
            function: function.into(),
            file,
            line,
            column,
        }
    }

    /// The fully qualified function name, without a trailing symbol hash.
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    pub fn column(&self) -> Option<u32> {
        self.column
    }

    /**
    The final path segment of the function name.

    Closure segments (`{{closure}}`) are skipped, so a log statement inside a closure
    is attributed to the enclosing function.
    */
    pub fn function_name(&self) -> &str {
        self.function
            .rsplit("::")
            .find(|segment| !segment.is_empty() && !segment.starts_with("{{"))
            .unwrap_or(UNKNOWN)
    }

    /// The file name component of [Self::file].
    pub fn file_name(&self) -> Option<&str> {
        self.file.as_deref()?.file_name()?.to_str()
    }

    /**
    The short tag for this frame: `<file name>:<line> <function name>`.

    Missing pieces are replaced with `<unknown>`.
    */
    pub fn short_tag(&self) -> String {
        let file = self.file_name().unwrap_or(UNKNOWN);
        match self.line {
            Some(line) => format!("{}:{} {}", file, line, self.function_name()),
            None => format!("{}:{} {}", file, UNKNOWN, self.function_name()),
        }
    }
}

impl Display for StackData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.function)?;
        if let Some(file) = &self.file {
            write!(f, " at {}", file.display())?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
                if let Some(column) = self.column {
                    write!(f, ":{}", column)?;
                }
            }
        }
        Ok(())
    }
}

/*
Boilerplate notes for StackData:

- Clone/PartialEq/Eq/Hash: derived, it is plain data.
- Default: no, a frame without a function name is not meaningful.
- Display: the long form (`function at file:line:column`); short_tag is the compact form.
- Ord: no meaningful ordering between frames of different stacks.
*/
