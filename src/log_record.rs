// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record type for the calltag facade.
//!
//! A [`LogRecord`] is what the facade hands to every [`Logger`](crate::Logger): the level,
//! the tag (explicit, or derived by the [`TagProvider`](crate::TagProvider)) and the message.
//! Records are built once per log statement and passed by value, so loggers never share a
//! buffer.
//!
//! # Example
//!
//! ```rust
//! use calltag::{Level, LogRecord};
//!
//! let record = LogRecord::new(Level::Info, "Net", "connected");
//! assert_eq!(record.to_string(), "[Net]: connected");
//! ```

use crate::Level;
use crate::format::format_line;
use std::fmt::{Debug, Display};

/**
A log record.

The [Display] form is the formatted line, `[tag]: message`.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    level: Level,
    tag: String,
    message: String,
}

impl LogRecord {
    pub fn new(level: Level, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            tag: tag.into(),
            message: message.into(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The formatted line for this record.
    pub fn line(&self) -> String {
        format_line(&self.tag, Some(&self.message))
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.line())
    }
}
/*
Boilerplate notes for LogRecord:

IMPLEMENTED:
- Debug: Derived - essential for diagnostics
- Clone: Derived - the facade clones the record once per logger
- PartialEq/Eq: Derived - tests compare captured records
- Hash: Derived - consistent with Eq
- Display: Implemented - the formatted line

NOT IMPLEMENTED:
- Default: there is no sensible default tag
- Copy: owns heap data
- Ord/PartialOrd: No meaningful ordering for log records
*/
