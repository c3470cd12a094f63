// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::log_record::LogRecord;
use crate::logger::Logger;

/// The level letter, then the formatted line: `W [Net]: retrying`.
fn stderr_line(record: &LogRecord) -> String {
    format!("{} {}", record.level(), record)
}

/**
The default logger: writes each record to stderr, prefixed with its level letter.

On wasm32 the line goes to the browser console, at the console level matching the record.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StdErrorLogger {}

impl StdErrorLogger {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Logger for StdErrorLogger {
    fn finish_log_record(&self, record: LogRecord) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            let mut lock = std::io::stderr().lock();
            //nowhere left to report a failing stderr
            let _ = writeln!(lock, "{}", stderr_line(&record));
        }
        #[cfg(target_arch = "wasm32")]
        {
            use crate::Level;
            let msg = stderr_line(&record);
            match record.level() {
                Level::Verbose | Level::Debug => {
                    web_sys::console::debug_1(&msg.into());
                }
                Level::Info => {
                    web_sys::console::info_1(&msg.into());
                }
                Level::Warn => {
                    web_sys::console::warn_1(&msg.into());
                }
                Level::Error | Level::Assert => {
                    web_sys::console::error_1(&msg.into());
                }
            }
        }
    }

    fn prepare_to_die(&self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            let _ = std::io::stderr().flush();
        }
    }
}
