// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::log_record::LogRecord;
use std::fmt::Debug;

pub trait Logger: Debug + Send + Sync {
    /**
        Submits the log record for output.
    */
    fn finish_log_record(&self, record: LogRecord);

    /**
    The application may imminently exit.  Ensure all buffers are flushed and up to date.
    */
    fn prepare_to_die(&self);
}

/*
Boilerplate notes.

# Logger

Clone doesn't make sense for a sink that may own a file handle or console.
PartialEq and Eq: data equality or provenance? Unclear, so no.
Default is not necessarily sensible since who knows how the logger is constructed.
Send/Sync are required because the facade is called from any thread.
*/
