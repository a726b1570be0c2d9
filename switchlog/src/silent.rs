// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;
use core::fmt::Arguments;
use std::path::Path;

/// Implements a no-op logger which drops all log messages.
///
/// The level is fixed at `Off` and every setter is discarded, so selecting
/// this backend disables logging without changing any call site.
#[derive(Copy, Clone, Debug, Default)]
pub struct SilentLogger {}

impl SilentLogger {
    /// Create a new silent logger.
    pub fn new() -> Self {
        Default::default()
    }
}

impl Logger for SilentLogger {
    fn log_type(&self) -> &'static str {
        Backend::Silent.as_str()
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Off
    }

    fn set_log_level(&self, _level: LogLevel) {}

    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}

    #[inline]
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }

    #[inline]
    fn debug(&self, _args: Arguments<'_>) {}

    #[inline]
    fn trace(&self, _args: Arguments<'_>) {}

    #[inline]
    fn info(&self, _args: Arguments<'_>) {}

    #[inline]
    fn warn(&self, _args: Arguments<'_>) {}

    #[inline]
    fn err(&self, _args: Arguments<'_>) {}

    #[inline]
    fn crit(&self, _args: Arguments<'_>) {}

    fn set_log_file(&self, _path: &Path) -> Result<(), Error> {
        Ok(())
    }

    fn set_max_log_size(&self, _bytes: u64) {}

    fn set_log_file_count(&self, _count: usize) {}

    fn log_rotate(&self) -> Result<(), Error> {
        Ok(())
    }

    fn destroy(&self) -> Result<(), Error> {
        Ok(())
    }
}
