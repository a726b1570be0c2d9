// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;
use core::fmt::Arguments;
use std::path::Path;

/// The contract shared by every logging backend.
///
/// Callers hold a single `Arc<dyn Logger>` and never branch on the concrete
/// backend. All operations take `&self` and are safe to call concurrently
/// from any number of threads; backends synchronize internally.
///
/// Operations which have no meaning for a backend (for example, setting a log
/// file on the syslog backend) are accepted and ignored rather than rejected,
/// so the configuration surface is uniform.
///
/// Emission never fails. I/O errors encountered while writing a message are
/// swallowed by the backend.
pub trait Logger: Send + Sync {
    /// A stable identifier for the backend, such as `"file"` or `"silent"`.
    fn log_type(&self) -> &'static str;

    /// The current filtering threshold.
    fn log_level(&self) -> LogLevel;

    /// Change the filtering threshold. Applies to all subsequent emissions.
    fn set_log_level(&self, level: LogLevel);

    /// Emit a message at the given level if that level is enabled. This is
    /// the method each backend implements; the level-specific methods below
    /// delegate to it.
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    /// Returns true if a message at this level would be emitted.
    fn enabled(&self, level: LogLevel) -> bool {
        level.enabled_under(self.log_level())
    }

    fn debug(&self, args: Arguments<'_>) {
        self.log(LogLevel::Debug, args)
    }

    fn trace(&self, args: Arguments<'_>) {
        self.log(LogLevel::Trace, args)
    }

    fn info(&self, args: Arguments<'_>) {
        self.log(LogLevel::Info, args)
    }

    fn warn(&self, args: Arguments<'_>) {
        self.log(LogLevel::Warning, args)
    }

    fn err(&self, args: Arguments<'_>) {
        self.log(LogLevel::Error, args)
    }

    fn crit(&self, args: Arguments<'_>) {
        self.log(LogLevel::Critical, args)
    }

    /// Retarget file output. The new file is opened before the old one is
    /// released, so a failure leaves the current target in place.
    fn set_log_file(&self, path: &Path) -> Result<(), Error>;

    /// Set the size, in bytes, at which the active file is rotated. Zero
    /// selects the backend default.
    fn set_max_log_size(&self, bytes: u64);

    /// Set how many rotated files are retained. Zero selects the backend
    /// default.
    fn set_log_file_count(&self, count: usize);

    /// Rotate the active output now. Calling this when there is nothing to
    /// rotate is a no-op.
    fn log_rotate(&self) -> Result<(), Error>;

    /// Flush and release backend resources. The host calls this once, at
    /// shutdown, after which the logger should no longer be used.
    fn destroy(&self) -> Result<(), Error>;
}
