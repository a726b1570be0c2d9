// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;
use log::{LevelFilter, Metadata, SetLoggerError};
use std::sync::Arc;

/// Forwards records from the `log` crate macros to a `Logger`.
///
/// Subsystems should be handed their `Logger` directly. This adapter exists so
/// that dependencies which log through the `log` facade end up in the same
/// backend.
pub struct LogBridge {
    logger: Arc<dyn Logger>,
}

impl LogBridge {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    /// Register as the `log` crate's global logger. Filtering is left to the
    /// wrapped logger, so its threshold can keep changing afterwards.
    pub fn start(self) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(self)).map(|()| log::set_max_level(LevelFilter::Trace))
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.logger.enabled(LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let level = LogLevel::from(record.level());
        if self.logger.enabled(level) {
            self.logger.log(level, *record.args());
        }
    }

    fn flush(&self) {}
}
