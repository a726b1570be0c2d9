// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;
use clocksource::precise::UnixInstant;
use core::fmt::Arguments;
use core::sync::atomic::{AtomicU8, Ordering};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

#[cfg(feature = "metrics")]
use crate::metrics::*;

/// A logger which appends formatted records to a file and rotates it by size.
///
/// Writes and rotations are serialized by a single lock around the file, so
/// concurrent records never interleave and a rotation never splits a record.
/// Records are formatted before the lock is taken.
pub struct FileLogger {
    level: AtomicU8,
    tag: String,
    format: FormatFunction,
    output: Mutex<Option<LogFile>>,
}

impl FileLogger {
    /// Open the log file and return a logger ready for use.
    pub fn new(
        path: &Path,
        level: LogLevel,
        policy: RotationPolicy,
        tag: &str,
        format: FormatFunction,
    ) -> Result<Self, Error> {
        let file = LogFile::open(path, policy)?;

        metrics! {
            LOG_CREATE.increment();
            LOG_CURR.increment();
        }

        Ok(Self {
            level: AtomicU8::new(level.value()),
            tag: tag.to_string(),
            format,
            output: Mutex::new(Some(file)),
        })
    }

    /// The path of the active log file, or `None` once destroyed.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.output.lock().as_ref().map(|file| file.path().to_path_buf())
    }

    /// The rotation policy currently in effect, or `None` once destroyed.
    pub fn rotation_policy(&self) -> Option<RotationPolicy> {
        self.output.lock().as_ref().map(|file| file.policy())
    }
}

impl Logger for FileLogger {
    fn log_type(&self) -> &'static str {
        Backend::File.as_str()
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::from_value(self.level.load(Ordering::Relaxed)).unwrap_or(LogLevel::Off)
    }

    fn set_log_level(&self, level: LogLevel) {
        self.level.store(level.value(), Ordering::Relaxed);
    }

    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        if !self.enabled(level) {
            metrics! { LOG_SKIP.increment(); }
            return;
        }

        let record = Record::new(level, &self.tag, args);
        let mut buffer: Vec<u8> = Vec::with_capacity(128);
        if (self.format)(&mut buffer, UnixInstant::now(), &record).is_err() {
            metrics! { LOG_WRITE_EX.increment(); }
            return;
        }

        if let Some(file) = self.output.lock().as_mut() {
            if file.write_record(&buffer).is_err() {
                metrics! { LOG_WRITE_EX.increment(); }
            }
        }
    }

    fn set_log_file(&self, path: &Path) -> Result<(), Error> {
        let mut output = self.output.lock();
        let Some(current) = output.as_mut() else {
            return Ok(());
        };

        let file = LogFile::open(path, current.policy())?;
        *current = file;

        Ok(())
    }

    fn set_max_log_size(&self, bytes: u64) {
        if let Some(file) = self.output.lock().as_mut() {
            file.policy_mut().set_max_size(bytes);
        }
    }

    fn set_log_file_count(&self, count: usize) {
        if let Some(file) = self.output.lock().as_mut() {
            file.policy_mut().set_max_files(count);
        }
    }

    fn log_rotate(&self) -> Result<(), Error> {
        match self.output.lock().as_mut() {
            Some(file) => file.force_rotate(),
            None => Ok(()),
        }
    }

    fn destroy(&self) -> Result<(), Error> {
        let Some(mut file) = self.output.lock().take() else {
            return Ok(());
        };

        metrics! {
            LOG_DESTROY.increment();
            LOG_CURR.decrement();
        }

        // dropping `file` closes the handle whether or not the sync succeeds
        match file.sync() {
            Ok(()) => {
                metrics! { LOG_FLUSH.increment(); }
                Ok(())
            }
            Err(e) => {
                metrics! { LOG_FLUSH_EX.increment(); }
                Err(Error::Io(e))
            }
        }
    }
}

#[cfg(feature = "metrics")]
impl Drop for FileLogger {
    fn drop(&mut self) {
        if self.output.get_mut().take().is_some() {
            LOG_CURR.decrement();
        }
    }
}
