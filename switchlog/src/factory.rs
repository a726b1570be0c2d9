// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;
use core::str::FromStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[cfg(feature = "metrics")]
use crate::metrics::*;

const DEFAULT_TAG: &str = "switchlog";

/// The logging backends which can be selected by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Appends to a size-rotated file. Also accepted as `"base"`.
    File,
    /// Submits to the local syslog daemon. Selected by an empty name.
    Syslog,
    /// Discards everything.
    Silent,
}

impl Backend {
    /// The identifier reported by `Logger::log_type` for this backend.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Backend::File => "file",
            Backend::Syslog => "syslog",
            Backend::Silent => "silent",
        }
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "base" => Ok(Backend::File),
            "syslog" | "" => Ok(Backend::Syslog),
            "silent" => Ok(Backend::Silent),
            _ => Err(Error::UnknownBackend(s.to_string())),
        }
    }
}

/// Settings applied by `create` before the logger is handed out.
///
/// ```
/// use switchlog::{LogConfig, LogLevel};
///
/// let config = LogConfig::new()
///     .level(LogLevel::Info)
///     .file_path("/var/log/myapp/myapp.log")
///     .max_log_size(64 * 1024 * 1024)
///     .log_file_count(5)
///     .tag("myapp");
/// ```
#[derive(Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LogConfig {
    level: LogLevel,
    file_path: Option<PathBuf>,
    max_log_size: u64,
    log_file_count: usize,
    tag: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    format: Option<FormatFunction>,
}

impl core::fmt::Debug for LogConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LogConfig")
            .field("level", &self.level)
            .field("file_path", &self.file_path)
            .field("max_log_size", &self.max_log_size)
            .field("log_file_count", &self.log_file_count)
            .field("tag", &self.tag)
            .field("custom_format", &self.format.is_some())
            .finish()
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Initial level threshold. The default is `LOG_WARNING`.
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Log file for the file backend. Required for that backend, ignored by
    /// the others.
    pub fn file_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Rotate the log file once it grows past this many bytes. Zero selects
    /// the default of 512 MiB.
    pub fn max_log_size(mut self, bytes: u64) -> Self {
        self.max_log_size = bytes;
        self
    }

    /// Number of rotated files to retain. Zero selects the default of 10.
    pub fn log_file_count(mut self, count: usize) -> Self {
        self.log_file_count = count;
        self
    }

    /// Name written with each record and used as the syslog ident.
    pub fn tag<T: Into<String>>(mut self, tag: T) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Override the record format. File output defaults to `default_format`
    /// and syslog to `message_format`.
    pub fn format(mut self, format: FormatFunction) -> Self {
        self.format = Some(format);
        self
    }

    pub fn get_level(&self) -> LogLevel {
        self.level
    }

    pub fn get_file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn get_tag(&self) -> &str {
        self.tag.as_deref().unwrap_or(DEFAULT_TAG)
    }

    pub fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::new(self.max_log_size, self.log_file_count)
    }
}

/// Construct the backend named by `name` with `config` fully applied.
///
/// Fails with `Error::UnknownBackend` if the name matches no backend, and with
/// `Error::Path` if the file backend has no usable log file.
pub fn create(name: &str, config: &LogConfig) -> Result<Arc<dyn Logger>, Error> {
    let result = name
        .parse::<Backend>()
        .and_then(|backend| create_backend(backend, config));

    if result.is_err() {
        metrics! { LOG_CREATE_EX.increment(); }
    }

    result
}

/// Construct the given backend with `config` fully applied.
pub fn create_backend(backend: Backend, config: &LogConfig) -> Result<Arc<dyn Logger>, Error> {
    match backend {
        Backend::Silent => Ok(Arc::new(SilentLogger::new())),
        Backend::File => {
            let path = config.get_file_path().ok_or_else(|| Error::Path {
                path: PathBuf::new(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "no log file path configured",
                ),
            })?;
            let logger = FileLogger::new(
                path,
                config.get_level(),
                config.rotation_policy(),
                config.get_tag(),
                config.format.unwrap_or(default_format),
            )?;
            Ok(Arc::new(logger))
        }
        #[cfg(unix)]
        Backend::Syslog => Ok(Arc::new(SyslogLogger::new(
            config.get_level(),
            config.get_tag(),
            config.format.unwrap_or(message_format),
        ))),
        #[cfg(not(unix))]
        Backend::Syslog => Err(Error::UnknownBackend(backend.as_str().to_string())),
    }
}
