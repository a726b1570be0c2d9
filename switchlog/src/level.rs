// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Error;
use core::fmt;
use core::str::FromStr;

/// Severity of a log message, also used as the filtering threshold of a
/// `Logger`.
///
/// Levels are ordered from least to most verbose. A message at level `L` is
/// emitted under threshold `T` when `L <= T`, which means a threshold of
/// `Off` suppresses everything, including `Critical`.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Off = 0,
    Critical = 1,
    Error = 2,
    #[default]
    Warning = 3,
    Info = 4,
    Trace = 5,
    Debug = 6,
}

impl LogLevel {
    /// All levels, from least to most verbose.
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Off,
        LogLevel::Critical,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Trace,
        LogLevel::Debug,
    ];

    /// The ordinal of this level.
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Recover a level from its ordinal.
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(LogLevel::Off),
            1 => Some(LogLevel::Critical),
            2 => Some(LogLevel::Error),
            3 => Some(LogLevel::Warning),
            4 => Some(LogLevel::Info),
            5 => Some(LogLevel::Trace),
            6 => Some(LogLevel::Debug),
            _ => None,
        }
    }

    pub const fn less_or_equal(self, other: LogLevel) -> bool {
        self.value() <= other.value()
    }

    /// Returns true if a message at this level passes the given threshold.
    /// `Off` is not a message level and is never enabled.
    pub const fn enabled_under(self, threshold: LogLevel) -> bool {
        !matches!(self, LogLevel::Off) && self.less_or_equal(threshold)
    }

    /// The canonical name, which round-trips through `FromStr`.
    pub const fn name(self) -> &'static str {
        match self {
            LogLevel::Off => "LOG_OFF",
            LogLevel::Critical => "LOG_CRIT",
            LogLevel::Error => "LOG_ERR",
            LogLevel::Warning => "LOG_WARNING",
            LogLevel::Info => "LOG_INFO",
            LogLevel::Trace => "LOG_TRACE",
            LogLevel::Debug => "LOG_DEBUG",
        }
    }

    /// Short label used when formatting records.
    pub const fn label(self) -> &'static str {
        match self {
            LogLevel::Off => "OFF",
            LogLevel::Critical => "CRIT",
            LogLevel::Error => "ERR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let name = lower.strip_prefix("log_").unwrap_or(&lower);

        match name {
            "off" => Ok(LogLevel::Off),
            "crit" | "critical" => Ok(LogLevel::Critical),
            "err" | "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}

// `log` orders trace as more verbose than debug, the reverse of our scale, so
// the two are swapped to keep the ordering intact.
impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug => LogLevel::Trace,
            log::Level::Trace => LogLevel::Debug,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LogLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LogLevel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
