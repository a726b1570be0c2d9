// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Logger that submits records to the local syslog daemon through the POSIX
//! `openlog`/`syslog`/`closelog` API.
//!
//! POSIX allows one syslog connection per process, so `openlog` settings are
//! process-wide. Loggers share that connection: the most recently opened
//! logger's ident is in effect, and the connection is closed when the last
//! logger is destroyed or dropped.

use crate::*;
use clocksource::precise::UnixInstant;
use core::fmt::Arguments;
use core::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use libc::c_int;
use parking_lot::{const_mutex, Mutex};
use std::ffi::{CStr, CString};
use std::path::Path;

#[cfg(feature = "metrics")]
use crate::metrics::*;

const FACILITY: c_int = libc::LOG_USER;

// Idents of open loggers, oldest first. `openlog` keeps a pointer to the
// ident, so an entry must stay here until another ident replaces it.
static IDENTS: Mutex<Vec<(u64, CString)>> = const_mutex(Vec::new());

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

struct Connection {
    id: u64,
    buffer: Vec<u8>,
}

fn connect(ident: CString) -> u64 {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let mut idents = IDENTS.lock();
    unsafe {
        libc::openlog(ident.as_ptr(), libc::LOG_PID, FACILITY);
    }
    idents.push((id, ident));
    id
}

fn disconnect(id: u64) {
    let mut idents = IDENTS.lock();
    let Some(position) = idents.iter().position(|(other, _)| *other == id) else {
        return;
    };
    let (_, ident) = idents.remove(position);

    match idents.last() {
        None => unsafe { libc::closelog() },
        // the departing ident was in use, switch to the newest remaining one
        Some((_, newest)) if position == idents.len() => unsafe {
            libc::openlog(newest.as_ptr(), libc::LOG_PID, FACILITY);
        },
        Some(_) => {}
    }

    drop(ident);
}

/// A logger backed by the system log.
///
/// Records are formatted without a timestamp, since syslog adds its own. File
/// and rotation settings do not apply and are ignored.
///
/// All instances in a process share one syslog connection. Destroying one
/// leaves the others connected, though records from every live instance are
/// sent with the ident of the newest live one.
pub struct SyslogLogger {
    level: AtomicU8,
    tag: String,
    format: FormatFunction,
    connection: Mutex<Option<Connection>>,
}

impl SyslogLogger {
    /// Open the syslog connection using `tag` as the ident.
    pub fn new(level: LogLevel, tag: &str, format: FormatFunction) -> Self {
        let ident = CString::new(strip_nul(tag.as_bytes())).unwrap_or_default();
        let id = connect(ident);

        metrics! {
            LOG_CREATE.increment();
            LOG_CURR.increment();
        }

        Self {
            level: AtomicU8::new(level.value()),
            tag: tag.to_string(),
            format,
            connection: Mutex::new(Some(Connection {
                id,
                buffer: Vec::with_capacity(256),
            })),
        }
    }

    fn close(connection: &mut Option<Connection>) -> bool {
        if let Some(connection) = connection.take() {
            disconnect(connection.id);
            metrics! { LOG_CURR.decrement(); }
            true
        } else {
            false
        }
    }
}

impl Logger for SyslogLogger {
    fn log_type(&self) -> &'static str {
        Backend::Syslog.as_str()
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::from_value(self.level.load(Ordering::Relaxed)).unwrap_or(LogLevel::Off)
    }

    fn set_log_level(&self, level: LogLevel) {
        self.level.store(level.value(), Ordering::Relaxed);
    }

    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        let Some(priority) = priority(level).filter(|_| self.enabled(level)) else {
            metrics! { LOG_SKIP.increment(); }
            return;
        };

        let record = Record::new(level, &self.tag, args);

        let mut connection = self.connection.lock();
        let Some(connection) = connection.as_mut() else {
            return;
        };

        let buffer = &mut connection.buffer;
        buffer.clear();
        if (self.format)(&mut *buffer, UnixInstant::now(), &record).is_err() {
            metrics! { LOG_WRITE_EX.increment(); }
            return;
        }
        for byte in buffer.iter_mut().filter(|b| **b == 0) {
            *byte = b'?';
        }
        buffer.push(0);

        let Ok(message) = CStr::from_bytes_with_nul(&buffer[..]) else {
            metrics! { LOG_WRITE_EX.increment(); }
            return;
        };

        unsafe {
            libc::syslog(
                priority | FACILITY,
                b"%s\0".as_ptr() as *const libc::c_char,
                message.as_ptr(),
            );
        }

        metrics! {
            LOG_WRITE.increment();
            LOG_WRITE_BYTE.add(message.to_bytes().len() as _);
        }
    }

    fn set_log_file(&self, _path: &Path) -> Result<(), Error> {
        Ok(())
    }

    fn set_max_log_size(&self, _bytes: u64) {}

    fn set_log_file_count(&self, _count: usize) {}

    fn log_rotate(&self) -> Result<(), Error> {
        Ok(())
    }

    fn destroy(&self) -> Result<(), Error> {
        if Self::close(&mut self.connection.lock()) {
            metrics! { LOG_DESTROY.increment(); }
        }
        Ok(())
    }
}

impl Drop for SyslogLogger {
    fn drop(&mut self) {
        Self::close(self.connection.get_mut());
    }
}

fn priority(level: LogLevel) -> Option<c_int> {
    match level {
        LogLevel::Off => None,
        LogLevel::Critical => Some(libc::LOG_CRIT),
        LogLevel::Error => Some(libc::LOG_ERR),
        LogLevel::Warning => Some(libc::LOG_WARNING),
        LogLevel::Info => Some(libc::LOG_INFO),
        LogLevel::Trace | LogLevel::Debug => Some(libc::LOG_DEBUG),
    }
}

fn strip_nul(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().filter(|b| *b != 0).collect()
}

#[cfg(test)]
mod tests {
    use super::{priority, IDENTS};
    use crate::*;

    fn connection_id(logger: &SyslogLogger) -> Option<u64> {
        logger.connection.lock().as_ref().map(|c| c.id)
    }

    fn connected(id: u64) -> bool {
        IDENTS.lock().iter().any(|(other, _)| *other == id)
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyslogLogger>();
    }

    #[test]
    fn priorities() {
        assert_eq!(priority(LogLevel::Off), None);
        assert_eq!(priority(LogLevel::Critical), Some(libc::LOG_CRIT));
        assert_eq!(priority(LogLevel::Warning), Some(libc::LOG_WARNING));
        assert_eq!(priority(LogLevel::Trace), priority(LogLevel::Debug));
    }

    #[test]
    fn lifecycle() {
        let logger = SyslogLogger::new(LogLevel::Critical, "switchlog-test", message_format);
        assert_eq!(logger.log_type(), "syslog");
        assert_eq!(logger.log_level(), LogLevel::Critical);

        logger.set_log_level(LogLevel::Off);
        assert!(!logger.enabled(LogLevel::Critical));
        logger.crit(format_args!("not sent"));

        // file settings are accepted and ignored
        assert!(logger.set_log_file(std::path::Path::new("/nonexistent/x.log")).is_ok());
        logger.set_max_log_size(1);
        logger.set_log_file_count(1);
        assert!(logger.log_rotate().is_ok());

        assert!(logger.destroy().is_ok());
        logger.crit(format_args!("after destroy"));
        assert!(logger.destroy().is_ok());
    }

    #[test]
    fn shared_connection() {
        let old = SyslogLogger::new(LogLevel::Info, "switchlog-old", message_format);
        let new = SyslogLogger::new(LogLevel::Info, "switchlog-new", message_format);
        let old_id = connection_id(&old).unwrap();
        let new_id = connection_id(&new).unwrap();
        assert_ne!(old_id, new_id);

        // handing over from the old logger leaves the new one connected
        old.destroy().unwrap();
        assert!(!connected(old_id));
        assert!(connected(new_id));
        new.info(format_args!("still connected"));

        drop(new);
        assert!(!connected(new_id));
    }
}
