// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! This crate provides interchangeable, synchronous logging backends behind a
//! single `Logger` trait.
//!
//! A host process picks a backend once, at startup, by name using `create`
//! and a `LogConfig`. The resulting `Arc<dyn Logger>` is handed to every
//! subsystem that needs to log. Call sites never check which backend is in
//! use: the `silent` backend satisfies the whole contract by doing nothing,
//! so disabling logging is a configuration choice rather than a branch.
//!
//! The available backends are:
//! * `file` - appends to a file which is rotated once it exceeds a size
//!   limit, keeping a bounded number of rotated files
//! * `syslog` - submits to the local syslog daemon (unix only)
//! * `silent` - discards everything
//!
//! Every operation is safe to call from many threads at once. Emission never
//! returns an error; the configuration and lifecycle operations do.
//!
//! ```
//! use switchlog::{create, log_info, LogConfig, LogLevel, Logger};
//! use std::sync::Arc;
//!
//! struct Worker {
//!     logger: Arc<dyn Logger>,
//! }
//!
//! let logger = create("silent", &LogConfig::new().level(LogLevel::Info)).unwrap();
//! let worker = Worker { logger: logger.clone() };
//! log_info!(worker.logger, "worker {} started", 1);
//!
//! logger.log_rotate().unwrap();
//! logger.destroy().unwrap();
//! ```

#[macro_use]
mod macros;

mod bridge;
mod error;
mod factory;
mod file;
mod format;
mod level;
mod rotation;
mod silent;
#[cfg(unix)]
mod syslog;
mod traits;

pub use bridge::*;
pub use error::*;
pub use factory::*;
pub use file::*;
pub use format::*;
pub use level::*;
pub use rotation::*;
pub use silent::*;
#[cfg(unix)]
pub use syslog::*;
pub use traits::*;

#[cfg(feature = "metrics")]
mod metrics;
