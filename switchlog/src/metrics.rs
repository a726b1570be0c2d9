use metriken::{metric, Counter, Gauge};

#[metric(name = "log_create", description = "loggers created by the factory")]
pub static LOG_CREATE: Counter = Counter::new();

#[metric(
    name = "log_create_ex",
    description = "number of exceptions while creating loggers"
)]
pub static LOG_CREATE_EX: Counter = Counter::new();

#[metric(name = "log_destroy", description = "loggers destroyed")]
pub static LOG_DESTROY: Counter = Counter::new();

#[metric(name = "log_curr", description = "current number of live loggers")]
pub static LOG_CURR: Gauge = Gauge::new();

#[metric(name = "log_open", description = "number of log files which have been opened")]
pub static LOG_OPEN: Counter = Counter::new();

#[metric(
    name = "log_open_ex",
    description = "number of exceptions while opening log files"
)]
pub static LOG_OPEN_EX: Counter = Counter::new();

#[metric(
    name = "log_write",
    description = "number of records written to all logging destinations"
)]
pub static LOG_WRITE: Counter = Counter::new();

#[metric(
    name = "log_write_byte",
    description = "number of bytes written to all logging destinations"
)]
pub static LOG_WRITE_BYTE: Counter = Counter::new();

#[metric(
    name = "log_write_ex",
    description = "number of records lost to exceptions while writing"
)]
pub static LOG_WRITE_EX: Counter = Counter::new();

#[metric(
    name = "log_skip",
    description = "number of log messages skipped by the level filter"
)]
pub static LOG_SKIP: Counter = Counter::new();

#[metric(name = "log_rotate", description = "number of completed log rotations")]
pub static LOG_ROTATE: Counter = Counter::new();

#[metric(
    name = "log_rotate_ex",
    description = "number of exceptions while rotating log files"
)]
pub static LOG_ROTATE_EX: Counter = Counter::new();

#[metric(
    name = "log_flush",
    description = "number of times logging destinations have been flushed"
)]
pub static LOG_FLUSH: Counter = Counter::new();

#[metric(
    name = "log_flush_ex",
    description = "number of exceptions while flushing logging destinations"
)]
pub static LOG_FLUSH_EX: Counter = Counter::new();
