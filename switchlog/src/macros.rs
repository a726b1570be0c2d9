/// Logs a critical message through the given logger. The message arguments
/// are only formatted if the level is enabled.
#[macro_export]
macro_rules! log_crit {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__emit!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_err {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__emit!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__emit!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__emit!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__emit!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__emit!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __emit {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(level, format_args!($($arg)+));
        }
    }};
}

#[cfg(feature = "metrics")]
macro_rules! metrics {
    { $( $tt:tt )* } => { $( $tt )* }
}

#[cfg(not(feature = "metrics"))]
macro_rules! metrics {
    { $( $tt:tt)* } => {}
}
