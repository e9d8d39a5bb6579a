//! Logging macros for ergonomic log message formatting.
//!
//! These macros format their arguments like `format!` and forward to the
//! matching [`Logger`](crate::Logger) method. Because they expand at the call
//! site, error records still point at the line that invoked the macro.
//! Arguments of a DEBUG, INFO or WARN call below the logger's level are
//! never formatted.
//!
//! # Examples
//!
//! ```
//! use stackdriver_logger::prelude::*;
//! use stackdriver_logger::info;
//!
//! let logger = Logger::builder().output(BufferSink::new()).build();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit severity.
///
/// ```
/// # use stackdriver_logger::prelude::*;
/// # let logger = Logger::builder().output(BufferSink::new()).build();
/// use stackdriver_logger::log;
/// log!(logger, Severity::Info, "Simple message");
/// log!(logger, Severity::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level: $crate::Severity = $level;
        if level.is_error_tier() || logger.is_enabled(level) {
            logger.log(level, format!($($arg)+));
        }
    }};
}

/// Log a debug-level message.
///
/// ```
/// # use stackdriver_logger::prelude::*;
/// # let logger = Logger::builder().output(BufferSink::new()).build();
/// use stackdriver_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.is_enabled($crate::Severity::Debug) {
            logger.debug(format!($($arg)+));
        }
    }};
}

/// Log an info-level message.
///
/// ```
/// # use stackdriver_logger::prelude::*;
/// # let logger = Logger::builder().output(BufferSink::new()).build();
/// use stackdriver_logger::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.is_enabled($crate::Severity::Info) {
            logger.info(format!($($arg)+));
        }
    }};
}

/// Log a warning-level message.
///
/// ```
/// # use stackdriver_logger::prelude::*;
/// # let logger = Logger::builder().output(BufferSink::new()).build();
/// use stackdriver_logger::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        if logger.is_enabled($crate::Severity::Warn) {
            logger.warn(format!($($arg)+));
        }
    }};
}

/// Log an error-level message with report location and stack trace.
///
/// ```
/// # use stackdriver_logger::prelude::*;
/// # let logger = Logger::builder().output(BufferSink::new()).build();
/// use stackdriver_logger::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(format!($($arg)+))
    };
}

/// Log a critical-level message, then terminate the process.
///
/// ```no_run
/// # use stackdriver_logger::prelude::*;
/// # let logger = Logger::new();
/// use stackdriver_logger::critical;
/// critical!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $logger.critical(format!($($arg)+))
    };
}

/// Build a [`Fields`](crate::Fields) value from `key => value` pairs.
///
/// ```
/// use stackdriver_logger::fields;
///
/// let fields = fields! { "user_id" => 42, "action" => "login" };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(fields.insert($key, $value);)+
        fields
    }};
}
