//! # Stackdriver Logger
//!
//! Leveled logger that writes one JSON object per line in the cloud
//! error-reporting format: severity, RFC 3339 event time, message, service
//! context, contextual data, and for ERROR/CRITICAL a report location and
//! stack trace.
//!
//! ## Features
//!
//! - **Immutable derivation**: `with_fields`, `with_output`, `with_level`
//!   return new loggers; the receiver never changes
//! - **Severity gating**: DEBUG/INFO/WARN below the threshold cost a single
//!   lock read; ERROR/CRITICAL are always written
//! - **Error reporting**: call site and stack trace captured automatically
//! - **Thread Safe**: records from concurrent threads never interleave
//!
//! ```
//! use stackdriver_logger::prelude::*;
//!
//! let buffer = BufferSink::new();
//! let logger = Logger::builder()
//!     .config(Config::new(Severity::Debug, "svc", "1.0"))
//!     .output(buffer.clone())
//!     .build();
//!
//! logger.with_fields([("key", "value")]).info("hello");
//! assert!(buffer.contents().starts_with("{\"severity\":\"INFO\""));
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Config, ExitHandler, Fields, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Result,
        ServiceContext, Severity,
    };
    pub use crate::sinks::{BufferSink, Sink};
}

pub use crate::core::{
    configure, Config, Context, ExitHandler, Fields, Logger, LoggerBuilder, LoggerError,
    LoggerMetrics, Payload, ReportLocation, Result, ServiceContext, Severity, CRITICAL_EXIT_CODE,
    DEFAULT_CALLER_SKIP, DEFAULT_STACK_BUFFER_SIZE, UNKNOWN_FUNCTION,
};
pub use sinks::{BufferSink, Sink};
