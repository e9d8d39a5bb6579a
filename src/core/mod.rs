//! Core logger types

pub mod config;
pub mod error;
pub mod fields;
pub mod location;
pub mod logger;
pub mod metrics;
pub mod payload;
pub mod severity;

pub use config::{configure, Config};
pub use error::{LoggerError, Result};
pub use fields::Fields;
pub use location::{DEFAULT_STACK_BUFFER_SIZE, UNKNOWN_FUNCTION};
pub use logger::{ExitHandler, Logger, LoggerBuilder, CRITICAL_EXIT_CODE, DEFAULT_CALLER_SKIP};
pub use metrics::LoggerMetrics;
pub use payload::{Context, Payload, ReportLocation, ServiceContext};
pub use severity::Severity;
