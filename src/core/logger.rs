//! Main logger implementation
//!
//! A [`Logger`] is a value: every `with_*` call returns a new logger and
//! leaves the receiver untouched, so loggers can be derived per request and
//! shared across threads freely. The one exception is
//! [`Logger::add_caller_skip`], which mutates in place.

use super::{
    config::{self, Config},
    fields::Fields,
    location::{self, Capture, DEFAULT_STACK_BUFFER_SIZE},
    metrics::LoggerMetrics,
    payload::{Context, Payload, ServiceContext},
    severity::Severity,
};
use crate::sinks::Sink;
use parking_lot::RwLock;
use serde_json::Value;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Frames skipped past the call site when resolving the report location.
///
/// Public emission methods are `#[track_caller]`, so the call site is
/// already the user's code.
pub const DEFAULT_CALLER_SKIP: usize = 0;

/// Exit status passed to the exit handler after a CRITICAL record
pub const CRITICAL_EXIT_CODE: i32 = 1;

/// Terminates the process after a CRITICAL record. Receives the exit code.
pub type ExitHandler = Arc<dyn Fn(i32) + Send + Sync>;

static NO_FIELDS: Fields = Fields::new();

#[derive(Debug, Clone)]
struct State {
    level: Severity,
    fields: Fields,
    caller_skip: usize,
}

pub struct Logger {
    state: RwLock<State>,
    service_context: Option<Arc<ServiceContext>>,
    sink: Sink,
    exit_handler: ExitHandler,
    stack_buffer_size: usize,
    metrics: Arc<LoggerMetrics>,
}

fn process_exit() -> ExitHandler {
    Arc::new(|code| std::process::exit(code))
}

impl Logger {
    /// Base logger built from the process-wide configuration, writing to
    /// standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&config::current())
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            state: RwLock::new(State {
                level: config.level,
                fields: Fields::new(),
                caller_skip: DEFAULT_CALLER_SKIP,
            }),
            service_context: config.service_context().map(Arc::new),
            sink: Sink::stdout(),
            exit_handler: process_exit(),
            stack_buffer_size: DEFAULT_STACK_BUFFER_SIZE,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Snapshot the receiver and apply `f` to the copy.
    fn derive(&self, f: impl FnOnce(&mut State)) -> Self {
        let mut state = self.state.read().clone();
        f(&mut state);

        Self {
            state: RwLock::new(state),
            service_context: self.service_context.clone(),
            sink: self.sink.clone(),
            exit_handler: Arc::clone(&self.exit_handler),
            stack_buffer_size: self.stack_buffer_size,
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// New logger whose fields are the receiver's merged with `fields`;
    /// `fields` wins on key collision.
    #[must_use]
    pub fn with_fields(&self, fields: impl Into<Fields>) -> Self {
        let fields = fields.into();
        self.derive(|state| state.fields.merge(&fields))
    }

    /// Single-field shorthand for [`Logger::with_fields`]
    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_fields(Fields::new().with_field(key, value))
    }

    /// New logger writing to `sink`, with the same field snapshot
    #[must_use]
    pub fn with_output(&self, sink: impl Into<Sink>) -> Self {
        let mut logger = self.with_fields(Fields::new());
        logger.sink = sink.into();
        logger
    }

    #[must_use]
    pub fn with_level(&self, level: Severity) -> Self {
        self.derive(|state| state.level = level)
    }

    /// New logger that skips `n` more frames when attributing error records
    #[must_use]
    pub fn with_caller_skip(&self, n: usize) -> Self {
        self.derive(|state| state.caller_skip = state.caller_skip.saturating_add(n))
    }

    /// Increase the caller skip depth of this logger **in place**.
    ///
    /// Unlike every other `with_*` operation this mutates the receiver and
    /// is visible to all holders of it. Emissions racing with this call may
    /// observe either depth. Prefer [`Logger::with_caller_skip`].
    pub fn add_caller_skip(&self, n: usize) {
        let mut state = self.state.write();
        state.caller_skip = state.caller_skip.saturating_add(n);
    }

    /// New logger that calls `handler` instead of exiting after CRITICAL
    #[must_use]
    pub fn with_exit_handler(&self, handler: ExitHandler) -> Self {
        let mut logger = self.derive(|_| {});
        logger.exit_handler = handler;
        logger
    }

    #[inline]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity >= self.state.read().level
    }

    pub fn level(&self) -> Severity {
        self.state.read().level
    }

    /// Copy of the current fields
    pub fn fields(&self) -> Fields {
        self.state.read().fields.clone()
    }

    pub fn caller_skip(&self) -> usize {
        self.state.read().caller_skip
    }

    pub fn service_context(&self) -> Option<&ServiceContext> {
        self.service_context.as_deref()
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Emit `message` at `severity`.
    ///
    /// ERROR and CRITICAL are never filtered, and CRITICAL terminates the
    /// process once the record is written.
    #[track_caller]
    pub fn log(&self, severity: Severity, message: impl AsRef<str>) {
        match severity {
            Severity::Critical => self.critical(message),
            Severity::Error => self.error(message),
            _ => {
                if !self.is_enabled(severity) {
                    return;
                }
                self.emit(severity, message.as_ref(), None, true);
            }
        }
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Severity::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Severity::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(Severity::Warn, message);
    }

    /// INFO record carrying only the service context, no field data
    pub fn metric(&self, message: impl AsRef<str>) {
        if !self.is_enabled(Severity::Info) {
            return;
        }
        self.emit(Severity::Info, message.as_ref(), None, false);
    }

    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.report(Severity::Error, message.as_ref(), Location::caller());
    }

    /// Write a CRITICAL record, then invoke the exit handler with
    /// [`CRITICAL_EXIT_CODE`]. With the default handler this never returns.
    #[track_caller]
    pub fn critical(&self, message: impl AsRef<str>) {
        self.report(Severity::Critical, message.as_ref(), Location::caller());
        (self.exit_handler)(CRITICAL_EXIT_CODE);
    }

    fn report(&self, severity: Severity, message: &str, caller: &Location<'_>) {
        let caller_skip = self.caller_skip();
        let capture = location::capture(caller, caller_skip, self.stack_buffer_size);
        self.emit(severity, message, Some(capture), true);
    }

    fn emit(&self, severity: Severity, message: &str, capture: Option<Capture>, with_data: bool) {
        let (report_location, stacktrace) = match capture {
            Some(c) => (Some(c.location), Some(c.stacktrace)),
            None => (None, None),
        };

        let json = {
            let state = self.state.read();
            let data = if with_data { &state.fields } else { &NO_FIELDS };

            let mut payload = Payload::new(severity, message)
                .with_service_context(self.service_context())
                .with_context(Context::new(data, report_location));
            if let Some(stacktrace) = stacktrace {
                payload = payload.with_stacktrace(stacktrace);
            }
            payload.to_json()
        };

        let line = match json {
            Ok(line) => line,
            Err(e) => {
                eprintln!("[LOGGER ERROR] {}", e);
                self.metrics.record_dropped();
                return;
            }
        };

        match self.sink.write_line(line.as_bytes()) {
            Ok(()) => {
                self.metrics.record_logged();
                if severity.is_error_tier() {
                    self.metrics.record_error_report();
                }
            }
            Err(e) => {
                eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", self.sink.name(), e);
                self.metrics.record_dropped();
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Logger {
    fn clone(&self) -> Self {
        self.derive(|_| {})
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Logger")
            .field("level", &state.level)
            .field("fields", &state.fields)
            .field("caller_skip", &state.caller_skip)
            .field("service_context", &self.service_context)
            .field("sink", &self.sink)
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use stackdriver_logger::prelude::*;
///
/// let buffer = BufferSink::new();
/// let logger = Logger::builder()
///     .config(Config::new(Severity::Debug, "checkout", "1.4.2"))
///     .field("region", "eu-west-1")
///     .output(buffer.clone())
///     .build();
///
/// logger.debug("cart loaded");
/// assert!(buffer.contents().contains("\"region\":\"eu-west-1\""));
/// ```
pub struct LoggerBuilder {
    config: Option<Config>,
    level: Option<Severity>,
    identity: Option<(String, String)>,
    fields: Fields,
    sink: Option<Sink>,
    caller_skip: usize,
    stack_buffer_size: usize,
    exit_handler: Option<ExitHandler>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: None,
            level: None,
            identity: None,
            fields: Fields::new(),
            sink: None,
            caller_skip: DEFAULT_CALLER_SKIP,
            stack_buffer_size: DEFAULT_STACK_BUFFER_SIZE,
            exit_handler: None,
        }
    }

    /// Use `config` instead of the process-wide configuration
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Severity) -> Self {
        self.level = Some(level);
        self
    }

    /// Override the service name and version
    #[must_use = "builder methods return a new value"]
    pub fn service(mut self, service: impl Into<String>, version: impl Into<String>) -> Self {
        self.identity = Some((service.into(), version.into()));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: impl Into<Fields>) -> Self {
        self.fields.merge(&fields.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key, value);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, sink: impl Into<Sink>) -> Self {
        self.sink = Some(sink.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_skip(mut self, n: usize) -> Self {
        self.caller_skip = n;
        self
    }

    /// Upper bound in bytes of the stack trace attached to error records
    #[must_use = "builder methods return a new value"]
    pub fn stack_buffer_size(mut self, bytes: usize) -> Self {
        self.stack_buffer_size = bytes;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn exit_handler(mut self, handler: ExitHandler) -> Self {
        self.exit_handler = Some(handler);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let mut config = self.config.unwrap_or_else(config::current);
        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some((service, version)) = self.identity {
            config.service = service;
            config.version = version;
        }

        let mut logger = Logger::from_config(&config);
        {
            let state = logger.state.get_mut();
            state.fields = self.fields;
            state.caller_skip = self.caller_skip;
        }
        if let Some(sink) = self.sink {
            logger.sink = sink;
        }
        if let Some(handler) = self.exit_handler {
            logger.exit_handler = handler;
        }
        logger.stack_buffer_size = self.stack_buffer_size;
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
