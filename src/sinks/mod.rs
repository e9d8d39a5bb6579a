//! Output destinations
//!
//! A logger writes to exactly one [`Sink`]. Derived loggers share the sink
//! handle, and the mutex inside it keeps every record on its own line.

pub mod buffer;

pub use buffer::BufferSink;

use crate::core::{LoggerError, Result};
use parking_lot::Mutex;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct Sink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    name: Arc<str>,
}

impl Sink {
    /// Wrap any writer
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self::named("custom", writer)
    }

    pub fn named<W: Write + Send + 'static>(name: &str, writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
            name: Arc::from(name),
        }
    }

    /// Process standard output (the default destination)
    pub fn stdout() -> Self {
        Self::named("stdout", io::stdout())
    }

    pub fn stderr() -> Self {
        Self::named("stderr", io::stderr())
    }

    /// Append to a file, creating it if missing
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LoggerError::io_operation(format!("opening {}", path.display()), e))?;
        Ok(Self::named("file", file))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write `line` plus a trailing newline as one record.
    pub fn write_line(&self, line: &[u8]) -> Result<()> {
        let mut record = Vec::with_capacity(line.len() + 1);
        record.extend_from_slice(line);
        record.push(b'\n');

        let mut writer = self.writer.lock();
        writer
            .write_all(&record)
            .and_then(|()| writer.flush())
            .map_err(|e| LoggerError::io_operation("writing log record", e))
    }

    /// Whether two handles point at the same underlying writer
    pub fn same_as(&self, other: &Sink) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").field("name", &self.name).finish()
    }
}

impl From<BufferSink> for Sink {
    fn from(buffer: BufferSink) -> Self {
        Sink::named("buffer", buffer)
    }
}
