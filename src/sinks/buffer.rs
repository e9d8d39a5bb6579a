//! In-memory sink

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Cloneable in-memory writer; all clones see the same bytes.
///
/// # Example
///
/// ```
/// use stackdriver_logger::{BufferSink, Logger, Severity};
///
/// let buffer = BufferSink::new();
/// let logger = Logger::builder()
///     .level(Severity::Debug)
///     .output(buffer.clone())
///     .build();
/// logger.warn("disk almost full");
///
/// assert_eq!(buffer.lines().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for BufferSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
