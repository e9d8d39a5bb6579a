//! Call site and stack capture for error-tier records
//!
//! File and line always come from `#[track_caller]`, so they are exact even
//! in builds without debug info. The function name is recovered by finding
//! the matching frame in a captured `std::backtrace::Backtrace`; when that
//! fails it falls back to [`UNKNOWN_FUNCTION`].

use super::payload::ReportLocation;
use std::backtrace::Backtrace;
use std::panic::Location;

/// Function name reported when frame resolution fails
pub const UNKNOWN_FUNCTION: &str = "unknown";

/// Default upper bound, in bytes, of the captured stack trace text
pub const DEFAULT_STACK_BUFFER_SIZE: usize = 4096;

/// One symbol of a rendered backtrace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub function: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    /// Byte offset of the frame header in the rendered text
    offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub location: ReportLocation,
    pub stacktrace: String,
}

/// Capture the current stack and attribute it to `caller`.
///
/// `caller_skip` walks that many frames further out from the call site,
/// for wrappers that are not themselves `#[track_caller]`.
pub fn capture(caller: &Location<'_>, caller_skip: usize, buffer_size: usize) -> Capture {
    let rendered = Backtrace::force_capture().to_string();
    resolve(&rendered, caller.file(), caller.line(), caller_skip, buffer_size)
}

/// Attribute an already rendered backtrace to the call site `file:line`.
pub fn resolve(
    rendered: &str,
    file: &str,
    line: u32,
    caller_skip: usize,
    buffer_size: usize,
) -> Capture {
    let frames = parse_frames(rendered);
    let call_site = frames
        .iter()
        .position(|frame| frame.is_at(file, line))
        .and_then(|idx| idx.checked_add(caller_skip))
        .and_then(|idx| frames.get(idx));

    // A frame without source info cannot be paired with a file and line.
    let resolved = call_site.and_then(|frame| match (&frame.file, frame.line) {
        (Some(path), Some(line_number)) => Some((frame, path, line_number)),
        _ => None,
    });

    let (location, stack) = match resolved {
        Some((frame, path, line_number)) => {
            let location = ReportLocation {
                file_path: path.clone(),
                function_name: frame.function.clone(),
                line_number,
            };
            (location, &rendered[frame.offset..])
        }
        None => {
            let location = ReportLocation {
                file_path: file.to_string(),
                function_name: UNKNOWN_FUNCTION.to_string(),
                line_number: line,
            };
            (location, rendered)
        }
    };

    let mut stacktrace = truncate(stack.trim_end(), buffer_size).to_string();
    if stacktrace.is_empty() {
        stacktrace = format!(
            "{}\n    at {}:{}",
            location.function_name, location.file_path, location.line_number
        );
    }

    Capture {
        location,
        stacktrace,
    }
}

/// Parse the text form of a `std::backtrace::Backtrace`.
///
/// Each symbol renders as `   N: path::to::function` optionally followed by
/// `             at /path/to/file.rs:LINE:COL`. Symbols inlined into the
/// same frame repeat without the `N:` index.
pub fn parse_frames(rendered: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();
    let mut offset = 0;

    for raw in rendered.split_inclusive('\n') {
        let line = raw.trim();

        if let Some(rest) = line.strip_prefix("at ") {
            if let (Some(frame), Some((path, line_no))) = (frames.last_mut(), split_source(rest)) {
                if frame.file.is_none() {
                    frame.file = Some(path.to_string());
                    frame.line = Some(line_no);
                }
            }
        } else if !line.is_empty() {
            let name = match line.split_once(": ") {
                Some((index, name)) if index.bytes().all(|b| b.is_ascii_digit()) => name,
                _ => line,
            };
            frames.push(Frame {
                function: strip_hash(name).to_string(),
                file: None,
                line: None,
                offset,
            });
        }

        offset += raw.len();
    }

    frames
}

impl Frame {
    fn is_at(&self, file: &str, line: u32) -> bool {
        match (&self.file, self.line) {
            (Some(path), Some(l)) if l == line => {
                let path = path.replace('\\', "/");
                let file = file.replace('\\', "/");
                path.ends_with(file.trim_start_matches("./"))
            }
            _ => false,
        }
    }
}

/// `path:line:col` -> (`path`, line)
fn split_source(source: &str) -> Option<(&str, u32)> {
    let mut parts = source.rsplitn(3, ':');
    let _col = parts.next()?;
    let line = parts.next()?.parse().ok()?;
    let path = parts.next()?;
    Some((path, line))
}

/// Drop a trailing `::h0123456789abcdef` symbol hash.
fn strip_hash(name: &str) -> &str {
    match name.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) => {
            head
        }
        _ => name,
    }
}

fn truncate(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
