//! # Workload Script Parser
//!
//! Turns user text into validated engine input.
//!
//! ## Format
//!
//! Workloads are line-based, one process per line:
//! - `NAME ARRIVAL BURST [PRIORITY]`
//! - Comments: `# anything`, also allowed after the fields
//! - Blank lines are ignored
//!
//! Page traces are whitespace-separated page numbers.
//!
//! ## Example
//!
//! ```text
//! # name arrival burst priority
//! P1 0 8 1
//! P2 1 4        # priority defaults to 0
//! ```

use core_types::{PageTrace, ProcessSpec, TraceError, Workload, WorkloadError};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Workload and trace parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Line {line}: need NAME ARRIVAL BURST [PRIORITY]")]
    MissingFields { line: usize },

    #[error("Line {line}: too many fields")]
    TooManyFields { line: usize },

    #[error("Line {line}: invalid number: {value}")]
    InvalidNumber { line: usize, value: String },

    #[error("Invalid page number: {0}")]
    InvalidPage(String),

    #[error(transparent)]
    Workload(#[from] WorkloadError),

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse JSON workload: {0}")]
    Json(String),
}

/// Parses one `NAME ARRIVAL BURST [PRIORITY]` line
///
/// Returns `Ok(None)` for blank and comment-only lines.
pub fn parse_process_line(line: &str, line_num: usize) -> Result<Option<ProcessSpec>, ScriptError> {
    let line = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    }
    .trim();

    if line.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(ScriptError::MissingFields { line: line_num });
    }
    if parts.len() > 4 {
        return Err(ScriptError::TooManyFields { line: line_num });
    }

    let arrival = parse_number::<u64>(parts[1], line_num)?;
    let burst = parse_number::<u64>(parts[2], line_num)?;
    let priority = match parts.get(3) {
        Some(value) => parse_number::<i64>(value, line_num)?,
        None => 0,
    };

    Ok(Some(
        ProcessSpec::new(parts[0], arrival, burst).with_priority(priority),
    ))
}

/// Parses a whole workload text and validates it
pub fn parse_workload(text: &str) -> Result<Workload, ScriptError> {
    let mut specs = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(spec) = parse_process_line(line, index + 1)? {
            specs.push(spec);
        }
    }
    Ok(Workload::new(specs)?)
}

/// Parses a JSON array of process specs
pub fn parse_workload_json(text: &str) -> Result<Workload, ScriptError> {
    serde_json::from_str(text).map_err(|e| ScriptError::Json(e.to_string()))
}

/// Loads a workload file, as JSON when the extension is `.json`
pub fn load_workload(path: &Path) -> Result<Workload, ScriptError> {
    let text = fs::read_to_string(path).map_err(|e| ScriptError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_workload_json(&text)
    } else {
        parse_workload(&text)
    }
}

/// Parses whitespace-separated page numbers
pub fn parse_pages(text: &str) -> Result<Vec<u64>, ScriptError> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse()
                .map_err(|_| ScriptError::InvalidPage(token.to_string()))
        })
        .collect()
}

/// Parses a page list and pairs it with a frame count
pub fn parse_trace(num_frames: usize, text: &str) -> Result<PageTrace<u64>, ScriptError> {
    let pages = parse_pages(text)?;
    Ok(PageTrace::new(num_frames, pages)?)
}

fn parse_number<T: std::str::FromStr>(value: &str, line: usize) -> Result<T, ScriptError> {
    value.parse().map_err(|_| ScriptError::InvalidNumber {
        line,
        value: value.to_string(),
    })
}
