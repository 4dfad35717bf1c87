//! Trace file formats.
//!
//! JSON traces hold one [`SessionRecord`] per line; blank lines and lines
//! starting with `#` are skipped. CBOR traces hold a single array of
//! records.

use std::io::{BufRead, Read};

use anteroom_proto::{SessionRecord, codec};

use crate::ReplayError;

/// On-disk encoding of a trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraceFormat {
    /// JSON lines.
    #[default]
    Json,
    /// One CBOR array.
    Cbor,
}

/// Read every record from `reader`.
pub fn read_trace(
    reader: impl BufRead,
    format: TraceFormat,
) -> Result<Vec<SessionRecord>, ReplayError> {
    match format {
        TraceFormat::Json => read_json_lines(reader),
        TraceFormat::Cbor => read_cbor(reader),
    }
}

fn read_json_lines(reader: impl BufRead) -> Result<Vec<SessionRecord>, ReplayError> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let record = serde_json::from_str(trimmed)
            .map_err(|e| ReplayError::Json { line: index + 1, reason: e.to_string() })?;
        records.push(record);
    }

    Ok(records)
}

fn read_cbor(mut reader: impl Read) -> Result<Vec<SessionRecord>, ReplayError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(codec::from_cbor(&bytes)?)
}
