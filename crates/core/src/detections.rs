//! Parser for machine-generated object-detection CSV uploads.
//!
//! This module has zero external dependencies (no DB, no async, no I/O).
//! It turns the raw text of an uploaded detection file into a list of
//! [`RecordValues`], validating the structural format (required columns)
//! before any caller touches storage.
//!
//! Format rules:
//! - First non-empty line is the header.
//! - Column matching is case-insensitive and whitespace-trimmed.
//! - Unknown columns are ignored.
//! - A missing required column fails the whole file.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Columns every detection file must carry, in canonical spelling.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "frame_num",
    "object_id",
    "label",
    "tracker_l",
    "tracker_t",
    "tracker_w",
    "tracker_h",
    "model_confidence",
    "tracker_confidence",
];

/// The field values of one tracked object on one frame, as parsed from a
/// detection file. Carries no surrogate id and no parent link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordValues {
    pub frame_num: i64,
    pub object_id: i64,
    pub label: String,
    pub tracker_l: i64,
    pub tracker_t: i64,
    pub tracker_w: i64,
    pub tracker_h: i64,
    pub model_confidence: f64,
    pub tracker_confidence: f64,
}

/// Error type for detection-file parsing.
#[derive(Debug, thiserror::Error)]
pub enum DetectionParseError {
    #[error("detection file is empty")]
    Empty,

    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("line {line}: expected {expected} fields, got {got}")]
    FieldCount {
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("line {line}, column {column}: invalid value {value:?}")]
    InvalidValue {
        line: usize,
        column: &'static str,
        value: String,
    },
}

impl From<DetectionParseError> for CoreError {
    fn from(err: DetectionParseError) -> Self {
        CoreError::Format(err.to_string())
    }
}

/// Index of each required column within the header row.
struct ColumnMap {
    indices: [usize; 9],
    width: usize,
}

impl ColumnMap {
    fn from_header(header: &str) -> Result<Self, DetectionParseError> {
        let names: Vec<String> = split_row(header)
            .into_iter()
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let mut indices = [0usize; 9];
        for (slot, column) in REQUIRED_COLUMNS.iter().enumerate() {
            indices[slot] = names
                .iter()
                .position(|name| name == column)
                .ok_or(DetectionParseError::MissingColumn(column))?;
        }

        Ok(Self {
            indices,
            width: names.len(),
        })
    }
}

/// Parse the full text of a detection CSV into record values.
///
/// Fails before returning any partial result: either the whole file is
/// structurally valid or the caller gets an error and no rows.
pub fn parse_detections(text: &str) -> Result<Vec<RecordValues>, DetectionParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines.next().ok_or(DetectionParseError::Empty)?;
    let columns = ColumnMap::from_header(header)?;

    let mut records = Vec::new();
    for (idx, line) in lines {
        let fields = split_row(line);
        if fields.len() != columns.width {
            return Err(DetectionParseError::FieldCount {
                line: idx + 1,
                expected: columns.width,
                got: fields.len(),
            });
        }

        let get = |slot: usize| fields[columns.indices[slot]];
        records.push(RecordValues {
            frame_num: parse_int(get(0), idx + 1, "frame_num")?,
            object_id: parse_int(get(1), idx + 1, "object_id")?,
            label: get(2).to_string(),
            tracker_l: parse_int(get(3), idx + 1, "tracker_l")?,
            tracker_t: parse_int(get(4), idx + 1, "tracker_t")?,
            tracker_w: parse_int(get(5), idx + 1, "tracker_w")?,
            tracker_h: parse_int(get(6), idx + 1, "tracker_h")?,
            model_confidence: parse_float(get(7), idx + 1, "model_confidence")?,
            tracker_confidence: parse_float(get(8), idx + 1, "tracker_confidence")?,
        });
    }

    Ok(records)
}

/// Split one CSV row into trimmed fields.
///
/// The upstream tracker emits plain comma-separated output without quoting
/// or embedded commas, so a straight split is the full grammar.
fn split_row(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

fn parse_int(
    value: &str,
    line: usize,
    column: &'static str,
) -> Result<i64, DetectionParseError> {
    value
        .parse()
        .map_err(|_| DetectionParseError::InvalidValue {
            line,
            column,
            value: value.to_string(),
        })
}

fn parse_float(
    value: &str,
    line: usize,
    column: &'static str,
) -> Result<f64, DetectionParseError> {
    value
        .parse()
        .map_err(|_| DetectionParseError::InvalidValue {
            line,
            column,
            value: value.to_string(),
        })
}
