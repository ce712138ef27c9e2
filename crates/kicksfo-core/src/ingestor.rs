//! # Ingestor Module
//!
//! CSV parsing and validation of match events.
//!
//! - Header row required; required columns matched exactly, in any order
//! - Extra columns are ignored
//! - `success` must be 0 or 1
//! - Key columns (athlete, target, foot, technique) must be non-empty
//! - Any bad row fails the whole upload; nothing is partially kept

use crate::primitives::{
    COLUMN_ATHLETE, COLUMN_CAREER, COLUMN_FOOT, COLUMN_SIGNATURE, COLUMN_STYLE, COLUMN_SUCCESS,
    COLUMN_TARGET, COLUMN_TECHNIQUE, MAX_EVENTS, MAX_FIELD_LENGTH, MAX_UPLOAD_BYTES,
};
use crate::{KickError, MatchEvent};
use std::io::Read;
use std::path::Path;

/// Column positions of the required fields within one file's header.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    athlete: usize,
    target: usize,
    foot: usize,
    technique: usize,
    success: usize,
    style: usize,
    signature: usize,
    career: usize,
}

impl ColumnMap {
    fn from_header(header: &csv::StringRecord) -> Result<Self, KickError> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| KickError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            athlete: find(COLUMN_ATHLETE)?,
            target: find(COLUMN_TARGET)?,
            foot: find(COLUMN_FOOT)?,
            technique: find(COLUMN_TECHNIQUE)?,
            success: find(COLUMN_SUCCESS)?,
            style: find(COLUMN_STYLE)?,
            signature: find(COLUMN_SIGNATURE)?,
            career: find(COLUMN_CAREER)?,
        })
    }
}

/// The Ingestor turns CSV input into validated match events.
pub struct Ingestor;

impl Ingestor {
    /// Validate a single event.
    ///
    /// An event is valid if every key field is non-empty and every field is
    /// within [`MAX_FIELD_LENGTH`]. `row` is the 1-based data row, used only
    /// for the error message.
    pub fn validate(event: &MatchEvent, row: usize) -> Result<(), KickError> {
        let keys = [
            (COLUMN_ATHLETE, &event.athlete),
            (COLUMN_TARGET, &event.target),
            (COLUMN_FOOT, &event.foot),
            (COLUMN_TECHNIQUE, &event.technique),
        ];
        for (column, value) in keys {
            if value.trim().is_empty() {
                return Err(KickError::EmptyField {
                    row,
                    column: column.to_string(),
                });
            }
        }

        let all = [
            (COLUMN_ATHLETE, &event.athlete),
            (COLUMN_TARGET, &event.target),
            (COLUMN_FOOT, &event.foot),
            (COLUMN_TECHNIQUE, &event.technique),
            (COLUMN_STYLE, &event.style),
            (COLUMN_SIGNATURE, &event.signature),
            (COLUMN_CAREER, &event.career),
        ];
        for (column, value) in all {
            if value.len() > MAX_FIELD_LENGTH {
                return Err(KickError::FieldTooLong {
                    row,
                    column: column.to_string(),
                    max: MAX_FIELD_LENGTH,
                });
            }
        }

        Ok(())
    }

    /// Parse a success flag. Surrounding whitespace is tolerated.
    pub fn parse_success(raw: &str, row: usize) -> Result<bool, KickError> {
        match raw.trim() {
            "1" => Ok(true),
            "0" => Ok(false),
            other => Err(KickError::InvalidSuccessFlag {
                row,
                value: other.to_string(),
            }),
        }
    }

    /// Read all events from a CSV source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<MatchEvent>, KickError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let columns = ColumnMap::from_header(reader.headers()?)?;

        let mut events = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let row = index + 1;
            let record = result?;

            if events.len() >= MAX_EVENTS {
                return Err(KickError::TooManyEvents { max: MAX_EVENTS });
            }

            let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();
            let event = MatchEvent {
                athlete: field(columns.athlete),
                target: field(columns.target),
                foot: field(columns.foot),
                technique: field(columns.technique),
                success: Self::parse_success(record.get(columns.success).unwrap_or_default(), row)?,
                style: field(columns.style),
                signature: field(columns.signature),
                career: field(columns.career),
            };
            Self::validate(&event, row)?;
            events.push(event);
        }

        Ok(events)
    }

    /// Read all events from an in-memory CSV upload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Vec<MatchEvent>, KickError> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(KickError::UploadTooLarge {
                size: bytes.len(),
                max: MAX_UPLOAD_BYTES,
            });
        }
        Self::from_reader(bytes)
    }

    /// Read all events from a CSV file on disk.
    pub fn from_path(path: &Path) -> Result<Vec<MatchEvent>, KickError> {
        let bytes = std::fs::read(path).map_err(|e| {
            KickError::IoError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_bytes(&bytes)
    }
}

// =============================================================================
// TESTS
// =============================================================================
