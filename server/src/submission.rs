//! Validation and merging of incoming score submissions
//!
//! Submissions arrive as untyped JSON. Validation stops at the first failing
//! rule, in this order:
//! - both `name` and `score` present and non-null
//! - `name` is a string that is non-empty after trimming
//! - `score` converts to an integer
//!
//! A valid submission is appended to the stored board, which is then
//! re-sorted, truncated and written back.

use crate::store::HighscoreStore;
use log::{info, warn};
use serde_json::Value;
use shared::{merge_score, ScoreRecord};
use std::fmt;

/// Reason a submission was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionError {
    MissingField,
    InvalidName,
    EmptyName,
    InvalidScore,
}

impl SubmissionError {
    /// Human-readable reason returned to the client
    pub fn message(&self) -> &'static str {
        match self {
            SubmissionError::MissingField => "Missing name or score",
            SubmissionError::InvalidName => "Name must be a string",
            SubmissionError::EmptyName => "Name cannot be empty",
            SubmissionError::InvalidScore => "Invalid score format",
        }
    }
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for SubmissionError {}

/// Turns an untyped submission into a score record
///
/// The stored name is trimmed. Scores may be JSON integers, finite floats
/// (truncated toward zero), booleans (1 or 0) or strings holding an integer.
pub fn validate_submission(payload: &Value) -> Result<ScoreRecord, SubmissionError> {
    let field = |key: &str| payload.get(key).filter(|v| !v.is_null());

    let (name, score) = match (field("name"), field("score")) {
        (Some(name), Some(score)) => (name, score),
        _ => return Err(SubmissionError::MissingField),
    };

    let name = name.as_str().ok_or(SubmissionError::InvalidName)?.trim();
    if name.is_empty() {
        return Err(SubmissionError::EmptyName);
    }

    let score = parse_score(score).ok_or(SubmissionError::InvalidScore)?;

    Ok(ScoreRecord::new(name, score))
}

fn parse_score(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            // u64 values above i64::MAX also land here and fail the range check
            let f = n.as_f64()?.trunc();
            if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                Some(f as i64)
            } else {
                None
            }
        }
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Merges `record` into the stored board and persists the result
///
/// A failed write is logged and otherwise ignored; the merged board is
/// returned either way.
pub fn submit_score(store: &HighscoreStore, record: ScoreRecord) -> Vec<ScoreRecord> {
    info!("New score {} for {}", record.score, record.name);

    let scores = merge_score(store.read(), record);
    if let Err(e) = store.write(&scores) {
        warn!("Highscores not saved to {}: {}", store.path().display(), e);
    }
    scores
}

/// Validates `payload` and, if it passes, records it
///
/// Nothing is written when validation fails.
pub fn process_submission(
    store: &HighscoreStore,
    payload: &Value,
) -> Result<ScoreRecord, SubmissionError> {
    let record = validate_submission(payload)?;
    submit_score(store, record.clone());
    Ok(record)
}
