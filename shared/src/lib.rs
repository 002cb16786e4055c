use serde::{Deserialize, Serialize};

pub const MAX_HIGH_SCORES: usize = 10;
pub const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub name: String,
    pub score: i64,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, score: i64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: String,
}

impl SubmitResponse {
    pub fn success() -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Appends `record` to `board`, sorts by score descending and keeps the top entries.
///
/// The sort is stable, so equal scores stay in the order they were submitted.
/// Duplicate names are never merged; every submission is a new entry.
pub fn merge_score(mut board: Vec<ScoreRecord>, record: ScoreRecord) -> Vec<ScoreRecord> {
    board.push(record);
    board.sort_by(|a, b| b.score.cmp(&a.score));
    board.truncate(MAX_HIGH_SCORES);
    board
}

/// Whether `score` would make it onto `board` if submitted now.
pub fn qualifies(board: &[ScoreRecord], score: i64) -> bool {
    if board.len() < MAX_HIGH_SCORES {
        return true;
    }
    board.last().map(|lowest| score > lowest.score).unwrap_or(true)
}

/// 1-indexed position of the newest entry matching `name` and `score`.
///
/// Equal scores keep submission order, so a fresh duplicate sits after any
/// older identical entry.
pub fn rank_of(board: &[ScoreRecord], name: &str, score: i64) -> Option<usize> {
    board
        .iter()
        .rposition(|r| r.name == name && r.score == score)
        .map(|i| i + 1)
}
