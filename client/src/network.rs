use log::debug;
use shared::{qualifies, rank_of, ErrorResponse, ScoreRecord};
use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    /// Request could not be sent or the response could not be decoded
    Http(reqwest::Error),
    /// Server answered with a non-success status
    Rejected { status: u16, reason: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "request failed: {}", e),
            ClientError::Rejected { status, reason } => {
                write!(f, "server rejected request ({}): {}", status, reason)
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Http(e) => Some(e),
            ClientError::Rejected { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Http(e)
    }
}

/// Result of a submission as seen on the board right after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Whether the score beat the board fetched before submitting
    pub qualified: bool,
    /// 1-indexed position of the new entry, `None` if it fell off the board
    pub rank: Option<usize>,
    pub board: Vec<ScoreRecord>,
}

#[derive(Clone)]
pub struct HighscoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl HighscoreClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn highscores_url(&self) -> String {
        format!("{}/highscores", self.base_url)
    }

    /// Fetches the current leaderboard, highest score first
    pub async fn get_highscores(&self) -> Result<Vec<ScoreRecord>, ClientError> {
        let response = self.http.get(self.highscores_url()).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Submits a new score
    ///
    /// Validation failures come back as `ClientError::Rejected` carrying the
    /// server's reason, e.g. "Name cannot be empty".
    pub async fn save_high_score(&self, score: i64, name: &str) -> Result<(), ClientError> {
        let record = ScoreRecord::new(name, score);
        debug!("Submitting {:?} to {}", record, self.highscores_url());

        let response = self
            .http
            .post(self.highscores_url())
            .json(&record)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Submits a score and looks up where it landed
    ///
    /// The board is fetched before and after the submission. Another client
    /// submitting in between can shift the reported rank.
    pub async fn submit_and_rank(
        &self,
        score: i64,
        name: &str,
    ) -> Result<SubmitOutcome, ClientError> {
        let before = self.get_highscores().await?;
        let qualified = qualifies(&before, score);

        self.save_high_score(score, name).await?;

        let board = self.get_highscores().await?;
        let rank = rank_of(&board, name.trim(), score);
        Ok(SubmitOutcome {
            qualified,
            rank,
            board,
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await?;
        let reason = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());

        Err(ClientError::Rejected {
            status: status.as_u16(),
            reason,
        })
    }
}
