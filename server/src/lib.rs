//! # Highscore Server Library
//!
//! This library provides the HTTP service that keeps a persisted top-10
//! leaderboard of player name/score pairs and serves the page that displays it.
//!
//! ## Module Organization
//!
//! ### Store Module (`store`)
//! Reads and writes the leaderboard file:
//! - Missing, unreadable or malformed files read as an empty board
//! - Write failures are reported to the caller but never abort a request
//!
//! ### Submission Module (`submission`)
//! Validates untyped submissions and merges them into the board:
//! - Field presence, name and score checks in a fixed order
//! - Append, sort descending, keep the top 10, persist
//!
//! ### Network Module (`network`)
//! The HTTP surface:
//! - `GET /` serves the static page
//! - `GET /highscores` returns the board as a JSON array
//! - `POST /highscores` accepts a JSON `{name, score}` submission
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::network::Server;
//! use server::store::HighscoreStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let store = HighscoreStore::new("highscores.json");
//!     let server = Server::new("127.0.0.1:5000", store).await?;
//!
//!     // Serves until Ctrl+C
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//! Submissions within one process are serialized by a lock around the store.
//! Store reads and writes run on tokio's blocking pool.
//! Nothing guards the file against other processes writing it.

pub mod network;
pub mod store;
pub mod submission;
