//! # Highscore Client Library
//!
//! HTTP client for the highscore service, the snake game whose final scores
//! it records, and the helpers that present the leaderboard.
//!
//! ## Module Organization
//!
//! ### Network Module (`network`)
//! Talks to the server:
//! - `get_highscores` fetches the current top 10
//! - `save_high_score` submits a new entry and surfaces the server's
//!   rejection reason when validation fails
//! - `submit_and_rank` submits and reports whether the score qualified and
//!   where it landed
//!
//! ### Game Module (`game`)
//! The snake rules, independent of any window:
//! - Movement on a 40x30 grid walled in by two cells on every side
//! - Apples, rotten apples and special apples with their score and growth
//! - One level per three fruits, faster steps every three levels
//! - Two foods at a time from level 5
//!
//! ### UI Module (`ui`)
//! Screen flow (menu, game, leaderboard, game over) and the name prompt.
//!
//! ### Input Module (`input`)
//! Maps keys to game actions per screen.
//!
//! ### Rendering Module (`rendering`)
//! Draws the board and screens with macroquad, and formats the leaderboard
//! as a ranked text table for terminal output.
//!
//! ### App Module (`app`)
//! The frame loop. Game over leads to a name prompt; confirming saves the
//! score through `submit_and_rank` on a background runtime.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::HighscoreClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HighscoreClient::new("http://127.0.0.1:5000");
//!
//!     client.save_high_score(150, "Charlie").await?;
//!
//!     for entry in client.get_highscores().await? {
//!         println!("{} {}", entry.name, entry.score);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod game;
pub mod input;
pub mod network;
pub mod rendering;
pub mod ui;
