//! Frame loop of the graphical client
//!
//! macroquad owns the main thread, so HTTP calls run on a tokio runtime
//! handed in by the caller and report back through oneshot channels that are
//! polled once per frame.

use crate::game::{SnakeGame, StepEvent};
use crate::input::{Action, InputManager};
use crate::network::{ClientError, HighscoreClient, SubmitOutcome};
use crate::rendering::Renderer;
use crate::ui::{BoardView, SaveStatus, Screen, UiState};
use log::{debug, info, warn};
use macroquad::prelude::*;
use shared::ScoreRecord;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Upper bound on catch-up after a stalled frame, in milliseconds
const MAX_FRAME_BACKLOG_MS: f32 = 1000.0;

type Reply<T> = oneshot::Receiver<Result<T, ClientError>>;

/// Takes the reply out of `slot` once it has arrived
///
/// Returns `None` while the request is still running.
fn take_reply<T>(slot: &mut Option<Reply<T>>) -> Option<Result<T, String>> {
    let rx = slot.as_mut()?;
    let reply = match rx.try_recv() {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(TryRecvError::Empty) => return None,
        Err(TryRecvError::Closed) => Err("request was cancelled".to_string()),
    };
    *slot = None;
    Some(reply)
}

pub struct GameApp {
    ui: UiState,
    client: HighscoreClient,
    runtime: Handle,
    board_reply: Option<Reply<Vec<ScoreRecord>>>,
    save_reply: Option<Reply<SubmitOutcome>>,
    step_backlog_ms: f32,
}

impl GameApp {
    pub fn new(client: HighscoreClient, runtime: Handle) -> Self {
        Self {
            ui: UiState::new(SnakeGame::new()),
            client,
            runtime,
            board_reply: None,
            save_reply: None,
            step_backlog_ms: 0.0,
        }
    }

    /// Runs until the window is closed
    pub async fn run(mut self) {
        let mut input = InputManager::new();
        let mut renderer = Renderer::new();

        loop {
            for action in input.update(self.ui.screen) {
                self.handle_action(action);
            }

            self.advance(get_frame_time() * 1000.0);
            self.poll_replies();

            renderer.render(&self.ui);
            next_frame().await;
        }
    }

    fn handle_action(&mut self, action: Action) {
        match (self.ui.screen, action) {
            (Screen::Menu, Action::Confirm) => self.start_game(),
            (Screen::Menu, Action::ShowHighscores) => {
                self.ui.show_highscores();
                self.fetch_board();
            }
            (Screen::Playing, Action::Turn(direction)) => {
                if !self.ui.game.paused {
                    self.ui.game.set_direction(direction);
                }
            }
            (Screen::Playing, Action::TogglePause) => {
                self.ui.game.toggle_pause();
                debug!("Paused: {}", self.ui.game.paused);
            }
            (Screen::Playing | Screen::GameOver, Action::Restart) => self.start_game(),
            (Screen::Playing | Screen::Highscores | Screen::GameOver, Action::Back) => {
                self.ui.show_menu()
            }
            (Screen::GameOver, Action::Type(c)) => {
                if self.name_editable() {
                    self.ui.name.push(c);
                }
            }
            (Screen::GameOver, Action::Backspace) => {
                if self.name_editable() {
                    self.ui.name.backspace();
                }
            }
            (Screen::GameOver, Action::Confirm) => self.save_score(),
            _ => {}
        }
    }

    fn name_editable(&self) -> bool {
        matches!(self.ui.save, SaveStatus::NotSaved | SaveStatus::Failed(_))
    }

    fn start_game(&mut self) {
        self.ui.show_game();
        self.step_backlog_ms = 0.0;
        info!("New game started");
    }

    /// Steps the snake as many times as the elapsed time allows
    fn advance(&mut self, elapsed_ms: f32) {
        if self.ui.screen != Screen::Playing || self.ui.game.paused {
            self.step_backlog_ms = 0.0;
            return;
        }

        self.step_backlog_ms = (self.step_backlog_ms + elapsed_ms).min(MAX_FRAME_BACKLOG_MS);
        while self.step_backlog_ms >= self.ui.game.speed_ms as f32 {
            self.step_backlog_ms -= self.ui.game.speed_ms as f32;
            if self.ui.game.step() == StepEvent::GameOver {
                break;
            }
        }

        if self.ui.check_game_over() {
            info!("Game over with score {}", self.ui.game.score);
        }
    }

    fn fetch_board(&mut self) {
        let (tx, rx) = oneshot::channel();
        let client = self.client.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(client.get_highscores().await);
        });
        self.board_reply = Some(rx);
    }

    fn save_score(&mut self) {
        let Some((name, score)) = self.ui.begin_save() else {
            return;
        };

        info!("Saving score {} for {}", score, name);
        let (tx, rx) = oneshot::channel();
        let client = self.client.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(client.submit_and_rank(score, &name).await);
        });
        self.save_reply = Some(rx);
    }

    fn poll_replies(&mut self) {
        if let Some(reply) = take_reply(&mut self.board_reply) {
            self.ui.board = match reply {
                Ok(scores) => BoardView::Loaded(scores),
                Err(reason) => {
                    warn!("Failed to load highscores: {}", reason);
                    BoardView::Failed(reason)
                }
            };
        }

        if let Some(reply) = take_reply(&mut self.save_reply) {
            self.ui.save = match reply {
                Ok(outcome) => {
                    self.ui.board = BoardView::Loaded(outcome.board);
                    SaveStatus::Saved { rank: outcome.rank }
                }
                Err(reason) => {
                    warn!("Failed to save score: {}", reason);
                    SaveStatus::Failed(reason)
                }
            };
        }
    }
}
