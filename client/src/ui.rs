//! Screen flow of the game client: menu, game, leaderboard, game over

use crate::game::SnakeGame;
use shared::ScoreRecord;

pub const MAX_NAME_LEN: usize = 16;

/// Which view is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Highscores,
    /// Final score shown with the name prompt
    GameOver,
}

impl Screen {
    pub fn shows_menu(self) -> bool {
        self == Screen::Menu
    }

    pub fn shows_canvas(self) -> bool {
        matches!(self, Screen::Playing | Screen::GameOver)
    }

    pub fn shows_highscores(self) -> bool {
        self == Screen::Highscores
    }
}

/// Leaderboard as last fetched from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardView {
    Loading,
    Loaded(Vec<ScoreRecord>),
    Failed(String),
}

/// Progress of saving the final score
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    NotSaved,
    Saving,
    Saved { rank: Option<usize> },
    Failed(String),
}

/// Player name typed on the game-over screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntry {
    text: String,
}

impl NameEntry {
    /// Appends a printable character, up to [`MAX_NAME_LEN`]
    pub fn push(&mut self, c: char) {
        if !c.is_control() && self.text.chars().count() < MAX_NAME_LEN {
            self.text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Trimmed name, `None` when only whitespace was typed
    pub fn submittable(&self) -> Option<&str> {
        let name = self.text.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// Client-side state outside the rules themselves
#[derive(Debug)]
pub struct UiState {
    pub screen: Screen,
    pub game: SnakeGame,
    pub name: NameEntry,
    pub board: BoardView,
    pub save: SaveStatus,
}

impl UiState {
    pub fn new(game: SnakeGame) -> Self {
        Self {
            screen: Screen::Menu,
            game,
            name: NameEntry::default(),
            board: BoardView::Loading,
            save: SaveStatus::NotSaved,
        }
    }

    pub fn show_menu(&mut self) {
        self.screen = Screen::Menu;
    }

    /// Starts a fresh game
    pub fn show_game(&mut self) {
        self.game.reset();
        self.save = SaveStatus::NotSaved;
        self.screen = Screen::Playing;
    }

    /// Switches to the leaderboard; the caller fetches it
    pub fn show_highscores(&mut self) {
        self.board = BoardView::Loading;
        self.screen = Screen::Highscores;
    }

    /// Moves to the game-over screen once the snake has crashed
    ///
    /// Returns true on the frame the transition happens.
    pub fn check_game_over(&mut self) -> bool {
        if self.screen == Screen::Playing && self.game.game_over {
            self.screen = Screen::GameOver;
            true
        } else {
            false
        }
    }

    /// Name and score to submit, if a save may start now
    pub fn begin_save(&mut self) -> Option<(String, i64)> {
        if self.screen != Screen::GameOver {
            return None;
        }
        if matches!(self.save, SaveStatus::Saving | SaveStatus::Saved { .. }) {
            return None;
        }

        let name = self.name.submittable()?.to_string();
        self.save = SaveStatus::Saving;
        Some((name, self.game.score))
    }
}
