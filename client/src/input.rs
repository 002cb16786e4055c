//! Keyboard input mapped to game actions

use crate::game::Direction;
use crate::ui::Screen;
use macroquad::prelude::*;

/// Something the player asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Turn(Direction),
    TogglePause,
    /// Start from the menu, or save on the game-over screen
    Confirm,
    ShowHighscores,
    Restart,
    Back,
    Backspace,
    Type(char),
}

/// Maps a pressed key to an action for the given screen
pub fn action_for_key(screen: Screen, key: KeyCode) -> Option<Action> {
    match screen {
        Screen::Menu => match key {
            KeyCode::Enter | KeyCode::Space => Some(Action::Confirm),
            KeyCode::H => Some(Action::ShowHighscores),
            _ => None,
        },
        Screen::Playing => match key {
            KeyCode::Up | KeyCode::W => Some(Action::Turn(Direction::Up)),
            KeyCode::Down | KeyCode::S => Some(Action::Turn(Direction::Down)),
            KeyCode::Left | KeyCode::A => Some(Action::Turn(Direction::Left)),
            KeyCode::Right | KeyCode::D => Some(Action::Turn(Direction::Right)),
            KeyCode::P | KeyCode::Space => Some(Action::TogglePause),
            KeyCode::R => Some(Action::Restart),
            KeyCode::Escape | KeyCode::Q => Some(Action::Back),
            _ => None,
        },
        Screen::Highscores => match key {
            KeyCode::Escape | KeyCode::Backspace | KeyCode::Enter => Some(Action::Back),
            _ => None,
        },
        // Letters are text here, so only non-printing keys act
        Screen::GameOver => match key {
            KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Escape => Some(Action::Back),
            KeyCode::F5 => Some(Action::Restart),
            _ => None,
        },
    }
}

const WATCHED_KEYS: [KeyCode; 17] = [
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::P,
    KeyCode::R,
    KeyCode::Q,
    KeyCode::H,
    KeyCode::Space,
    KeyCode::Enter,
    KeyCode::Escape,
    KeyCode::Backspace,
    KeyCode::F5,
];

/// Collects this frame's actions from macroquad's key state
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    pub fn update(&mut self, screen: Screen) -> Vec<Action> {
        let mut actions: Vec<Action> = WATCHED_KEYS
            .iter()
            .filter(|key| is_key_pressed(**key))
            .filter_map(|key| action_for_key(screen, *key))
            .collect();

        // Drain the queue every frame so stale characters never reach the name field
        while let Some(c) = get_char_pressed() {
            if screen == Screen::GameOver && !c.is_control() {
                actions.push(Action::Type(c));
            }
        }

        actions
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_wasd_turn() {
        let pairs = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::W, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::S, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::A, Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::D, Direction::Right),
        ];

        for (key, direction) in pairs {
            assert_eq!(
                action_for_key(Screen::Playing, key),
                Some(Action::Turn(direction))
            );
        }
    }

    #[test]
    fn test_pause_keys() {
        assert_eq!(
            action_for_key(Screen::Playing, KeyCode::P),
            Some(Action::TogglePause)
        );
        assert_eq!(
            action_for_key(Screen::Playing, KeyCode::Space),
            Some(Action::TogglePause)
        );
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(action_for_key(Screen::Menu, KeyCode::Enter), Some(Action::Confirm));
        assert_eq!(
            action_for_key(Screen::Menu, KeyCode::H),
            Some(Action::ShowHighscores)
        );
        assert_eq!(action_for_key(Screen::Menu, KeyCode::Up), None);
    }

    #[test]
    fn test_letters_do_not_act_on_game_over() {
        for key in [KeyCode::W, KeyCode::R, KeyCode::H, KeyCode::Q, KeyCode::Space] {
            assert_eq!(action_for_key(Screen::GameOver, key), None);
        }
        assert_eq!(
            action_for_key(Screen::GameOver, KeyCode::Enter),
            Some(Action::Confirm)
        );
        assert_eq!(
            action_for_key(Screen::GameOver, KeyCode::Backspace),
            Some(Action::Backspace)
        );
    }

    #[test]
    fn test_back_from_highscores() {
        assert_eq!(
            action_for_key(Screen::Highscores, KeyCode::Escape),
            Some(Action::Back)
        );
    }
}
