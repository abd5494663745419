//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::SoftDrop),

        // Rotation
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('z') | KeyCode::Char('Z') => {
            Some(GameAction::RotateLeft)
        }
        KeyCode::Up
        | KeyCode::Char('e')
        | KeyCode::Char('E')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(GameAction::RotateRight),

        // Manual tick
        KeyCode::Char(' ') => Some(GameAction::Tick),

        _ => None,
    }
}

/// Check if key should close the game.
///
/// `q` rotates, so only Escape and Ctrl-C close.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}
