//! Keyboard classification.

use connect_log2_engine::{Direction, GamePhase, Intent, TilePos};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the front-end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward to the game.
    Play(Intent),
    /// Toggle the high-score table.
    ShowScores,
}

/// Maps a key press to an action for the current phase.
///
/// Keys that mean nothing in `phase` give `None`.
pub fn key_action(key: KeyEvent, phase: GamePhase, cursor: TilePos) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') => Some(KeyAction::Play(Intent::RequestQuit)),
            KeyCode::Char('n') => Some(KeyAction::Play(Intent::RequestReset)),
            KeyCode::Char('s') => Some(KeyAction::ShowScores),
            _ => None,
        };
    }

    let intent = match phase {
        GamePhase::Playing => match key.code {
            KeyCode::Char(' ') => Intent::StartOrExtend(cursor),
            KeyCode::Enter => Intent::Commit,
            KeyCode::Esc => Intent::Cancel,
            code => Intent::Navigate(navigation(code)?),
        },
        GamePhase::AwaitingQuitConfirmation => match key.code {
            KeyCode::Char('q') => Intent::Confirm,
            KeyCode::Char('s') => Intent::SaveAndQuit,
            KeyCode::Char('c') | KeyCode::Esc => Intent::Resume,
            _ => return None,
        },
        GamePhase::AwaitingResetConfirmation => match key.code {
            KeyCode::Char('y') => Intent::Confirm,
            KeyCode::Char('n') | KeyCode::Esc => Intent::Resume,
            _ => return None,
        },
        GamePhase::AwaitingNoMovesDecision => match key.code {
            KeyCode::Char('q') => Intent::Confirm,
            KeyCode::Char('n') => Intent::RequestReset,
            _ => return None,
        },
    };
    Some(KeyAction::Play(intent))
}

/// Arrow keys, plus WASD for keyboards without them.
fn navigation(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}
