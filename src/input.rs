//! Translation of terminal events into game commands.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Quit,
}

/// Map one terminal event to a command, if it means anything to the game.
///
/// Key repeats count as presses so holding an arrow keeps the ship moving.
/// Ctrl-C stands in for closing the window since raw mode swallows SIGINT.
pub fn translate(event: &Event) -> Option<Command> {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press | KeyEventKind::Repeat,
            ..
        }) => match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
            KeyCode::Char(' ') => Some(Command::Fire),
            KeyCode::Esc => Some(Command::Quit),
            KeyCode::Left => Some(Command::Left),
            KeyCode::Right => Some(Command::Right),
            KeyCode::Up => Some(Command::Up),
            KeyCode::Down => Some(Command::Down),
            other => {
                debug!(key = ?other, "unhandled key");
                None
            }
        },
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(_),
            ..
        }) => Some(Command::Fire),
        Event::Key(_)
        | Event::Mouse(_)
        | Event::Resize(..)
        | Event::FocusGained
        | Event::FocusLost => None,
        #[allow(unreachable_patterns)]
        other => {
            debug!(event = ?other, "unknown event");
            None
        }
    }
}
