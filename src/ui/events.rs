//! Keyboard event handling for the viewer

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

/// What the viewer loop should do after polling input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Redraw,
    Idle,
}

/// Handles keyboard events for the viewer
pub struct EventHandler {
    tick: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            tick: Duration::from_millis(250),
        }
    }

    /// Wait up to one tick for input
    pub fn next(&mut self) -> io::Result<Action> {
        if !event::poll(self.tick)? {
            return Ok(Action::Idle);
        }

        Ok(match event::read()? {
            Event::Key(key) => Self::handle_key(key),
            Event::Resize(_, _) => Action::Redraw,
            _ => Action::Idle,
        })
    }

    fn handle_key(key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::Idle;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            _ => Action::Idle,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
