//! Research panel trait.
//!
//! Panels follow the Elm architecture with a single-funnel update pattern:
//! input handlers queue messages onto the panel's channel, and `update()` is
//! the only place that processes them and emits commands. Fetch commands
//! send their outcome back through the same channel, so the loading flag is
//! set and cleared in exactly one place.

pub mod competitor;
pub mod keyword;
pub mod url;

use chrono::{DateTime, Local};
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::command::Command;
use crate::theme::Theme;
use crate::ui::{EventResult, Keybinding, Result};

/// Result from a panel `update()`.
pub enum PanelUpdate {
    /// Nothing to do.
    Idle,
    /// Spawn these commands.
    Run(Vec<Box<dyn Command>>),
}

impl<T: Command> From<T> for PanelUpdate {
    fn from(value: T) -> Self {
        Self::Run(vec![Box::new(value)])
    }
}

/// One research tab.
///
/// The app calls methods in this order:
/// 1. `handle_key()`/`handle_paste()` on input events; if consumed,
///    `update()` right after
/// 2. `handle_tick()` on each tick
/// 3. `update()` again whenever one of the panel's commands completes
pub trait Panel {
    /// Handle a tick event for animations.
    fn handle_tick(&mut self) {}

    /// Handle a key event. Queue internal messages; return whether the key
    /// was consumed.
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>>;

    /// Handle pasted text (bracketed paste).
    fn handle_paste(&mut self, text: &str) {
        _ = text;
    }

    /// Process all queued messages. The single funnel: only this method may
    /// change the loading flag, store results, or emit commands.
    ///
    /// # Errors
    /// Returns an error if message processing fails; the app logs it.
    fn update(&mut self) -> Result<PanelUpdate>;

    /// Render the panel to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Keybindings for the status bar and help overlay.
    fn keybindings(&self) -> Vec<Keybinding> {
        vec![]
    }
}

/// A result set together with the time it was produced.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    pub at: DateTime<Local>,
}

impl<T> Fetched<T> {
    pub fn now(data: T) -> Self {
        Self {
            data,
            at: Local::now(),
        }
    }
}
