//! Reusable UI building blocks.
//!
//! Components handle input and emit generic outputs; they know nothing about
//! SEO data. Panels translate component events into domain messages.

mod help;
mod list;
mod spinner;
mod status_bar;
mod text_input;
mod theme_selector;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};

pub use color_eyre::Result;
pub use help::{HelpEvent, HelpOverlay};
pub use list::{List, ListEvent, ListRow};
pub use spinner::Spinner;
pub use status_bar::StatusBar;
pub use text_input::{TextInput, TextInputEvent};
pub use theme_selector::{ThemeEvent, ThemeSelector};

use crate::theme::Theme;

/// Result of handling an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult<E> {
    /// Input was not handled, parent should process it.
    Ignored,
    /// Input was consumed but produced no event.
    Consumed,
    /// Input was consumed and produced an event.
    Event(E),
}

impl<E> EventResult<E> {
    /// Returns true if the input was consumed (with or without an event).
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

impl<E> From<E> for EventResult<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// Interactive UI building block.
pub trait Component {
    /// The output type produced by this component.
    type Output;

    /// Handle a key event.
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        _ = key;
        Ok(EventResult::Ignored)
    }

    /// Called on each tick for animations and time-based updates.
    fn handle_tick(&mut self) {}

    /// Render the component to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}

/// A key hint shown in the status bar and help overlay.
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: String,
    pub description: String,
}

impl Keybinding {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}

/// Center a fixed-size area within `area`.
#[must_use]
pub fn centered(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
    area
}

/// Format an integer with thousands separators, e.g. `12345` -> `"12,345"`.
#[must_use]
pub fn format_count(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(12_345), "12,345");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_event_result_consumed() {
        assert!(!EventResult::<()>::Ignored.is_consumed());
        assert!(EventResult::<()>::Consumed.is_consumed());
        assert!(EventResult::Event(()).is_consumed());
    }
}
