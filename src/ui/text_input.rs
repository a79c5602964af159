//! Single-line inline text input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::theme::Theme;
use crate::ui::{Component, EventResult, Result};

pub enum TextInputEvent {
    /// Enter was pressed with the current value.
    Submitted(String),
}

/// An inline single-line text field with emacs-ish editing keys.
///
/// Esc, Tab and function keys are left for the parent to interpret; printable
/// characters and editing keys are consumed.
pub struct TextInput {
    label: String,
    value: String,
    cursor: usize,
    placeholder: Option<String>,
    focused: bool,
}

impl TextInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            cursor: 0,
            placeholder: None,
            focused: true,
        }
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Insert pasted text at the cursor, dropping control characters.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
    }

    fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn delete_char_before_cursor(&mut self) {
        if let Some((offset, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.value.remove(offset);
            self.cursor = offset;
        }
    }

    fn delete_char_at_cursor(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    fn move_cursor_left(&mut self) {
        if let Some((offset, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.cursor = offset;
        }
    }

    fn move_cursor_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    const fn move_cursor_start(&mut self) {
        self.cursor = 0;
    }

    const fn move_cursor_end(&mut self) {
        self.cursor = self.value.len();
    }

    fn delete_word_before_cursor(&mut self) {
        let before = &self.value[..self.cursor];
        let trimmed = before.trim_end_matches(' ');
        let word_start = trimmed.rfind(' ').map_or(0, |i| i + 1);
        self.value.drain(word_start..self.cursor);
        self.cursor = word_start;
    }

    fn clear_line(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

impl Component for TextInput {
    type Output = TextInputEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        Ok(match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => TextInputEvent::Submitted(self.value.clone()).into(),

            (KeyCode::Backspace, KeyModifiers::ALT) | (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                self.delete_word_before_cursor();
                EventResult::Consumed
            }
            (KeyCode::Backspace, _) => {
                self.delete_char_before_cursor();
                EventResult::Consumed
            }
            (KeyCode::Delete, _) => {
                self.delete_char_at_cursor();
                EventResult::Consumed
            }

            (KeyCode::Left, _) => {
                self.move_cursor_left();
                EventResult::Consumed
            }
            (KeyCode::Right, _) => {
                self.move_cursor_right();
                EventResult::Consumed
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.move_cursor_start();
                EventResult::Consumed
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.move_cursor_end();
                EventResult::Consumed
            }

            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.clear_line();
                EventResult::Consumed
            }

            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert_char(c);
                EventResult::Consumed
            }

            // Esc, Tab, and anything else belongs to the parent.
            _ => EventResult::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border_color = if self.focused {
            theme.highlight
        } else {
            theme.surface_bright
        };
        let block = Block::default()
            .title(format!(" {} ", self.label))
            .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border_color));

        let input_style = Style::default().fg(theme.text);
        let cursor_style = Style::default()
            .fg(theme.base)
            .bg(theme.text)
            .add_modifier(Modifier::BOLD);

        let line = if self.value.is_empty() {
            let placeholder = self.placeholder.clone().unwrap_or_default();
            let mut spans = Vec::new();
            if self.focused {
                spans.push(Span::styled(" ", cursor_style));
            }
            spans.push(Span::styled(
                placeholder,
                Style::default().fg(theme.muted),
            ));
            Line::from(spans)
        } else if self.focused {
            let (before, after) = self.value.split_at(self.cursor);
            let cursor_char = after.chars().next().unwrap_or(' ');
            let rest: String = after.chars().skip(1).collect();
            Line::from(vec![
                Span::styled(before.to_string(), input_style),
                Span::styled(cursor_char.to_string(), cursor_style),
                Span::styled(rest, input_style),
            ])
        } else {
            Line::from(Span::styled(self.value.clone(), input_style))
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(input: &mut TextInput, s: &str) {
        for c in s.chars() {
            input.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_typing_and_submit() {
        let mut input = TextInput::new("Keyword");
        type_str(&mut input, "shoes");
        assert_eq!(input.value(), "shoes");

        let result = input.handle_key(key(KeyCode::Enter)).unwrap();
        match result {
            EventResult::Event(TextInputEvent::Submitted(value)) => assert_eq!(value, "shoes"),
            _ => panic!("expected submit event"),
        }
        // Value survives submission so the query can be re-run.
        assert_eq!(input.value(), "shoes");
    }

    #[test]
    fn test_backspace_and_cursor_movement() {
        let mut input = TextInput::new("Keyword");
        type_str(&mut input, "shoes");
        input.handle_key(key(KeyCode::Backspace)).unwrap();
        assert_eq!(input.value(), "shoe");

        input.handle_key(key(KeyCode::Left)).unwrap();
        input.handle_key(key(KeyCode::Left)).unwrap();
        input.handle_key(key(KeyCode::Char('l'))).unwrap();
        assert_eq!(input.value(), "shloe");
    }

    #[test]
    fn test_clear_line_and_delete_word() {
        let mut input = TextInput::new("Keyword");
        type_str(&mut input, "running shoes");
        input.handle_key(ctrl('w')).unwrap();
        assert_eq!(input.value(), "running ");

        input.handle_key(ctrl('u')).unwrap();
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_paste_strips_control_chars() {
        let mut input = TextInput::new("URL");
        input.insert_str("https://example.com\n/page");
        assert_eq!(input.value(), "https://example.com/page");
    }

    #[test]
    fn test_esc_and_tab_are_ignored() {
        let mut input = TextInput::new("Keyword");
        assert!(!input.handle_key(key(KeyCode::Esc)).unwrap().is_consumed());
        assert!(!input.handle_key(key(KeyCode::Tab)).unwrap().is_consumed());
    }
}
