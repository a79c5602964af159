//! Theme selection overlay.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, ListItem};

use crate::theme::{Theme, ThemeInfo, available_themes};
use crate::ui::{Component, EventResult, List, ListEvent, ListRow, Result, centered};

impl ListRow for ThemeInfo {
    fn render_row(&self, theme: &Theme) -> ListItem<'static> {
        ListItem::new(self.name).style(Style::default().fg(theme.text))
    }
}

pub enum ThemeEvent {
    Cancelled,
    Selected(ThemeInfo),
}

pub struct ThemeSelector {
    list: List<ThemeInfo>,
}

impl ThemeSelector {
    #[must_use]
    pub fn new() -> Self {
        Self {
            list: List::new(available_themes()),
        }
    }
}

impl Default for ThemeSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ThemeSelector {
    type Output = ThemeEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('t')) {
            return Ok(ThemeEvent::Cancelled.into());
        }

        let result = self.list.handle_key(key)?;
        Ok(match result {
            EventResult::Event(ListEvent::Activated(info)) => ThemeEvent::Selected(info).into(),
            EventResult::Consumed => EventResult::Consumed,
            EventResult::Ignored => EventResult::Consumed,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered(area, Constraint::Percentage(40), Constraint::Length(8));

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Select Theme (Enter to confirm, Esc to cancel) ")
            .title_style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.highlight))
            .style(Style::default().bg(theme.base));

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        self.list.render(frame, inner, theme);
    }
}
