//! Selectable list used by overlays.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{List as RatatuiList, ListItem, ListState};

use crate::theme::Theme;
use crate::ui::{Component, EventResult, Result};

pub enum ListEvent<T> {
    Activated(T),
}

pub trait ListRow {
    fn render_row(&self, theme: &Theme) -> ListItem<'static>;
}

pub struct List<T: ListRow + Clone> {
    items: Vec<T>,
    state: ListState,
}

impl<T: ListRow + Clone> List<T> {
    pub fn new(items: Vec<T>) -> Self {
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }
        Self { items, state }
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }
}

impl<T: ListRow + Clone> Component for List<T> {
    type Output = ListEvent<T>;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.select_next();
                Ok(EventResult::Consumed)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.select_previous();
                Ok(EventResult::Consumed)
            }
            KeyCode::Home => {
                self.state.select_first();
                Ok(EventResult::Consumed)
            }
            KeyCode::End => {
                self.state.select_last();
                Ok(EventResult::Consumed)
            }
            KeyCode::Enter => Ok(self.selected().cloned().map_or(
                EventResult::Ignored,
                |item| ListEvent::Activated(item).into(),
            )),
            _ => Ok(EventResult::Ignored),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = self.items.iter().map(|i| i.render_row(theme)).collect();

        let list = RatatuiList::new(items)
            .highlight_style(
                Style::default()
                    .bg(theme.surface)
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}
