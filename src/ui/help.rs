//! Help overlay listing keybindings.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;
use crate::ui::{Component, EventResult, Keybinding, Result, centered};

pub enum HelpEvent {
    Close,
}

pub struct HelpOverlay {
    sections: Vec<(String, Vec<Keybinding>)>,
}

impl HelpOverlay {
    #[must_use]
    pub fn new(sections: Vec<(String, Vec<Keybinding>)>) -> Self {
        Self { sections }
    }
}

impl Component for HelpOverlay {
    type Output = HelpEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        Ok(match key.code {
            KeyCode::Esc | KeyCode::Char('?' | 'q') => HelpEvent::Close.into(),
            _ => EventResult::Consumed,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut lines: Vec<Line> = Vec::new();
        let key_width = self
            .sections
            .iter()
            .flat_map(|(_, kbs)| kbs)
            .map(|kb| kb.key.len())
            .max()
            .unwrap_or(1);

        for (title, keybindings) in &self.sections {
            lines.push(Line::from(Span::styled(
                title.clone(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )));
            for kb in keybindings {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:>key_width$}", kb.key),
                        Style::default().fg(theme.key_hint),
                    ),
                    Span::styled("  ", Style::default()),
                    Span::styled(kb.description.clone(), Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }

        let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
        let popup = centered(area, Constraint::Percentage(50), Constraint::Length(height));

        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Help (Esc to close) ")
            .title_style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.highlight))
            .style(Style::default().bg(theme.base));

        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}
