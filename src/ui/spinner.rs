//! Loading spinner shown while a fetch is in flight.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use throbber_widgets_tui::WhichUse::Spin;
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, ThrobberState};

use crate::theme::Theme;
use crate::ui::{Component, centered};

pub struct Spinner {
    throbber_state: ThrobberState,
    label: &'static str,
}

impl Spinner {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            throbber_state: ThrobberState::default(),
            label,
        }
    }
}

impl Component for Spinner {
    type Output = ();

    fn handle_tick(&mut self) {
        self.throbber_state.calc_next();
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let throbber = Throbber::default()
            .throbber_set(BRAILLE_SIX)
            .use_type(Spin)
            .label(self.label)
            .throbber_style(Style::default().fg(theme.highlight))
            .style(Style::default().fg(theme.subtext));

        // 1 cell for the throbber, 1 space, then the label.
        let width = u16::try_from(self.label.len() + 2).unwrap_or(u16::MAX);
        let area = centered(area, Constraint::Length(width), Constraint::Length(1));

        frame.render_stateful_widget(throbber, area, &mut self.throbber_state);
    }
}
