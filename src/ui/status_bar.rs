//! Bottom status bar with context info, key hints, and logo.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tab::TabId;
use crate::theme::Theme;
use crate::ui::Keybinding;

const LOGO: &[&str] = &[
    r"                     ",
    r"   ((o))  seoscope   ",
    r"    /|\   keywords,  ",
    r"   / | \  rankings   ",
    r"                     ",
];

pub struct StatusBar;

impl StatusBar {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        active: TabId,
        hints: &[Keybinding],
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.surface_bright));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(30),
                Constraint::Min(20),
                Constraint::Length(22),
            ])
            .split(inner);

        Self::render_tab_info(frame, chunks[0], theme, active);
        Self::render_hints(frame, chunks[1], theme, hints);
        Self::render_logo(frame, chunks[2], theme);
    }

    fn render_tab_info(frame: &mut Frame, area: Rect, theme: &Theme, active: TabId) {
        let lines = vec![
            Line::from(Span::styled(
                active.title(),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("     tab  ", Style::default().fg(theme.muted)),
                Span::styled(active.slug(), Style::default().fg(theme.text)),
            ]),
            Line::from(vec![
                Span::styled("  source  ", Style::default().fg(theme.muted)),
                Span::styled("mock", Style::default().fg(theme.info)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_hints(frame: &mut Frame, area: Rect, theme: &Theme, hints: &[Keybinding]) {
        if hints.is_empty() {
            return;
        }

        // Align keys right and descriptions left so the separators line up.
        let max_key_w = hints.iter().map(|kb| kb.key.len()).max().unwrap_or(1);
        let max_desc_w = hints
            .iter()
            .map(|kb| kb.description.len())
            .max()
            .unwrap_or(1);
        let col_width = u16::try_from(max_key_w + 3 + max_desc_w + 2).unwrap_or(u16::MAX);
        let num_cols = (area.width / col_width).max(1) as usize;
        let num_rows = area.height as usize;

        let mut columns: Vec<Vec<Line>> = vec![Vec::new(); num_cols];
        for (i, kb) in hints.iter().enumerate() {
            let col_idx = i / num_rows.max(1);
            if col_idx >= num_cols {
                break;
            }
            columns[col_idx].push(Line::from(vec![
                Span::styled(
                    format!("{:>max_key_w$}", kb.key),
                    Style::default().fg(theme.key_hint),
                ),
                Span::styled(" │ ", Style::default().fg(theme.surface_bright)),
                Span::styled(kb.description.clone(), Style::default().fg(theme.subtext)),
            ]));
        }

        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(col_width); num_cols])
            .split(area);

        for (col_idx, col_lines) in columns.into_iter().enumerate() {
            if col_idx < col_areas.len() {
                frame.render_widget(Paragraph::new(col_lines), col_areas[col_idx]);
            }
        }
    }

    fn render_logo(frame: &mut Frame, area: Rect, theme: &Theme) {
        let lines: Vec<Line> = LOGO
            .iter()
            .map(|line| {
                Line::from(Span::styled(
                    *line,
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }
}
