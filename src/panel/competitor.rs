//! Competitor analysis panel.
//!
//! Domain-level overview: traffic estimate, authority, backlinks, and the
//! keywords and pages the competitor ranks with.

use std::sync::Arc;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::error;

use crate::command::{Command, CopyToClipboardCmd};
use crate::model::CompetitorResult;
use crate::panel::keyword::{panel_keybindings, render_empty_hint, results_block};
use crate::panel::{Fetched, Panel, PanelUpdate};
use crate::source::DataSource;
use crate::theme::Theme;
use crate::ui::{
    Component, EventResult, Keybinding, Result, Spinner, TextInput, TextInputEvent, format_count,
};

enum CompetitorMsg {
    Submit(String),
    Loaded(Box<CompetitorResult>),
    Failed(String),
    CopyResults,
}

pub struct CompetitorPanel {
    source: Arc<dyn DataSource>,
    input: TextInput,
    spinner: Spinner,
    loading: bool,
    results: Option<Fetched<CompetitorResult>>,
    msg_tx: UnboundedSender<CompetitorMsg>,
    msg_rx: UnboundedReceiver<CompetitorMsg>,
}

impl CompetitorPanel {
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            source,
            input: TextInput::new("Domain").with_placeholder("Enter domain (e.g., example.com)"),
            spinner: Spinner::new("Analyzing competitor..."),
            loading: false,
            results: None,
            msg_tx,
            msg_rx,
        }
    }

    #[cfg(test)]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[cfg(test)]
    pub fn results(&self) -> Option<&CompetitorResult> {
        self.results.as_ref().map(|r| &r.data)
    }

    fn queue(&self, msg: CompetitorMsg) {
        let _ = self.msg_tx.send(msg);
    }

    fn process_message(&mut self, msg: CompetitorMsg) -> Result<PanelUpdate> {
        match msg {
            CompetitorMsg::Submit(raw) => {
                let domain = raw.trim();
                if domain.is_empty() || self.loading {
                    return Ok(PanelUpdate::Idle);
                }
                self.loading = true;
                Ok(FetchCompetitorCmd {
                    source: Arc::clone(&self.source),
                    domain: domain.to_string(),
                    tx: self.msg_tx.clone(),
                }
                .into())
            }
            CompetitorMsg::Loaded(result) => {
                self.loading = false;
                self.results = Some(Fetched::now(*result));
                Ok(PanelUpdate::Idle)
            }
            CompetitorMsg::Failed(err) => {
                self.loading = false;
                error!(error = %err, "Competitor analysis failed");
                Ok(PanelUpdate::Idle)
            }
            CompetitorMsg::CopyResults => match &self.results {
                Some(results) => {
                    let json = serde_json::to_string_pretty(&results.data)?;
                    Ok(CopyToClipboardCmd::new(json, "competitor overview").into())
                }
                None => Ok(PanelUpdate::Idle),
            },
        }
    }

    fn render_results(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(results) = &self.results else {
            render_empty_hint(
                frame,
                area,
                theme,
                "Enter a competitor's domain to analyze their SEO performance.",
            );
            return;
        };

        let block = results_block(theme, results.at.format("%H:%M:%S").to_string());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [overview_area, keywords_area, pages_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .areas(inner);

        Self::render_overview(frame, overview_area, theme, &results.data);
        Self::render_top_keywords(frame, keywords_area, theme, &results.data);
        Self::render_top_pages(frame, pages_area, theme, &results.data);
    }

    fn render_overview(frame: &mut Frame, area: Rect, theme: &Theme, results: &CompetitorResult) {
        let stat = |label: &str, value: String, color| {
            vec![
                Span::styled(format!("{label}: "), Style::default().fg(theme.muted)),
                Span::styled(
                    value,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
            ]
        };

        let mut spans = Vec::new();
        spans.extend(stat(
            "Monthly Traffic",
            format_count(results.traffic_estimate),
            theme.info,
        ));
        spans.extend(stat(
            "Domain Authority",
            results.domain_authority.to_string(),
            theme.low,
        ));
        spans.extend(stat(
            "Backlinks",
            format_count(results.backlinks),
            theme.accent,
        ));
        spans.extend(stat(
            "Top Keywords",
            format!("{}+", results.top_keywords.len()),
            theme.key_hint,
        ));

        let lines = vec![
            Line::from(Span::styled(
                results.domain.clone(),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(spans),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_top_keywords(
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        results: &CompetitorResult,
    ) {
        let header = Row::new(
            ["Top Keywords", "Position", "Volume", "Traffic"]
                .into_iter()
                .map(Cell::from),
        )
        .style(
            Style::default()
                .fg(theme.subtext)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = results
            .top_keywords
            .iter()
            .map(|kw| {
                Row::new(vec![
                    Cell::from(kw.keyword.clone()).style(Style::default().fg(theme.text)),
                    Cell::from(format!("#{}", kw.position))
                        .style(Style::default().fg(theme.key_hint)),
                    Cell::from(format!("{}/mo", format_count(kw.search_volume)))
                        .style(Style::default().fg(theme.info)),
                    Cell::from(format!("{} visits", format_count(kw.traffic)))
                        .style(Style::default().fg(theme.text)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(12),
                Constraint::Length(14),
            ],
        )
        .header(header);

        frame.render_widget(table, area);
    }

    fn render_top_pages(frame: &mut Frame, area: Rect, theme: &Theme, results: &CompetitorResult) {
        let mut lines = vec![Line::from(Span::styled(
            "Top Pages",
            Style::default()
                .fg(theme.subtext)
                .add_modifier(Modifier::BOLD),
        ))];
        for page in &results.top_pages {
            lines.push(Line::from(vec![
                Span::styled(page.url.clone(), Style::default().fg(theme.info)),
                Span::styled(
                    format!(
                        "  {} monthly visits · {} ranking keywords",
                        format_count(page.traffic),
                        page.keywords
                    ),
                    Style::default().fg(theme.muted),
                ),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Panel for CompetitorPanel {
    fn handle_tick(&mut self) {
        if self.loading {
            self.spinner.handle_tick();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        if self.input.focused() {
            match self.input.handle_key(key)? {
                EventResult::Event(TextInputEvent::Submitted(value)) => {
                    self.queue(CompetitorMsg::Submit(value));
                    return Ok(EventResult::Consumed);
                }
                EventResult::Consumed => return Ok(EventResult::Consumed),
                EventResult::Ignored => {}
            }
            if key.code == KeyCode::Esc {
                self.input.set_focused(false);
                return Ok(EventResult::Consumed);
            }
            return Ok(EventResult::Ignored);
        }

        match key.code {
            KeyCode::Char('i' | '/') => {
                self.input.set_focused(true);
                Ok(EventResult::Consumed)
            }
            KeyCode::Enter => {
                self.queue(CompetitorMsg::Submit(self.input.value().to_string()));
                Ok(EventResult::Consumed)
            }
            KeyCode::Char('y') => {
                self.queue(CompetitorMsg::CopyResults);
                Ok(EventResult::Consumed)
            }
            _ => Ok(EventResult::Ignored),
        }
    }

    fn handle_paste(&mut self, text: &str) {
        if self.input.focused() {
            self.input.insert_str(text);
        }
    }

    fn update(&mut self) -> Result<PanelUpdate> {
        let mut commands: Vec<Box<dyn Command>> = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            if let PanelUpdate::Run(cmds) = self.process_message(msg)? {
                commands.extend(cmds);
            }
        }
        if commands.is_empty() {
            Ok(PanelUpdate::Idle)
        } else {
            Ok(PanelUpdate::Run(commands))
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [input_area, results_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        self.input.render(frame, input_area, theme);

        if self.loading {
            self.spinner.render(frame, results_area, theme);
        } else {
            self.render_results(frame, results_area, theme);
        }
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        panel_keybindings(self.input.focused(), "Analyze domain")
    }
}

/// Fetch a competitor overview from the data source.
struct FetchCompetitorCmd {
    source: Arc<dyn DataSource>,
    domain: String,
    tx: UnboundedSender<CompetitorMsg>,
}

#[async_trait]
impl Command for FetchCompetitorCmd {
    fn name(&self) -> String {
        format!("Analyzing '{}'", self.domain)
    }

    async fn execute(self: Box<Self>) -> Result<()> {
        match self.source.competitor_overview(&self.domain).await {
            Ok(result) => {
                let _ = self.tx.send(CompetitorMsg::Loaded(Box::new(result)));
            }
            Err(e) => {
                let _ = self.tx.send(CompetitorMsg::Failed(e.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::source::{Delays, MockSource};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn instant_source() -> Arc<dyn DataSource> {
        Arc::new(MockSource::with_delays(Delays {
            keyword: std::time::Duration::ZERO,
            competitor: std::time::Duration::ZERO,
            url: std::time::Duration::ZERO,
        }))
    }

    async fn submit_and_resolve(panel: &mut CompetitorPanel, query: &str) {
        for c in query.chars() {
            panel.handle_key(key(KeyCode::Char(c))).unwrap();
        }
        panel.handle_key(key(KeyCode::Enter)).unwrap();
        if let PanelUpdate::Run(cmds) = panel.update().unwrap() {
            for cmd in cmds {
                cmd.execute().await.unwrap();
            }
        }
        panel.update().unwrap();
    }

    #[tokio::test]
    async fn test_analysis_stores_result_for_domain() {
        let mut panel = CompetitorPanel::new(instant_source());
        submit_and_resolve(&mut panel, "example.com").await;

        assert!(!panel.is_loading());
        let results = panel.results().unwrap();
        assert_eq!(results.domain, "example.com");
        assert_eq!(results.top_pages.len(), 2);
        for page in &results.top_pages {
            assert!(page.url.contains("example.com"));
        }
    }

    #[tokio::test]
    async fn test_blank_domain_never_starts_loading() {
        let mut panel = CompetitorPanel::new(instant_source());
        panel.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(matches!(panel.update().unwrap(), PanelUpdate::Idle));
        assert!(!panel.is_loading());
        assert!(panel.results().is_none());
    }

    #[tokio::test]
    async fn test_input_is_trimmed_before_fetch() {
        let mut panel = CompetitorPanel::new(instant_source());
        submit_and_resolve(&mut panel, "  example.com  ").await;
        assert_eq!(panel.results().unwrap().domain, "example.com");
    }
}
