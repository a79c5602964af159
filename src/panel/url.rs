//! URL analyzer panel.
//!
//! On-page audit of a single URL: title and meta description, structure
//! counts, and the keywords extracted from the page.

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
use crate::model::{Competition, UrlAnalysisResult};
use crate::panel::keyword::{panel_keybindings, render_empty_hint, results_block};
use crate::panel::{Fetched, Panel, PanelUpdate};
use crate::source::DataSource;
use crate::theme::Theme;
use crate::ui::{
    Component, EventResult, Keybinding, Result, Spinner, TextInput, TextInputEvent, format_count,
};

enum UrlMsg {
    Submit(String),
    Loaded(Box<UrlAnalysisResult>),
    Failed(String),
    CopyResults,
}

pub struct UrlPanel {
    source: Arc<dyn DataSource>,
    input: TextInput,
    spinner: Spinner,
    loading: bool,
    results: Option<Fetched<UrlAnalysisResult>>,
    msg_tx: UnboundedSender<UrlMsg>,
    msg_rx: UnboundedReceiver<UrlMsg>,
}

impl UrlPanel {
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            source,
            input: TextInput::new("URL").with_placeholder("Enter URL (e.g., https://example.com/page)"),
            spinner: Spinner::new("Analyzing URL..."),
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
    pub fn results(&self) -> Option<&UrlAnalysisResult> {
        self.results.as_ref().map(|r| &r.data)
    }

    fn queue(&self, msg: UrlMsg) {
        let _ = self.msg_tx.send(msg);
    }

    fn process_message(&mut self, msg: UrlMsg) -> Result<PanelUpdate> {
        match msg {
            UrlMsg::Submit(raw) => {
                let url = raw.trim();
                if url.is_empty() || self.loading {
                    return Ok(PanelUpdate::Idle);
                }
                self.loading = true;
                Ok(AnalyzeUrlCmd {
                    source: Arc::clone(&self.source),
                    url: url.to_string(),
                    tx: self.msg_tx.clone(),
                }
                .into())
            }
            UrlMsg::Loaded(result) => {
                self.loading = false;
                self.results = Some(Fetched::now(*result));
                Ok(PanelUpdate::Idle)
            }
            UrlMsg::Failed(err) => {
                self.loading = false;
                error!(error = %err, "URL analysis failed");
                Ok(PanelUpdate::Idle)
            }
            UrlMsg::CopyResults => match &self.results {
                Some(results) => {
                    let json = serde_json::to_string_pretty(&results.data)?;
                    Ok(CopyToClipboardCmd::new(json, "URL analysis").into())
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
                "Enter a URL to audit its on-page SEO and extracted keywords.",
            );
            return;
        };

        let block = results_block(theme, results.at.format("%H:%M:%S").to_string());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [overview_area, keywords_area] =
            Layout::vertical([Constraint::Length(6), Constraint::Min(4)]).areas(inner);

        Self::render_overview(frame, overview_area, theme, &results.data);
        Self::render_keywords(frame, keywords_area, theme, &results.data);
    }

    fn render_overview(frame: &mut Frame, area: Rect, theme: &Theme, results: &UrlAnalysisResult) {
        let label = |text: String| Span::styled(text, Style::default().fg(theme.muted));
        let value = |text: String| Span::styled(text, Style::default().fg(theme.text));

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    results.title.clone(),
                    Style::default()
                        .fg(theme.highlight)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", results.url),
                    Style::default().fg(theme.muted),
                ),
            ]),
            Line::from(value(results.meta_description.clone())),
            Line::from(""),
            Line::from(vec![
                label("Words: ".to_string()),
                value(format_count(results.word_count)),
                label("   Headings: ".to_string()),
                value(format!(
                    "{} H1 / {} H2 / {} H3",
                    results.headings.h1, results.headings.h2, results.headings.h3
                )),
                label("   Images: ".to_string()),
                value(results.images.to_string()),
                label("   Links: ".to_string()),
                value(format!(
                    "{} internal / {} external",
                    results.links.internal, results.links.external
                )),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_keywords(frame: &mut Frame, area: Rect, theme: &Theme, results: &UrlAnalysisResult) {
        let header = Row::new(
            ["Extracted Keywords", "Frequency", "Density", "Volume", "Competition"]
                .into_iter()
                .map(Cell::from),
        )
        .style(
            Style::default()
                .fg(theme.subtext)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = results
            .extracted_keywords
            .iter()
            .map(|kw| {
                let competition = Competition::from_difficulty(kw.difficulty);
                Row::new(vec![
                    Cell::from(kw.keyword.clone()).style(Style::default().fg(theme.text)),
                    Cell::from(format!("{}x", kw.frequency)).style(Style::default().fg(theme.text)),
                    Cell::from(format!("{}%", kw.density)).style(Style::default().fg(theme.info)),
                    Cell::from(format!("{}/mo", format_count(kw.search_volume)))
                        .style(Style::default().fg(theme.info)),
                    Cell::from(competition.to_string()).style(theme.competition_style(competition)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(10),
                Constraint::Length(9),
                Constraint::Length(12),
                Constraint::Length(11),
            ],
        )
        .header(header);

        frame.render_widget(table, area);
    }
}

impl Panel for UrlPanel {
    fn handle_tick(&mut self) {
        if self.loading {
            self.spinner.handle_tick();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        if self.input.focused() {
            match self.input.handle_key(key)? {
                EventResult::Event(TextInputEvent::Submitted(value)) => {
                    self.queue(UrlMsg::Submit(value));
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
                self.queue(UrlMsg::Submit(self.input.value().to_string()));
                Ok(EventResult::Consumed)
            }
            KeyCode::Char('y') => {
                self.queue(UrlMsg::CopyResults);
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
        panel_keybindings(self.input.focused(), "Analyze URL")
    }
}

/// Run an on-page audit through the data source.
struct AnalyzeUrlCmd {
    source: Arc<dyn DataSource>,
    url: String,
    tx: UnboundedSender<UrlMsg>,
}

#[async_trait]
impl Command for AnalyzeUrlCmd {
    fn name(&self) -> String {
        format!("Analyzing '{}'", self.url)
    }

    async fn execute(self: Box<Self>) -> Result<()> {
        match self.source.analyze_url(&self.url).await {
            Ok(result) => {
                let _ = self.tx.send(UrlMsg::Loaded(Box::new(result)));
            }
            Err(e) => {
                let _ = self.tx.send(UrlMsg::Failed(e.to_string()));
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

    async fn submit_and_resolve(panel: &mut UrlPanel, query: &str) {
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
    async fn test_analysis_stores_result_for_url() {
        let mut panel = UrlPanel::new(instant_source());
        submit_and_resolve(&mut panel, "https://example.com/page").await;

        assert!(!panel.is_loading());
        let results = panel.results().unwrap();
        assert_eq!(results.url, "https://example.com/page");
        assert_eq!(results.title, "Sample Page Title - SEO Optimized");
        assert_eq!(results.extracted_keywords.len(), 3);
    }

    #[tokio::test]
    async fn test_blank_url_never_starts_loading() {
        let mut panel = UrlPanel::new(instant_source());
        panel.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(matches!(panel.update().unwrap(), PanelUpdate::Idle));
        assert!(!panel.is_loading());
        assert!(panel.results().is_none());
    }

    #[tokio::test]
    async fn test_new_analysis_replaces_previous_result() {
        let mut panel = UrlPanel::new(instant_source());
        submit_and_resolve(&mut panel, "https://a.test/one").await;
        assert_eq!(panel.results().unwrap().url, "https://a.test/one");

        for _ in 0.."https://a.test/one".len() {
            panel.handle_key(key(KeyCode::Backspace)).unwrap();
        }
        submit_and_resolve(&mut panel, "https://b.test/two").await;
        assert_eq!(panel.results().unwrap().url, "https://b.test/two");
    }
}
