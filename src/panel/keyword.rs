//! Keyword research panel.
//!
//! Expands a seed keyword into suggestions with search volume, difficulty,
//! CPC, and a competition tier.

use std::sync::Arc;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::error;

use crate::command::{Command, CopyToClipboardCmd};
use crate::model::KeywordResult;
use crate::panel::{Fetched, Panel, PanelUpdate};
use crate::source::DataSource;
use crate::theme::Theme;
use crate::ui::{
    Component, EventResult, Keybinding, Result, Spinner, TextInput, TextInputEvent, format_count,
};

enum KeywordMsg {
    /// The user submitted a query.
    Submit(String),
    /// The data source returned suggestions.
    Loaded(Vec<KeywordResult>),
    /// The fetch failed.
    Failed(String),
    /// Copy the current results as JSON.
    CopyResults,
}

pub struct KeywordPanel {
    source: Arc<dyn DataSource>,
    input: TextInput,
    spinner: Spinner,
    loading: bool,
    results: Option<Fetched<Vec<KeywordResult>>>,
    msg_tx: UnboundedSender<KeywordMsg>,
    msg_rx: UnboundedReceiver<KeywordMsg>,
}

impl KeywordPanel {
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            source,
            input: TextInput::new("Keyword").with_placeholder("Enter keyword..."),
            spinner: Spinner::new("Analyzing keyword..."),
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
    pub fn results(&self) -> Option<&[KeywordResult]> {
        self.results.as_ref().map(|r| r.data.as_slice())
    }

    fn queue(&self, msg: KeywordMsg) {
        let _ = self.msg_tx.send(msg);
    }

    fn process_message(&mut self, msg: KeywordMsg) -> Result<PanelUpdate> {
        match msg {
            KeywordMsg::Submit(raw) => {
                let query = raw.trim();
                if query.is_empty() || self.loading {
                    return Ok(PanelUpdate::Idle);
                }
                self.loading = true;
                Ok(FetchKeywordIdeasCmd {
                    source: Arc::clone(&self.source),
                    keyword: query.to_string(),
                    tx: self.msg_tx.clone(),
                }
                .into())
            }
            KeywordMsg::Loaded(items) => {
                self.loading = false;
                self.results = Some(Fetched::now(items));
                Ok(PanelUpdate::Idle)
            }
            KeywordMsg::Failed(err) => {
                self.loading = false;
                error!(error = %err, "Keyword research failed");
                Ok(PanelUpdate::Idle)
            }
            KeywordMsg::CopyResults => match &self.results {
                Some(results) => {
                    let json = serde_json::to_string_pretty(&results.data)?;
                    Ok(CopyToClipboardCmd::new(json, "keyword results").into())
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
                "Enter a keyword to analyze search volume, difficulty, and competition.",
            );
            return;
        };

        let block = results_block(theme, results.at.format("%H:%M:%S").to_string());

        let header = Row::new(
            ["Keyword", "Volume", "Difficulty", "CPC", "Competition"]
                .into_iter()
                .map(Cell::from),
        )
        .style(
            Style::default()
                .fg(theme.subtext)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = results
            .data
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.keyword.clone()).style(Style::default().fg(theme.text)),
                    Cell::from(format!("{}/mo", format_count(r.search_volume)))
                        .style(Style::default().fg(theme.info)),
                    Cell::from(format!("{}/100", r.difficulty))
                        .style(Style::default().fg(theme.text)),
                    Cell::from(format!("${}", r.cpc)).style(Style::default().fg(theme.text)),
                    Cell::from(r.competition.to_string())
                        .style(theme.competition_style(r.competition)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(11),
            ],
        )
        .header(header)
        .block(block);

        frame.render_widget(table, area);
    }
}

impl Panel for KeywordPanel {
    fn handle_tick(&mut self) {
        if self.loading {
            self.spinner.handle_tick();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        if self.input.focused() {
            match self.input.handle_key(key)? {
                EventResult::Event(TextInputEvent::Submitted(value)) => {
                    self.queue(KeywordMsg::Submit(value));
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
                self.queue(KeywordMsg::Submit(self.input.value().to_string()));
                Ok(EventResult::Consumed)
            }
            KeyCode::Char('y') => {
                self.queue(KeywordMsg::CopyResults);
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
        panel_keybindings(self.input.focused(), "Research keyword")
    }
}

/// Fetch keyword suggestions from the data source.
struct FetchKeywordIdeasCmd {
    source: Arc<dyn DataSource>,
    keyword: String,
    tx: UnboundedSender<KeywordMsg>,
}

#[async_trait]
impl Command for FetchKeywordIdeasCmd {
    fn name(&self) -> String {
        format!("Researching '{}'", self.keyword)
    }

    async fn execute(self: Box<Self>) -> Result<()> {
        match self.source.keyword_ideas(&self.keyword).await {
            Ok(results) => {
                let _ = self.tx.send(KeywordMsg::Loaded(results));
            }
            Err(e) => {
                let _ = self.tx.send(KeywordMsg::Failed(e.to_string()));
            }
        }
        Ok(())
    }
}

/// Bordered block for a result view, titled with the fetch time.
pub(crate) fn results_block(theme: &Theme, fetched_at: String) -> Block<'static> {
    Block::default()
        .title(" Results ")
        .title_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .title_bottom(Line::from(format!(" fetched {fetched_at} ")).right_aligned())
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.surface_bright))
}

/// Placeholder shown before the first request.
pub(crate) fn render_empty_hint(frame: &mut Frame, area: Rect, theme: &Theme, hint: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.surface_bright));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = Paragraph::new(Line::from(Span::styled(
        hint.to_string(),
        Style::default().fg(theme.muted),
    )))
    .centered();
    frame.render_widget(text, inner);
}

/// Standard keybinding hints shared by the three panels.
pub(crate) fn panel_keybindings(input_focused: bool, action: &str) -> Vec<Keybinding> {
    if input_focused {
        vec![
            Keybinding::new("Enter", action),
            Keybinding::new("Esc", "Browse mode"),
            Keybinding::new("Tab", "Next tab"),
        ]
    } else {
        vec![
            Keybinding::new("Enter", action),
            Keybinding::new("i", "Edit query"),
            Keybinding::new("y", "Copy JSON"),
            Keybinding::new("Tab", "Next tab"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use color_eyre::eyre::eyre;
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::model::{CompetitorResult, UrlAnalysisResult};
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

    fn type_query(panel: &mut KeywordPanel, query: &str) {
        for c in query.chars() {
            panel.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    async fn run_commands(update: PanelUpdate) -> usize {
        match update {
            PanelUpdate::Idle => 0,
            PanelUpdate::Run(cmds) => {
                let count = cmds.len();
                for cmd in cmds {
                    cmd.execute().await.unwrap();
                }
                count
            }
        }
    }

    struct FailingSource;

    #[async_trait]
    impl DataSource for FailingSource {
        async fn keyword_ideas(&self, _keyword: &str) -> Result<Vec<KeywordResult>> {
            Err(eyre!("provider unavailable"))
        }

        async fn competitor_overview(&self, _domain: &str) -> Result<CompetitorResult> {
            Err(eyre!("provider unavailable"))
        }

        async fn analyze_url(&self, _url: &str) -> Result<UrlAnalysisResult> {
            Err(eyre!("provider unavailable"))
        }
    }

    #[tokio::test]
    async fn test_submit_fetches_and_stores_results() {
        let mut panel = KeywordPanel::new(instant_source());
        type_query(&mut panel, "shoes");
        panel.handle_key(key(KeyCode::Enter)).unwrap();

        let update = panel.update().unwrap();
        assert!(panel.is_loading());

        assert_eq!(run_commands(update).await, 1);

        panel.update().unwrap();
        assert!(!panel.is_loading());
        let results = panel.results().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].keyword, "shoes");
        assert_eq!(results[1].keyword, "shoes tips");
        assert_eq!(results[2].keyword, "best shoes");
    }

    #[tokio::test]
    async fn test_empty_input_is_a_noop() {
        let mut panel = KeywordPanel::new(instant_source());
        panel.handle_key(key(KeyCode::Enter)).unwrap();

        let update = panel.update().unwrap();
        assert!(matches!(update, PanelUpdate::Idle));
        assert!(!panel.is_loading());
        assert!(panel.results().is_none());
    }

    #[tokio::test]
    async fn test_whitespace_input_is_a_noop() {
        let mut panel = KeywordPanel::new(instant_source());
        type_query(&mut panel, "   ");
        panel.handle_key(key(KeyCode::Enter)).unwrap();

        let update = panel.update().unwrap();
        assert!(matches!(update, PanelUpdate::Idle));
        assert!(!panel.is_loading());
    }

    #[tokio::test]
    async fn test_resubmit_while_loading_is_ignored() {
        let mut panel = KeywordPanel::new(instant_source());
        type_query(&mut panel, "shoes");
        panel.handle_key(key(KeyCode::Enter)).unwrap();
        let first = panel.update().unwrap();
        assert!(panel.is_loading());

        // Second submit arrives while the first is still in flight.
        panel.handle_key(key(KeyCode::Enter)).unwrap();
        let second = panel.update().unwrap();
        assert!(matches!(second, PanelUpdate::Idle));

        assert_eq!(run_commands(first).await, 1);
    }

    #[tokio::test]
    async fn test_failure_clears_loading_and_keeps_old_results() {
        let mut panel = KeywordPanel::new(instant_source());
        type_query(&mut panel, "shoes");
        panel.handle_key(key(KeyCode::Enter)).unwrap();
        run_commands(panel.update().unwrap()).await;
        panel.update().unwrap();
        assert!(panel.results().is_some());

        // Swap in a failing source and re-trigger.
        panel.source = Arc::new(FailingSource);
        panel.handle_key(key(KeyCode::Enter)).unwrap();
        run_commands(panel.update().unwrap()).await;
        panel.update().unwrap();

        assert!(!panel.is_loading());
        // Stale results stay visible after a failed refresh.
        assert_eq!(panel.results().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_copy_without_results_is_a_noop() {
        let mut panel = KeywordPanel::new(instant_source());
        panel.handle_key(key(KeyCode::Esc)).unwrap();
        panel.handle_key(key(KeyCode::Char('y'))).unwrap();
        assert!(matches!(panel.update().unwrap(), PanelUpdate::Idle));
    }

    #[tokio::test]
    async fn test_copy_with_results_emits_clipboard_command() {
        let mut panel = KeywordPanel::new(instant_source());
        type_query(&mut panel, "shoes");
        panel.handle_key(key(KeyCode::Enter)).unwrap();
        run_commands(panel.update().unwrap()).await;
        panel.update().unwrap();

        panel.handle_key(key(KeyCode::Esc)).unwrap();
        panel.handle_key(key(KeyCode::Char('y'))).unwrap();
        match panel.update().unwrap() {
            PanelUpdate::Run(cmds) => {
                assert_eq!(cmds.len(), 1);
                assert!(cmds[0].name().contains("keyword results"));
            }
            PanelUpdate::Idle => panic!("expected a clipboard command"),
        }
    }
}
