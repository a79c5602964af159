//! Application orchestrator.
//!
//! Owns the three panels, the active tab, and the optional overlay. Runs the
//! main loop: terminal events in, panel updates out, commands spawned onto
//! the tokio runtime. Completed commands report back through a message so
//! the owning panel is drained even if the user switched tabs meanwhile.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Tabs};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

use crate::command::Command;
use crate::config;
use crate::panel::competitor::CompetitorPanel;
use crate::panel::keyword::KeywordPanel;
use crate::panel::url::UrlPanel;
use crate::panel::{Panel, PanelUpdate};
use crate::source::DataSource;
use crate::tab::TabId;
use crate::theme::{Theme, theme_from_name};
use crate::tui::{Event, Tui};
use crate::ui::{
    Component, EventResult, HelpEvent, HelpOverlay, Keybinding, Result, StatusBar, ThemeEvent,
    ThemeSelector,
};

const FRAME_RATE: f64 = 60.0;
const TICK_RATE: f64 = 4.0;

/// Messages from spawned tasks back into the main loop.
enum AppMessage {
    /// A command owned by this tab finished; drain the panel's queue.
    ProcessPanel(TabId),
}

enum Overlay {
    Help(HelpOverlay),
    ThemeSelect(ThemeSelector),
}

pub struct App {
    panels: [Box<dyn Panel>; 3],
    active: TabId,
    overlay: Option<Overlay>,
    theme: Theme,
    should_quit: bool,
    should_suspend: bool,
    msg_tx: UnboundedSender<AppMessage>,
    msg_rx: UnboundedReceiver<AppMessage>,
}

impl App {
    #[must_use]
    pub fn new(source: &Arc<dyn DataSource>, theme: Theme, start_tab: TabId) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            panels: [
                Box::new(KeywordPanel::new(Arc::clone(source))),
                Box::new(CompetitorPanel::new(Arc::clone(source))),
                Box::new(UrlPanel::new(Arc::clone(source))),
            ],
            active: start_tab,
            overlay: None,
            theme,
            should_quit: false,
            should_suspend: false,
            msg_tx,
            msg_rx,
        }
    }

    /// Run the main loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        loop {
            tokio::select! {
                event = tui.next_event() => {
                    let Some(event) = event else { break };
                    self.handle_event(&mut tui, event)?;
                }
                Some(msg) = self.msg_rx.recv() => {
                    let AppMessage::ProcessPanel(tab) = msg;
                    self.process_panel(tab)?;
                }
            }

            if self.should_suspend {
                self.should_suspend = false;
                tui.suspend()?;
                tui = Tui::new(FRAME_RATE, TICK_RATE)?;
                tui.enter()?;
            }
            if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> Result<()> {
        match event {
            Event::Init => info!("Event loop started"),
            Event::Quit => self.should_quit = true,
            Event::Error(e) => error!(error = %e, "Terminal event stream error"),
            Event::Tick => self.panel_mut(self.active).handle_tick(),
            Event::Render => {
                tui.draw(|frame| self.render(frame))?;
            }
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
            }
            Event::Paste(text) => {
                if self.overlay.is_none() {
                    self.panel_mut(self.active).handle_paste(&text);
                }
            }
            Event::Key(key) => self.handle_key(key)?,
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.overlay.is_some() {
            return self.handle_overlay_key(key);
        }

        if self.panel_mut(self.active).handle_key(key)?.is_consumed() {
            return self.process_panel(self.active);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('z') {
                self.should_suspend = true;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => {
                self.overlay = Some(Overlay::Help(HelpOverlay::new(self.help_sections())));
            }
            KeyCode::Char('t') => {
                self.overlay = Some(Overlay::ThemeSelect(ThemeSelector::new()));
            }
            KeyCode::Tab => self.select_tab(self.active.next()),
            KeyCode::BackTab => self.select_tab(self.active.previous()),
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.select_tab(TabId::ALL[index]);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) -> Result<()> {
        match &mut self.overlay {
            Some(Overlay::Help(help)) => {
                if let EventResult::Event(HelpEvent::Close) = help.handle_key(key)? {
                    self.overlay = None;
                }
            }
            Some(Overlay::ThemeSelect(selector)) => match selector.handle_key(key)? {
                EventResult::Event(ThemeEvent::Selected(info)) => {
                    self.theme = theme_from_name(info.name);
                    self.overlay = None;
                    if let Err(e) = config::save_theme(info.name) {
                        error!(error = %e, "Failed to persist theme choice");
                    }
                }
                EventResult::Event(ThemeEvent::Cancelled) => self.overlay = None,
                _ => {}
            },
            None => {}
        }
        Ok(())
    }

    fn select_tab(&mut self, tab: TabId) {
        if tab != self.active {
            debug!(tab = %tab, "Switching tab");
            self.active = tab;
        }
    }

    fn panel_mut(&mut self, tab: TabId) -> &mut Box<dyn Panel> {
        &mut self.panels[tab.index()]
    }

    /// Drain a panel's message queue and spawn whatever commands it emits.
    fn process_panel(&mut self, tab: TabId) -> Result<()> {
        if let PanelUpdate::Run(commands) = self.panel_mut(tab).update()? {
            self.spawn_commands(tab, commands);
        }
        Ok(())
    }

    fn spawn_commands(&self, tab: TabId, commands: Vec<Box<dyn Command>>) {
        for command in commands {
            let tx = self.msg_tx.clone();
            tokio::spawn(async move {
                let name = command.name();
                debug!(command = %name, "Running command");
                if let Err(e) = command.execute().await {
                    error!(command = %name, error = %e, "Command failed");
                }
                let _ = tx.send(AppMessage::ProcessPanel(tab));
            });
        }
    }

    fn help_sections(&self) -> Vec<(String, Vec<Keybinding>)> {
        let global = vec![
            Keybinding::new("Tab / Shift+Tab", "Cycle tabs"),
            Keybinding::new("1-3", "Jump to tab"),
            Keybinding::new("t", "Select theme"),
            Keybinding::new("?", "Toggle help"),
            Keybinding::new("Ctrl+Z", "Suspend"),
            Keybinding::new("q / Ctrl+C", "Quit"),
        ];
        let panel = self.panels[self.active.index()].keybindings();
        vec![
            ("Global".to_string(), global),
            (self.active.title().to_string(), panel),
        ]
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(self.theme.base)), area);

        let [tabs_area, content_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(7),
        ])
        .areas(area);

        self.render_tabs(frame, tabs_area);

        let active = self.active;
        let theme = self.theme;
        self.panel_mut(active).render(frame, content_area, &theme);

        let hints = self.panels[active.index()].keybindings();
        StatusBar::render(frame, status_area, &theme, active, &hints);

        match &mut self.overlay {
            Some(Overlay::Help(help)) => help.render(frame, area, &theme),
            Some(Overlay::ThemeSelect(selector)) => selector.render(frame, area, &theme),
            None => {}
        }
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles = TabId::ALL
            .iter()
            .map(|tab| Line::from(format!(" {} ", tab.title())));
        let tabs = Tabs::new(titles)
            .select(self.active.index())
            .style(Style::default().fg(self.theme.subtext))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("│");
        frame.render_widget(tabs, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Delays, MockSource};

    fn test_app() -> App {
        let source: Arc<dyn DataSource> = Arc::new(MockSource::with_delays(Delays {
            keyword: std::time::Duration::ZERO,
            competitor: std::time::Duration::ZERO,
            url: std::time::Duration::ZERO,
        }));
        App::new(&source, Theme::mocha(), TabId::KeywordResearch)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Leave the input field so global keys reach the app.
    fn browse_mode(app: &mut App) {
        app.handle_key(key(KeyCode::Esc)).unwrap();
    }

    #[tokio::test]
    async fn test_tab_cycles_through_panels() {
        let mut app = test_app();
        browse_mode(&mut app);
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.active, TabId::CompetitorAnalysis);
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.active, TabId::UrlAnalyzer);
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.active, TabId::KeywordResearch);
    }

    #[tokio::test]
    async fn test_number_keys_jump_to_tab() {
        let mut app = test_app();
        browse_mode(&mut app);
        app.handle_key(key(KeyCode::Char('3'))).unwrap();
        assert_eq!(app.active, TabId::UrlAnalyzer);
        // The freshly shown panel starts with its input focused, so digits
        // are text until the user leaves the field.
        app.handle_key(key(KeyCode::Char('1'))).unwrap();
        assert_eq!(app.active, TabId::UrlAnalyzer);
        browse_mode(&mut app);
        app.handle_key(key(KeyCode::Char('1'))).unwrap();
        assert_eq!(app.active, TabId::KeywordResearch);
    }

    #[tokio::test]
    async fn test_typed_digits_go_to_focused_input() {
        let mut app = test_app();
        // Input starts focused; digits are text, not tab shortcuts.
        app.handle_key(key(KeyCode::Char('2'))).unwrap();
        assert_eq!(app.active, TabId::KeywordResearch);
    }

    #[tokio::test]
    async fn test_help_overlay_opens_and_closes() {
        let mut app = test_app();
        browse_mode(&mut app);
        app.handle_key(key(KeyCode::Char('?'))).unwrap();
        assert!(matches!(app.overlay, Some(Overlay::Help(_))));
        // Tab is swallowed by the overlay.
        app.handle_key(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.active, TabId::KeywordResearch);
        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(app.overlay.is_none());
    }

    #[tokio::test]
    async fn test_theme_selector_cancel_keeps_theme() {
        let mut app = test_app();
        browse_mode(&mut app);
        let before = app.theme.base;
        app.handle_key(key(KeyCode::Char('t'))).unwrap();
        assert!(matches!(app.overlay, Some(Overlay::ThemeSelect(_))));
        app.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(app.overlay.is_none());
        assert_eq!(app.theme.base, before);
    }

    #[tokio::test]
    async fn test_quit_key_sets_flag() {
        let mut app = test_app();
        browse_mode(&mut app);
        app.handle_key(key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit);
    }
}
