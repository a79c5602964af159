use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::source::{DataSource, MockSource};
use crate::tab::TabId;

mod app;
mod cli;
mod command;
mod config;
mod model;
mod panel;
mod source;
mod tab;
mod theme;
mod tui;
mod ui;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting seoscope");

    let args = cli::Args::parse();

    let config = config::load()?;
    let theme_name = args.theme.as_deref().unwrap_or(&config.theme.name);
    let theme = theme::theme_from_name(theme_name);

    let start_tab = match args.tab.as_deref().or(config.default_tab.as_deref()) {
        Some(slug) => slug.parse::<TabId>()?,
        None => TabId::KeywordResearch,
    };

    let source: Arc<dyn DataSource> = Arc::new(MockSource::new());

    let mut app = App::new(&source, theme, start_tab);
    app.run().await?;

    Ok(())
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("seoscope").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "seoscope.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
