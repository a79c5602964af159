use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "seoscope", version, about = "TUI dashboard for SEO research")]
pub struct Args {
    /// Tab to open at startup (e.g., "keyword-research")
    #[arg(short, long)]
    pub tab: Option<String>,

    /// Theme name, overriding the configured one (e.g., "Catppuccin Latte")
    #[arg(long)]
    pub theme: Option<String>,
}
