//! Async command pattern for side effects.
//!
//! Commands are async operations returned by panel `update()` calls and
//! spawned by the [`crate::app::App`] outside the render loop. Each command
//! reports back to its owner through a message channel it captured at
//! construction time; the app only learns that the command finished.

use arboard::Clipboard;
use async_trait::async_trait;
use color_eyre::Result;

/// An async side effect spawned by the app.
#[async_trait]
pub trait Command: Send + 'static {
    /// Human-readable name for logging.
    fn name(&self) -> String;

    /// Execute the command.
    async fn execute(self: Box<Self>) -> Result<()>;
}

/// Copies a string to the system clipboard.
pub struct CopyToClipboardCmd {
    text: String,
    label: String,
}

impl CopyToClipboardCmd {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

#[async_trait]
impl Command for CopyToClipboardCmd {
    fn name(&self) -> String {
        format!("Copying {}", self.label)
    }

    async fn execute(self: Box<Self>) -> Result<()> {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(self.text)?;
        Ok(())
    }
}
