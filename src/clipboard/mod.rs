//! Copying generated code to the system clipboard

use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::models::HistoryEntry;

/// Upper bound on how much generated code is handed to the clipboard
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Destination for copied code. The CLI uses [`SystemClipboard`].
pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn open() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_code(code: &str) -> Result<()> {
    if code.is_empty() {
        anyhow::bail!("Entry has no generated code to copy");
    }

    if code.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!(
            "Generated code too large for clipboard ({} bytes, max {})",
            code.len(),
            MAX_CLIPBOARD_SIZE
        );
    }

    Ok(())
}

/// Copy an entry's code, byte for byte, into `provider`
pub fn copy_entry_code(entry: &HistoryEntry, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_code(&entry.code)?;
    provider.set_text(&entry.code)
}

/// Copy an entry's code to the system clipboard.
///
/// Validation runs before the clipboard is opened, so an empty entry reports
/// a useful error even on headless machines.
///
/// # Errors
/// Fails if the code is empty or over 10MB, or if no system clipboard is
/// available (e.g. a headless Linux session without X11/Wayland).
pub fn copy_to_system_clipboard(entry: &HistoryEntry) -> Result<()> {
    validate_code(&entry.code)?;
    copy_entry_code(entry, &mut SystemClipboard::open()?)
}
