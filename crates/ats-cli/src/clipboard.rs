//! Terminal clipboard via the OSC 52 escape sequence.

use std::io::Write;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use ats_core::result::AppResult;
use ats_service::Clipboard;

/// Asks the terminal emulator to place text on the system clipboard.
///
/// Works over SSH and inside tmux (with `set-clipboard on`); terminals
/// without OSC 52 support ignore the sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Osc52Clipboard;

/// Build the escape sequence that sets the clipboard to `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl Clipboard for Osc52Clipboard {
    fn copy_text(&self, text: &str) -> AppResult<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(osc52_sequence(text).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
