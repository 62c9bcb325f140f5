//! Clipboard seam.

use ats_core::result::AppResult;

/// Destination for copied share URLs.
pub trait Clipboard: Send + Sync {
    /// Place `text` on the clipboard.
    fn copy_text(&self, text: &str) -> AppResult<()>;
}
