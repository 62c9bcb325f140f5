//! Per-scope share state held by the presenting layer.

pub mod clipboard;
pub mod session;

pub use clipboard::Clipboard;
pub use session::ShareSession;
