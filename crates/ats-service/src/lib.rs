//! # ats-service
//!
//! Business logic for shareable applicant-tracking links: resolving the
//! active link for a scope, creating and updating links against the
//! backend, and holding the per-scope share state a UI displays.

pub mod error;
pub mod link;
pub mod share;

pub use error::LinkError;
pub use link::{EnsureOutcome, LinkController, LinkListing, ListingStatus, resolve_active_link};
pub use share::{Clipboard, ShareSession};
