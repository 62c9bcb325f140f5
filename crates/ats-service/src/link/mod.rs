//! Link resolution and lifecycle.

pub mod controller;
pub mod resolver;

pub use controller::{EnsureOutcome, LinkController, LinkListing, ListingStatus};
pub use resolver::resolve_active_link;
