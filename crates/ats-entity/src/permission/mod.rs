//! Permission tiers attached to shareable links.

pub mod catalog;
pub mod level;

pub use catalog::{PermissionInfo, catalog, describe, describe_raw};
pub use level::{PermissionLevel, UnknownPermissionLevel};
