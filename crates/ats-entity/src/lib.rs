//! # ats-entity
//!
//! Domain models for shareable applicant-tracking links. Every public
//! struct here is either a domain value (`ShareableLink`, `LinkScope`,
//! `PermissionLevel`) or a backend wire shape decoded from the REST API.

pub mod link;
pub mod permission;
pub mod timestamp;
