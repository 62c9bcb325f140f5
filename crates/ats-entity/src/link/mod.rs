//! Shareable link domain entities and backend wire shapes.

pub mod id;
pub mod model;
pub mod scope;
pub mod wire;

pub use id::{JobId, LinkId};
pub use model::{ShareableLink, derive_full_url};
pub use scope::LinkScope;
pub use wire::{
    CreateLinkRequest, LinkListResponse, LinkPatch, LinkRecord, UpdatePermissionRequest,
};
