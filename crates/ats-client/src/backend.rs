//! Link backend trait.

use async_trait::async_trait;

use ats_core::result::AppResult;
use ats_entity::link::{CreateLinkRequest, LinkId, LinkListResponse, LinkPatch, LinkRecord, LinkScope};
use ats_entity::permission::PermissionLevel;

/// Operations the backend exposes for shareable links.
///
/// Implementations return raw wire shapes; normalization into
/// `ShareableLink` happens in the service layer. No implementation is
/// expected to retry: a failed call is reported once.
#[async_trait]
pub trait LinkBackend: Send + Sync + std::fmt::Debug + 'static {
    /// List links, optionally restricted to a scope.
    async fn list_links(&self, scope: Option<&LinkScope>) -> AppResult<LinkListResponse>;

    /// Create a link.
    async fn create_link(&self, request: &CreateLinkRequest) -> AppResult<LinkRecord>;

    /// Change the tier of an existing link.
    ///
    /// Backends that answer without a body yield an empty patch.
    async fn update_permission(&self, id: &LinkId, level: PermissionLevel)
    -> AppResult<LinkPatch>;
}
