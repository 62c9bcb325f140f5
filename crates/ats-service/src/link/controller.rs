//! Shareable link lifecycle: list, ensure, update permission.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use ats_client::LinkBackend;
use ats_core::config::share::ShareConfig;
use ats_core::error::AppError;
use ats_entity::link::{CreateLinkRequest, LinkPatch, LinkScope, ShareableLink};
use ats_entity::permission::PermissionLevel;

use super::resolver::resolve_active_link;
use crate::error::LinkError;

/// Whether a background listing reached the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    /// The backend answered and the links are current.
    Fresh,
    /// The backend could not be read; treat as "no link known".
    Unavailable,
}

/// Result of a background listing. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkListing {
    /// Normalized links (empty when unavailable).
    pub links: Vec<ShareableLink>,
    /// Whether the listing reflects the backend.
    pub status: ListingStatus,
}

impl LinkListing {
    fn unavailable() -> Self {
        Self {
            links: Vec::new(),
            status: ListingStatus::Unavailable,
        }
    }

    /// Check if the backend answered.
    pub fn is_available(&self) -> bool {
        self.status == ListingStatus::Fresh
    }

    /// Resolve the active link for `scope` among the listed links.
    pub fn active_for(&self, scope: &LinkScope, now: DateTime<Utc>) -> Option<&ShareableLink> {
        resolve_active_link(scope, &self.links, now)
    }

    /// Consume the listing, keeping only the links.
    pub fn into_links(self) -> Vec<ShareableLink> {
        self.links
    }
}

/// Outcome of [`LinkController::ensure_link`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// An active link already existed; nothing was created.
    Existing(ShareableLink),
    /// A new link was created.
    Created(ShareableLink),
}

impl EnsureOutcome {
    /// The link to display, whichever way it was obtained.
    pub fn link(&self) -> &ShareableLink {
        match self {
            Self::Existing(link) | Self::Created(link) => link,
        }
    }

    /// Consume the outcome, returning the link.
    pub fn into_link(self) -> ShareableLink {
        match self {
            Self::Existing(link) | Self::Created(link) => link,
        }
    }

    /// True when creation was skipped because a link already existed.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Existing(_))
    }
}

/// Stateless orchestration of link operations against the backend.
///
/// Holds no link state of its own; callers pass the links they know about
/// or let the controller list them.
#[derive(Debug, Clone)]
pub struct LinkController {
    /// Backend owning link records.
    backend: Arc<dyn LinkBackend>,
    /// Origin for derived URLs.
    origin: String,
    /// Lifetime requested for new links.
    expiry_days: u32,
}

impl LinkController {
    /// Creates a new link controller.
    pub fn new(backend: Arc<dyn LinkBackend>, config: &ShareConfig) -> Self {
        Self {
            backend,
            origin: config.origin.clone(),
            expiry_days: config.default_expiry_days,
        }
    }

    /// Lifetime requested for newly created links.
    pub fn expiry_days(&self) -> u32 {
        self.expiry_days
    }

    /// Lists links, degrading to an unavailable listing on any failure.
    pub async fn list_links(&self, scope: Option<&LinkScope>) -> LinkListing {
        let response = match self.backend.list_links(scope).await {
            Ok(response) => response,
            Err(e) => {
                warn!(scope = ?scope.map(ToString::to_string), error = %e, "Link listing unavailable");
                return LinkListing::unavailable();
            }
        };

        match response.into_links(&self.origin) {
            Ok(links) => LinkListing {
                links,
                status: ListingStatus::Fresh,
            },
            Err(e) => {
                warn!(error = %e, "Link listing contained an invalid record");
                LinkListing::unavailable()
            }
        }
    }

    /// Returns the active link for `scope`, creating one only if none exists.
    pub async fn ensure_link(
        &self,
        scope: LinkScope,
        requested: PermissionLevel,
    ) -> Result<EnsureOutcome, LinkError> {
        let listing = self.list_links(Some(&scope)).await;
        self.ensure_link_among(scope, requested, &listing.links, Utc::now())
            .await
    }

    /// Like [`ensure_link`](Self::ensure_link) over an explicitly known link list.
    pub async fn ensure_link_among(
        &self,
        scope: LinkScope,
        requested: PermissionLevel,
        known: &[ShareableLink],
        now: DateTime<Utc>,
    ) -> Result<EnsureOutcome, LinkError> {
        if let Some(existing) = resolve_active_link(&scope, known, now) {
            info!(
                link_id = %existing.id,
                scope = %scope,
                "Active link already exists, skipping creation"
            );
            return Ok(EnsureOutcome::Existing(existing.clone()));
        }

        let request = CreateLinkRequest {
            scope,
            permission_level: requested,
            expires_in_days: self.expiry_days,
        };

        let record = self
            .backend
            .create_link(&request)
            .await
            .map_err(LinkError::LinkCreationFailed)?;

        let link = record
            .into_link(&self.origin)
            .map_err(|e| LinkError::LinkCreationFailed(e.into()))?;

        info!(
            link_id = %link.id,
            scope = %link.scope,
            permission = %link.permission_level,
            "Shareable link created"
        );

        Ok(EnsureOutcome::Created(link))
    }

    /// Changes the tier of `current`, keeping its token.
    pub async fn update_permission(
        &self,
        current: &ShareableLink,
        level: PermissionLevel,
    ) -> Result<ShareableLink, LinkError> {
        let patch = self
            .backend
            .update_permission(&current.id, level)
            .await
            .map_err(LinkError::PermissionUpdateFailed)?;

        let updated = apply_patch(current, level, patch).map_err(LinkError::PermissionUpdateFailed)?;

        info!(
            link_id = %updated.id,
            from = %current.permission_level,
            to = %updated.permission_level,
            "Link permission updated"
        );

        Ok(updated)
    }
}

/// Overlay the fields the backend sent back onto the known record.
///
/// The tier falls back to the requested one when the backend is silent.
/// The token is never replaced.
fn apply_patch(
    current: &ShareableLink,
    requested: PermissionLevel,
    patch: LinkPatch,
) -> Result<ShareableLink, AppError> {
    let permission_level = match patch.permission_level {
        Some(raw) => raw.parse::<PermissionLevel>()?,
        None => requested,
    };

    if let Some(token) = patch.token.as_deref() {
        if token != current.token {
            warn!(link_id = %current.id, "Backend returned a different token on update, keeping the original");
        }
    }

    let mut updated = current.clone();
    updated.permission_level = permission_level;
    if let Some(created_at) = patch.created_at {
        updated.created_at = created_at;
    }
    if let Some(expires_at) = patch.expires_at {
        updated.expires_at = expires_at;
    }
    if let Some(access_count) = patch.access_count {
        updated.access_count = access_count;
    }
    if let Some(full_url) = patch.full_url.filter(|url| !url.trim().is_empty()) {
        updated.full_url = full_url;
    }
    Ok(updated)
}
