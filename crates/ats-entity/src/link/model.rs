//! Shareable link entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::LinkId;
use super::scope::LinkScope;
use crate::permission::PermissionLevel;

/// A token-based link granting external access to the applicant board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareableLink {
    /// Backend-assigned identifier.
    pub id: LinkId,
    /// Secret embedded in the shared URL path.
    pub token: String,
    /// Global or job-specific access boundary.
    pub scope: LinkScope,
    /// Tier granted to whoever holds the link.
    pub permission_level: PermissionLevel,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    /// When the link stops working (`None` = never).
    pub expires_at: Option<DateTime<Utc>>,
    /// Times the link has been opened, as counted by the backend.
    pub access_count: u64,
    /// Full URL to hand out.
    pub full_url: String,
}

impl ShareableLink {
    /// Check if the link is usable at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at > now,
            None => true,
        }
    }

    /// Check if the link is currently usable.
    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    /// Check if the link belongs to exactly this scope.
    pub fn in_scope(&self, scope: &LinkScope) -> bool {
        self.scope == *scope
    }
}

/// Build the public URL for a token: `{origin}/shared/{token}`.
pub fn derive_full_url(origin: &str, token: &str) -> String {
    format!("{}/shared/{}", origin.trim_end_matches('/'), token)
}
