//! Backend wire shapes for link endpoints.
//!
//! Responses use snake_case keys and are mapped onto [`ShareableLink`].
//! The list endpoint is inconsistent across backend versions; all three
//! observed shapes decode into [`LinkListResponse`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::id::{JobId, LinkId};
use super::model::{ShareableLink, derive_full_url};
use super::scope::LinkScope;
use crate::permission::{PermissionLevel, UnknownPermissionLevel};
use crate::timestamp;

/// A link record as returned by create and list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkRecord {
    /// Backend id.
    pub id: LinkId,
    /// Secret token.
    pub token: String,
    /// Explicit scope (`"global"` or a job id).
    #[serde(default)]
    pub scope: Option<LinkScope>,
    /// Job reference used by older endpoints instead of `scope`.
    #[serde(default, alias = "job")]
    pub job_id: Option<JobId>,
    /// Raw tier name, validated in [`LinkRecord::into_link`].
    pub permission_level: String,
    /// Creation time.
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    /// Expiry time.
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Access counter.
    #[serde(default)]
    pub access_count: u64,
    /// Full URL, when the backend builds it.
    #[serde(default)]
    pub full_url: Option<String>,
}

impl LinkRecord {
    /// Resolve the record's scope; an explicit `scope` wins over `job_id`.
    pub fn resolved_scope(&self) -> LinkScope {
        self.scope.unwrap_or(LinkScope::from_job(self.job_id))
    }

    /// Convert into the domain model, deriving `full_url` from `origin`
    /// when the backend left it out.
    pub fn into_link(self, origin: &str) -> Result<ShareableLink, UnknownPermissionLevel> {
        let permission_level: PermissionLevel = self.permission_level.parse()?;
        let scope = self.resolved_scope();
        let full_url = match self.full_url {
            Some(url) if !url.trim().is_empty() => url,
            _ => derive_full_url(origin, &self.token),
        };

        Ok(ShareableLink {
            id: self.id,
            token: self.token,
            scope,
            permission_level,
            created_at: self.created_at,
            expires_at: self.expires_at,
            access_count: self.access_count,
            full_url,
        })
    }
}

/// A partial record returned by the permission update endpoint.
///
/// Every field is optional; only fields the backend actually sent are
/// applied over the previously known record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkPatch {
    /// Token echoed by the backend.
    #[serde(default)]
    pub token: Option<String>,
    /// New tier.
    #[serde(default)]
    pub permission_level: Option<String>,
    /// Creation time.
    #[serde(default, deserialize_with = "timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
    /// `Some(None)` means the backend explicitly cleared the expiry.
    #[serde(default, deserialize_with = "deserialize_patch_expiry")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
    /// Access counter.
    #[serde(default)]
    pub access_count: Option<u64>,
    /// Full URL.
    #[serde(default)]
    pub full_url: Option<String>,
}

fn deserialize_patch_expiry<'de, D>(
    deserializer: D,
) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    timestamp::deserialize_opt(deserializer).map(Some)
}

/// Page of records nested inside an outer `results` wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPage {
    /// Records on this page.
    pub results: Vec<LinkRecord>,
}

/// Every list response shape the backend is known to emit.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LinkListResponse {
    /// `[ {...}, ... ]`
    Bare(Vec<LinkRecord>),
    /// `{ "results": [ {...}, ... ] }`
    Paged {
        /// Records.
        results: Vec<LinkRecord>,
    },
    /// `{ "results": { "results": [ {...}, ... ] } }`
    Nested {
        /// Inner page.
        results: RecordPage,
    },
}

impl LinkListResponse {
    /// Flatten any response shape into a plain list of records.
    pub fn into_records(self) -> Vec<LinkRecord> {
        match self {
            Self::Bare(records) => records,
            Self::Paged { results } => results,
            Self::Nested { results } => results.results,
        }
    }

    /// Flatten and convert every record into the domain model.
    pub fn into_links(self, origin: &str) -> Result<Vec<ShareableLink>, UnknownPermissionLevel> {
        self.into_records()
            .into_iter()
            .map(|record| record.into_link(origin))
            .collect()
    }
}

/// Body of the create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateLinkRequest {
    /// Scope of the new link.
    pub scope: LinkScope,
    /// Requested tier.
    pub permission_level: PermissionLevel,
    /// Lifetime of the new link.
    pub expires_in_days: u32,
}

/// Body of the permission update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePermissionRequest {
    /// New tier.
    pub permission_level: PermissionLevel,
}
