//! Permission tier enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Access tier granted by a shareable link.
///
/// Ordered by capability: `View < Comment < Edit < Full`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionLevel {
    /// Read-only access to the board.
    View,
    /// Can leave comments on applications.
    Comment,
    /// Can move applicants between stages.
    Edit,
    /// Full control of the shared board.
    Full,
}

/// Raised when a raw value is not one of the four tiers.
///
/// Only reachable from unvalidated input (backend payloads, CLI arguments).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission level '{0}'")]
pub struct UnknownPermissionLevel(pub String);

impl From<UnknownPermissionLevel> for ats_core::AppError {
    fn from(err: UnknownPermissionLevel) -> Self {
        ats_core::AppError::validation(err.to_string())
    }
}

impl PermissionLevel {
    /// Every tier in ascending capability order.
    pub const ALL: [PermissionLevel; 4] = [Self::View, Self::Comment, Self::Edit, Self::Full];

    /// Return the capability rank (higher = more capable).
    pub fn rank(&self) -> u8 {
        match self {
            Self::View => 1,
            Self::Comment => 2,
            Self::Edit => 3,
            Self::Full => 4,
        }
    }

    /// Check if this tier grants at least the given tier.
    pub fn has_at_least(&self, required: PermissionLevel) -> bool {
        self.rank() >= required.rank()
    }

    /// Check if this tier allows commenting.
    pub fn can_comment(&self) -> bool {
        self.has_at_least(Self::Comment)
    }

    /// Check if this tier allows changing applicant state.
    pub fn can_edit(&self) -> bool {
        self.has_at_least(Self::Edit)
    }

    /// Check if this tier allows managing the board itself.
    pub fn can_manage(&self) -> bool {
        matches!(self, Self::Full)
    }

    /// Return the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "VIEW",
            Self::Comment => "COMMENT",
            Self::Edit => "EDIT",
            Self::Full => "FULL",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = UnknownPermissionLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "VIEW" => Ok(Self::View),
            "COMMENT" => Ok(Self::Comment),
            "EDIT" => Ok(Self::Edit),
            "FULL" => Ok(Self::Full),
            _ => Err(UnknownPermissionLevel(s.to_string())),
        }
    }
}
