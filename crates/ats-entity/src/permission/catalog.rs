//! Display metadata for each permission tier.

use serde::Serialize;

use super::level::{PermissionLevel, UnknownPermissionLevel};

/// Human-facing description of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionInfo {
    /// The tier being described.
    pub level: PermissionLevel,
    /// Short label shown next to the selector.
    pub label: &'static str,
    /// One-line explanation of what the tier allows.
    pub description: &'static str,
    /// Icon name used by the share dialog.
    pub icon: &'static str,
}

static CATALOG: [PermissionInfo; 4] = [
    PermissionInfo {
        level: PermissionLevel::View,
        label: "View only",
        description: "Can view applicants and their progress",
        icon: "eye",
    },
    PermissionInfo {
        level: PermissionLevel::Comment,
        label: "Comment",
        description: "Can view applicants and add comments",
        icon: "message-square",
    },
    PermissionInfo {
        level: PermissionLevel::Edit,
        label: "Edit",
        description: "Can view, comment and move applicants between stages",
        icon: "edit",
    },
    PermissionInfo {
        level: PermissionLevel::Full,
        label: "Full access",
        description: "Complete control over the shared board",
        icon: "shield",
    },
];

/// Look up the display metadata for a tier.
pub fn describe(level: PermissionLevel) -> &'static PermissionInfo {
    &CATALOG[usize::from(level.rank() - 1)]
}

/// Describe a raw tier name, failing on anything outside the four tiers.
pub fn describe_raw(raw: &str) -> Result<&'static PermissionInfo, UnknownPermissionLevel> {
    raw.parse::<PermissionLevel>().map(describe)
}

/// The full catalog in ascending capability order.
pub fn catalog() -> &'static [PermissionInfo] {
    &CATALOG
}
