//! Permission tier listing.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use ats_entity::permission::{PermissionInfo, catalog};

/// One row of the tier table
#[derive(Debug, Serialize, Tabled)]
pub struct PermissionRow {
    /// Tier name
    #[tabled(rename = "Level")]
    pub level: String,
    /// Short label
    #[tabled(rename = "Label")]
    pub label: &'static str,
    /// What the tier allows
    #[tabled(rename = "Description")]
    pub description: &'static str,
    /// Actions the tier allows
    #[tabled(rename = "Grants")]
    pub grants: String,
    /// Icon name
    #[tabled(rename = "Icon")]
    pub icon: &'static str,
}

impl From<&PermissionInfo> for PermissionRow {
    fn from(info: &PermissionInfo) -> Self {
        Self {
            level: info.level.to_string(),
            label: info.label,
            description: info.description,
            grants: output::capabilities(info.level),
            icon: info.icon,
        }
    }
}

/// Print every tier in ascending capability order
pub fn execute(format: OutputFormat) {
    let rows: Vec<PermissionRow> = catalog().iter().map(PermissionRow::from).collect();
    output::print_list(&rows, format, "No permission tiers defined.");
}
