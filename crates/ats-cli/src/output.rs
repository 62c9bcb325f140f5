//! Terminal rendering for link listings, link details and status lines.

use serde::Serialize;
use tabled::{Table, Tabled};

use ats_entity::link::ShareableLink;
use ats_entity::permission::{PermissionLevel, describe};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print rows as a table, or as a JSON array.
///
/// `empty` is shown instead of an empty table.
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat, empty: &str) {
    match format {
        OutputFormat::Table if items.is_empty() => println!("{empty}"),
        OutputFormat::Table => println!("{}", Table::new(items)),
        OutputFormat::Json => print_json(&items),
    }
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(item: &T) {
    match serde_json::to_string_pretty(item) {
        Ok(json) => println!("{json}"),
        Err(e) => print_error(&format!("Failed to encode output: {e}")),
    }
}

/// Print one link: its full record as JSON, or a detail block.
pub fn print_link(link: &ShareableLink, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(link),
        OutputFormat::Table => print!("{}", render_details(&link_details(link))),
    }
}

/// Labelled fields shown for a single link.
fn link_details(link: &ShareableLink) -> Vec<(&'static str, String)> {
    let info = describe(link.permission_level);
    vec![
        ("ID", link.id.to_string()),
        ("Scope", link.scope.to_string()),
        ("Permission", format!("{} ({})", info.label, info.description)),
        ("Grants", capabilities(link.permission_level)),
        ("Created", link.created_at.format(TIMESTAMP_FORMAT).to_string()),
        (
            "Expires",
            link.expires_at
                .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_else(|| "never".to_string()),
        ),
        ("Status", if link.is_active() { "active" } else { "expired" }.to_string()),
        ("Accesses", link.access_count.to_string()),
        ("URL", link.full_url.clone()),
    ]
}

/// Comma-separated actions a tier allows.
pub fn capabilities(level: PermissionLevel) -> String {
    let mut granted = vec!["view"];
    if level.can_comment() {
        granted.push("comment");
    }
    if level.can_edit() {
        granted.push("edit");
    }
    if level.can_manage() {
        granted.push("manage");
    }
    granted.join(", ")
}

/// Align labels into one column.
fn render_details(fields: &[(&str, String)]) -> String {
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 1;
    fields
        .iter()
        .map(|(label, value)| format!("  {:<width$} {value}\n", format!("{label}:")))
        .collect()
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message to stderr
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}
