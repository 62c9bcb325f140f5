//! Shareable link CLI commands.

use std::time::Duration;

use chrono::Utc;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::clipboard::Osc52Clipboard;
use crate::output::{self, OutputFormat};
use ats_core::config::AppConfig;
use ats_core::error::AppError;
use ats_entity::link::{JobId, LinkId, LinkScope, ShareableLink};
use ats_entity::permission::{PermissionLevel, describe};
use ats_service::{EnsureOutcome, ShareSession};

/// Arguments for link commands
#[derive(Debug, Args)]
pub struct LinksArgs {
    /// Link subcommand
    #[command(subcommand)]
    pub command: LinksCommand,
}

/// Link subcommands
#[derive(Debug, Subcommand)]
pub enum LinksCommand {
    /// List links known to the backend
    List {
        /// Restrict to one job (omit for all links)
        #[arg(long)]
        job: Option<JobId>,
    },
    /// Show the active link for a scope
    Show {
        /// Job scope (omit for the global link)
        #[arg(long)]
        job: Option<JobId>,
    },
    /// Create a link unless an active one already exists
    Ensure {
        /// Job scope (omit for the global link)
        #[arg(long)]
        job: Option<JobId>,
        /// Permission tier for a new link (defaults to share.default_permission)
        #[arg(short, long)]
        permission: Option<PermissionLevel>,
    },
    /// Change the permission tier of a link
    Update {
        /// Link id
        id: String,
        /// New permission tier
        #[arg(short, long)]
        permission: PermissionLevel,
        /// Job scope the link belongs to (omit for global)
        #[arg(long)]
        job: Option<JobId>,
    },
    /// Copy the active link's URL to the terminal clipboard
    Copy {
        /// Job scope (omit for the global link)
        #[arg(long)]
        job: Option<JobId>,
    },
}

/// Table row for a link
#[derive(Debug, Serialize, Tabled)]
pub struct LinkRow {
    /// Link id
    #[tabled(rename = "ID")]
    pub id: String,
    /// Scope
    #[tabled(rename = "Scope")]
    pub scope: String,
    /// Permission tier
    #[tabled(rename = "Permission")]
    pub permission: String,
    /// Creation time
    #[tabled(rename = "Created")]
    pub created_at: String,
    /// Expiry time
    #[tabled(rename = "Expires")]
    pub expires_at: String,
    /// Active right now
    #[tabled(rename = "Active")]
    pub active: bool,
    /// Access count
    #[tabled(rename = "Accesses")]
    pub access_count: u64,
    /// Shareable URL
    #[tabled(rename = "URL")]
    pub url: String,
}

impl From<&ShareableLink> for LinkRow {
    fn from(link: &ShareableLink) -> Self {
        Self {
            id: link.id.to_string(),
            scope: link.scope.to_string(),
            permission: link.permission_level.to_string(),
            created_at: link.created_at.format("%Y-%m-%d %H:%M").to_string(),
            expires_at: link
                .expires_at
                .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string()),
            active: link.is_active(),
            access_count: link.access_count,
            url: link.full_url.clone(),
        }
    }
}

/// Execute link commands
pub async fn execute(
    args: &LinksArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let controller = super::build_controller(config)?;
    let copied_feedback = Duration::from_secs(config.share.copied_feedback_seconds);

    match &args.command {
        LinksCommand::List { job } => {
            let scope = job.map(LinkScope::Job);
            let listing = controller.list_links(scope.as_ref()).await;
            if !listing.is_available() {
                output::print_warning("Backend unavailable, no links known");
            }
            let rows: Vec<LinkRow> = listing.links.iter().map(LinkRow::from).collect();
            output::print_list(&rows, format, "No links found.");
        }
        LinksCommand::Show { job } => {
            let scope = LinkScope::from_job(*job);
            let listing = controller.list_links(Some(&scope)).await;
            match listing.active_for(&scope, Utc::now()) {
                Some(link) => output::print_link(link, format),
                None => output::print_warning(&format!("No active link for scope {scope}")),
            }
        }
        LinksCommand::Ensure { job, permission } => {
            let requested = match permission {
                Some(level) => *level,
                None => config.share.default_permission.parse::<PermissionLevel>()?,
            };
            let session =
                ShareSession::new(controller.clone(), LinkScope::from_job(*job), copied_feedback);

            match session.generate(requested).await? {
                EnsureOutcome::Existing(link) => {
                    output::print_warning(&format!(
                        "An active link already exists for scope {}; no new link was created",
                        link.scope
                    ));
                    output::print_link(&link, format);
                }
                EnsureOutcome::Created(link) => {
                    output::print_success(&format!(
                        "Created {} link for scope {} (expires in {} days)",
                        link.permission_level,
                        link.scope,
                        controller.expiry_days()
                    ));
                    output::print_link(&link, format);
                }
            }
        }
        LinksCommand::Update {
            id,
            permission,
            job,
        } => {
            let scope = LinkScope::from_job(*job);
            let id = LinkId::new(id.as_str());
            let listing = controller.list_links(Some(&scope)).await;
            if !listing.is_available() {
                return Err(AppError::network(
                    "Backend unavailable, cannot look up the link to update",
                ));
            }
            let current = listing
                .links
                .iter()
                .find(|link| link.id == id)
                .ok_or_else(|| AppError::not_found(format!("Link {id} not found in scope {scope}")))?;

            if current.permission_level == *permission {
                output::print_warning(&format!("Link {id} already has {permission} access"));
                return Ok(());
            }

            let updated = controller.update_permission(current, *permission).await?;
            output::print_success(&format!(
                "Link {} now grants {}",
                updated.id,
                describe(updated.permission_level).label
            ));
            output::print_link(&updated, format);
        }
        LinksCommand::Copy { job } => {
            let session =
                ShareSession::new(controller.clone(), LinkScope::from_job(*job), copied_feedback);
            session.refresh().await;
            let url = session.copy(&Osc52Clipboard)?;
            output::print_success(&format!("Copied {url}"));
        }
    }

    Ok(())
}
