//! CLI command definitions and dispatch.

pub mod links;
pub mod permissions;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use ats_client::HttpLinkBackend;
use ats_core::config::AppConfig;
use ats_core::error::AppError;
use ats_service::LinkController;

/// Campus ATS: shareable applicant-tracking links
#[derive(Debug, Parser)]
#[command(name = "ats-links", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Shareable link management
    Links(links::LinksArgs),
    /// Show the permission tiers
    Permissions,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Links(args) => links::execute(args, config, self.format).await,
            Commands::Permissions => {
                permissions::execute(self.format);
                Ok(())
            }
        }
    }
}

/// Helper: build a link controller over the configured REST backend
pub fn build_controller(config: &AppConfig) -> Result<Arc<LinkController>, AppError> {
    let backend = HttpLinkBackend::new(&config.backend)?;
    Ok(Arc::new(LinkController::new(Arc::new(backend), &config.share)))
}
