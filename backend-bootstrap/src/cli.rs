// One-shot commands run from the terminal instead of the server.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use tokio::fs;

use backend_application::commands::{import_commands, link_commands, LinkSummary};
use backend_domain::{AccountId, ImportSummary};
use backend_infrastructure::AppConfig;

use crate::context::AppContext;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve,
    /// Import tournament history from a file
    Import {
        #[arg(long)]
        account: String,
        /// Text copied from the event history page
        #[arg(long, conflicts_with = "csv", required_unless_present = "csv")]
        paste: Option<PathBuf>,
        /// CSV export
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Run one link pass for an account and print the counts
    Link {
        #[arg(long)]
        account: String,
    },
}

pub enum ImportSource {
    Paste(PathBuf),
    Csv(PathBuf),
}

impl ImportSource {
    pub fn from_args(paste: Option<PathBuf>, csv: Option<PathBuf>) -> Result<Self> {
        match (paste, csv) {
            (Some(path), None) => Ok(ImportSource::Paste(path)),
            (None, Some(path)) => Ok(ImportSource::Csv(path)),
            _ => Err(anyhow!("exactly one of --paste or --csv is required")),
        }
    }
}

pub async fn run_import(
    config: &AppConfig,
    account: &str,
    source: ImportSource,
) -> Result<ImportSummary> {
    let account = AccountId::parse(account)?;
    let state = AppContext::new(config).await?.state;
    let summary = match source {
        ImportSource::Paste(path) => {
            let text = read_input(&path).await?;
            import_commands::import_paste(&state, &account, &text).await?
        }
        ImportSource::Csv(path) => {
            let text = read_input(&path).await?;
            import_commands::import_csv(&state, &account, &text).await?
        }
    };
    Ok(summary)
}

pub async fn run_link(config: &AppConfig, account: &str) -> Result<LinkSummary> {
    let account = AccountId::parse(account)?;
    let state = AppContext::new(config).await?.state;
    Ok(link_commands::link_account_matches(&state, &account).await)
}

async fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}
