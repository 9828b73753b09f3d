use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use backend_bootstrap::cli::{self, Command, ImportSource};
use backend_infrastructure::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "matchbook")]
#[command(about = "Tournament history import and cross-player linking", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::load_from(args.config).await?;
    let _log_guard = backend_bootstrap::logging::init_tracing(&config);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => backend_bootstrap::run_standalone(&config).await,
        Command::Import {
            account,
            paste,
            csv,
        } => {
            let source = ImportSource::from_args(paste, csv)?;
            let summary = cli::run_import(&config, &account, source).await?;
            info!(
                "imported {} matches from {} events ({} skipped)",
                summary.matches, summary.events, summary.skipped
            );
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        Command::Link { account } => {
            let summary = cli::run_link(&config, &account).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
    }
}
