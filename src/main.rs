use anyhow::Result;
use bountyboard::store::memory::{MemoryStore, SampleData};
use bountyboard::{config, tui};
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "bountyboard")]
#[command(about = "Terminal dashboard for a bounty workspace")]
#[command(version)]
struct Args {
    /// Path to config file
    #[arg(long, short)]
    config: Option<std::path::PathBuf>,

    /// Workspace to open (uuid)
    #[arg(long, short)]
    workspace: Option<String>,

    /// Seed the store from a JSON data file instead of the demo dataset
    #[arg(long)]
    data: Option<std::path::PathBuf>,

    /// Only show bounties for one language on the board
    #[arg(long)]
    language: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the default config file location
    ConfigPath,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Handle config-path before logging setup; it only prints and exits
    if let Some(Command::ConfigPath) = &args.command {
        println!("{}", config::default_config_path()?.display());
        return Ok(());
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bountyboard=info".parse()?),
        )
        .init();

    let config = config::load(args.config.as_deref())?;

    let data = match &args.data {
        Some(path) => SampleData::load(path)?,
        None => SampleData::sample(),
    };
    let workspace_uuid = args
        .workspace
        .or_else(|| config.ui.default_workspace.clone())
        .or_else(|| data.workspaces.first().map(|ws| ws.uuid.clone()))
        .ok_or_else(|| {
            anyhow::anyhow!("no workspace to open; pass --workspace or set ui.default_workspace")
        })?;
    let store = Arc::new(MemoryStore::new(data, config.paging));

    // Run TUI
    tui::run(config, store, workspace_uuid, args.language).await
}
