use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use marketmind_infrastructure::ConfigService;

mod commands;

#[derive(Parser)]
#[command(name = "marketmind")]
#[command(about = "MarketMind - AI campaign content generator", long_about = None)]
struct Cli {
    /// Read config.toml and secret.json from this directory instead of the
    /// platform config directory
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a three-post campaign with images
    Generate(commands::generate::GenerateArgs),
    /// List the configured social accounts
    Accounts,
    /// Show where configuration files are read from
    Paths {
        /// Create secret.json from a template if it does not exist
        #[arg(long)]
        init: bool,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("marketmind=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config_service = ConfigService::new(cli.config_dir.as_deref());

    match cli.command {
        Commands::Generate(args) => {
            commands::generate::run(args, &config_service, cli.config_dir.as_deref()).await?
        }
        Commands::Accounts => commands::accounts::run(&config_service).await?,
        Commands::Paths { init } => commands::paths::run(&config_service, init)?,
    }

    Ok(())
}
