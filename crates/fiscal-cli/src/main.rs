use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fiscal_infrastructure::{ConfigService, FiscalPaths};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fiscal")]
#[command(about = "Fiscal Flow shell utilities", long_about = None)]
struct Cli {
    /// Directory holding config.toml and preferences.toml
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the sidebar as it would render for PATH
    Nav {
        path: String,
        /// Print the view model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip the persisted sidebar collapse preference
    Toggle,
    /// Print the persisted sidebar collapse preference
    Status,
    /// Mount a shell against a local identity provider, then log out
    Simulate {
        /// Start with an active session
        #[arg(long)]
        signed_in: bool,
        /// Make the provider reject the sign-out request
        #[arg(long)]
        fail_logout: bool,
        /// Path shown when the shell mounts
        #[arg(long, default_value = "/dashboard")]
        path: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = FiscalPaths::new(cli.config_dir);
    tracing::debug!("Using config dir {:?}", paths.config_dir().ok());
    let config = ConfigService::new(paths.clone()).get_config();

    match cli.command {
        Commands::Nav { path, json } => commands::nav::show(&paths, &config, &path, json)?,
        Commands::Toggle => commands::preferences::toggle(&paths, &config)?,
        Commands::Status => commands::preferences::status(&paths, &config)?,
        Commands::Simulate {
            signed_in,
            fail_logout,
            path,
        } => commands::simulate::run(config, signed_in, fail_logout, &path).await?,
    }

    Ok(())
}
