//! `hotsync` — scheduled Hotmart → WooCommerce product synchronization.
//!
//! # Commands
//!
//! - `set-api-key` - Store the Hotmart API key and obtain an access token
//! - `sync` - Run a single sync pass
//! - `run` - Run passes on the configured interval until interrupted

mod config;
mod runner;
mod secret_file;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use tracing_subscriber::EnvFilter;

use hotsync_core::sync::SyncEngine;
use hotsync_hotmart::HotmartClient;
use hotsync_woocommerce::WooCatalog;

use crate::config::Config;
use crate::secret_file::FileSecretStore;

/// Hotmart to WooCommerce product synchronization.
#[derive(Parser)]
#[command(name = "hotsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(global = true, short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the Hotmart API key and obtain an initial access token
    SetApiKey {
        /// API key issued by Hotmart
        key: String,
    },

    /// Run a single sync pass and print the report
    Sync,

    /// Run sync passes on the configured interval until interrupted
    Run,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Commands::SetApiKey { key } => {
            let engine = build_engine(&config, false)?;
            engine
                .set_api_key(key.trim())
                .await
                .context("failed to store the API key and authenticate")?;
            println!("API key stored; access token obtained.");
        }
        Commands::Sync => {
            let engine = build_engine(&config, true)?;
            let report = engine.run_cycle().await;
            runner::log_report(&report);
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.succeeded() {
                bail!("sync pass ended with status {}", report.status);
            }
        }
        Commands::Run => {
            let engine = build_engine(&config, true)?;
            info!(
                "starting sync loop, one pass every {} seconds",
                config.sync.interval_secs
            );
            runner::run_forever(engine, config.sync.interval_secs).await;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Wire the engine from configuration. The catalog side is only validated
/// for commands that will actually write to it.
fn build_engine(config: &Config, needs_catalog: bool) -> Result<Arc<SyncEngine>> {
    if needs_catalog {
        config.validate_for_sync()?;
    }
    let secrets = Arc::new(FileSecretStore::new(config.secrets_path()));
    let remote = Arc::new(HotmartClient::new(&config.hotmart.base_url));
    let catalog = Arc::new(WooCatalog::new(
        &config.woocommerce.base_url,
        &config.woocommerce.consumer_key,
        &config.woocommerce.consumer_secret,
    ));
    Ok(Arc::new(SyncEngine::new(secrets, remote, catalog)))
}
