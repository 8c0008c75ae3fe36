//! mobase-crawler - MoBase product attribute extraction CLI
//!
//! A Rust implementation with TLS fingerprint emulation for reliable scraping.

use anyhow::Result;
use clap::{Parser, Subcommand};
use mobase_crawler::commands::ProductCommand;
use mobase_crawler::config::{Config, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mobase-crawler",
    version,
    about = "MoBase product attribute extraction CLI",
    long_about = "Fetches product pages from the MoBase rail spare-parts catalog and consolidates their technical attributes into one record per article number."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "MOBASE_PROXY")]
    proxy: Option<String>,

    /// Delay between requests in milliseconds
    #[arg(long, global = true, env = "MOBASE_DELAY")]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up products by article number
    #[command(alias = "p")]
    Product {
        /// Article number(s) to look up
        #[arg(required = true)]
        articles: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;

    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }

    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Product { articles } => {
            let cmd = ProductCommand::new(config);

            let output = if articles.len() == 1 {
                cmd.execute(&articles[0]).await?
            } else {
                cmd.execute_batch(&articles).await?
            };

            println!("{}", output);
        }
    }

    Ok(())
}
