//! Upstream Server Binary
//!
//! Mock backend for exercising HTTP clients, proxies and load generators.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use upstream_config::{ConfigLoader, LogLevel, TlsConfig, UpstreamConfig};
use upstream_logging::init_logging;
use upstream_server::Server;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (YAML or JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Listen address for the server, e.g. ":8081" or "127.0.0.1:9000"
    #[arg(short, long)]
    addr: Option<String>,

    /// PEM certificate; serves HTTPS together with --key
    #[arg(long, value_name = "FILE", requires = "key")]
    cert: Option<PathBuf>,

    /// PEM private key; serves HTTPS together with --cert
    #[arg(long, value_name = "FILE", requires = "cert")]
    key: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Print default configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Print default configuration if requested
    if cli.print_config {
        println!("{}", UpstreamConfig::generate_sample());
        return Ok(());
    }

    let mut config = ConfigLoader::new()
        .load(cli.config.as_deref())
        .context("Failed to load configuration")?;

    apply_cli_overrides(&mut config, &cli)?;
    config
        .validate_all()
        .context("Invalid configuration")?;

    init_logging(&config.logging)?;

    Server::new(config).run().await
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut UpstreamConfig, cli: &Cli) -> Result<()> {
    if let Some(addr) = &cli.addr {
        config
            .server
            .set_listen_address(addr)
            .with_context(|| format!("Invalid listen address '{}'", addr))?;
    }

    let path_string = |path: &PathBuf| path.to_string_lossy().into_owned();
    if let Some(tls) = TlsConfig::from_paths(
        cli.cert.as_ref().map(path_string),
        cli.key.as_ref().map(path_string),
    )? {
        config.server.tls = Some(tls);
    }

    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    Ok(())
}
