//! Solana Wallet MCP server
//!
//! stdout carries MCP frames, so all diagnostics go to stderr.

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use solana_wallet_mcp::adapters::cli::{self, CliApp};
use solana_wallet_mcp::adapters::market_data::{CoinGeckoPriceClient, PriceCache};
use solana_wallet_mcp::adapters::solana::{KeypairFile, SolanaClient};
use solana_wallet_mcp::adapters::mcp::WalletMcpServer;
use solana_wallet_mcp::application::WalletTools;
use solana_wallet_mcp::config::{load_config, Config};
use solana_wallet_mcp::ports::SystemClock;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (secrets go here, not in config.toml)
    dotenvy::dotenv().ok();

    let app = cli::init();

    let config = match resolve_config(&app) {
        Ok(config) => config,
        Err(e) => fatal(&format!("{:#}", e)),
    };
    init_logging(app.verbose, app.debug, config.logging.level.as_deref())?;

    let rpc_host = match config.solana.rpc_host() {
        Ok(host) => host.to_string(),
        Err(e) => fatal(&e.to_string()),
    };

    // The keypair must be readable before we accept any request
    let keypair = match KeypairFile::from_config(config.solana.keypair_path()) {
        Ok(keypair) => keypair,
        Err(e) => fatal(&e.to_string()),
    };
    if let Err(e) = keypair.verify() {
        fatal(&e.to_string());
    }

    let server = build_server(&config, &rpc_host, keypair)?;

    let service = server
        .serve(stdio())
        .await
        .context("Failed to start MCP server on stdio")?;
    tracing::info!("Server connected");

    service.waiting().await?;
    tracing::info!("Server stopped");
    Ok(())
}

fn resolve_config(app: &CliApp) -> Result<Config> {
    let config = match &app.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };

    Ok(config.with_overrides(app.rpc_url.clone(), app.keypair.clone()))
}

fn build_server(config: &Config, rpc_host: &str, keypair: KeypairFile) -> Result<WalletMcpServer> {
    let ledger = SolanaClient::for_host(rpc_host)
        .with_confirm_timeout(config.solana.confirm_timeout());
    tracing::info!("Using RPC {} and subscriptions {}", ledger.rpc_url(), ledger.ws_url());

    let price_source = CoinGeckoPriceClient::with_endpoint(config.price.endpoint.clone())
        .context("Failed to create price client")?;
    let prices = PriceCache::with_clock(
        Arc::new(price_source),
        Arc::new(SystemClock),
        config.price.cache_ttl(),
    );

    let tools = WalletTools::new(keypair, Arc::new(ledger), prices);
    Ok(WalletMcpServer::new(Arc::new(tools)))
}

fn init_logging(verbose: bool, debug: bool, configured: Option<&str>) -> Result<()> {
    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        configured.unwrap_or("warn")
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
    Ok(())
}

/// Print a startup diagnostic and exit before serving
fn fatal(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
