use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::LedgerService;
use crate::http;
use crate::storage::CustomerDirectory;

/// Caderneta - Customer Ledger Service
#[derive(Parser)]
#[command(name = "caderneta")]
#[command(about = "An in-memory customer ledger with statements, balances and a small HTTP API")]
#[command(version)]
pub struct Cli {
    /// Address to listen on
    #[arg(
        short,
        long,
        env = "CADERNETA_LISTEN",
        default_value = "127.0.0.1:3333"
    )]
    pub listen: String,
}

impl Cli {
    /// Start the HTTP server and run until the process is stopped.
    ///
    /// The ledger lives for the lifetime of the process; a restart starts
    /// from an empty directory.
    pub async fn run(self) -> Result<()> {
        init_tracing();

        let service = Arc::new(LedgerService::new(CustomerDirectory::new()));
        let app = http::build_router(service);

        let listener = tokio::net::TcpListener::bind(&self.listen)
            .await
            .with_context(|| format!("Failed to bind {}", self.listen))?;

        tracing::info!("listening on {}", listener.local_addr()?);

        axum::serve(listener, app).await.context("Server error")?;
        Ok(())
    }
}

/// Initialize tracing for the process. Filtering comes from `RUST_LOG`,
/// defaulting to info.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
