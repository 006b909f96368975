//! The `lupus-server` binary.
//!
//! Environment:
//! - `LUPUS_BIND`: listen address, default `0.0.0.0:0`
//! - `LUPUS_CONFIG`: optional path to a JSON game config
//! - `LUPUS_SEED`: optional `u64` for a reproducible deal
//! - `RUST_LOG`: log filter, default `info`

use std::process::ExitCode;

use lupus::prelude::*;
use lupus::DEFAULT_BIND;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr; stdout carries only the port line.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match serve().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn serve() -> Result<Outcome, LupusError> {
    let bind = std::env::var("LUPUS_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let config = match std::env::var_os("LUPUS_CONFIG") {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    let mut builder = LupusServer::builder().bind(&bind).config(config);
    if let Some(seed) = std::env::var("LUPUS_SEED").ok().and_then(|s| s.parse().ok()) {
        builder = builder.seed(seed);
    }

    let server = builder.build().await?;
    println!("SERVER PORT: {}", server.local_addr()?.port());
    server.run().await
}
