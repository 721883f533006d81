use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tic_tac_toe::config::Cli;
use tic_tac_toe::resources::StaticResource;
use tic_tac_toe::server::{serve_http, serve_ws};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let ws_endpoint = cli.ws_endpoint();
    tracing::info!(
        static_dir = %cli.static_dir.display(),
        %ws_endpoint,
        "starting tic-tac-toe"
    );

    let resources = Arc::new(StaticResource::load(&cli.static_dir, &ws_endpoint)?);

    let http_listener = TcpListener::bind(cli.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", cli.http_addr))?;
    let ws_listener = TcpListener::bind(cli.ws_addr)
        .await
        .with_context(|| format!("failed to bind {}", cli.ws_addr))?;

    tokio::select! {
        result = serve_http(http_listener, resources) => result?,
        result = serve_ws(ws_listener, cli.board_size) => result?,
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for ctrl-c")?;
            tracing::info!("shutting down");
        }
    }

    Ok(())
}
