use anyhow::Context;
use clap::Parser;
use paysim::logging::setup_tracing;
use paysim::{COMPONENT, Server};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing()?;
    info!(target: COMPONENT, "Tracing initialized");

    let (handle, _port) = Server::parse().spawn().await.context("failed to spawn server")?;

    handle.await.context("payment server panicked").flatten()
}
