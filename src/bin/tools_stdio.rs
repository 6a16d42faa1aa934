//! file-agent-tools - Stdio Tool Server Entry Point
//!
//! Exposes the same tool registry used by the agent over a line-delimited
//! JSON protocol on stdin/stdout. Deletion confirmation is the calling
//! client's responsibility on this surface, so the registry is built with
//! an always-affirm policy.

use std::sync::Arc;

use file_agent::stdio;
use file_agent::tools::{AlwaysConfirm, ToolRegistry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Stdout carries the protocol; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "file_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let registry = ToolRegistry::new(Arc::new(AlwaysConfirm));
    stdio::serve(&registry).await
}
