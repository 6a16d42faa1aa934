//! file-agent - Interactive REPL Entry Point
//!
//! Starts the prompt loop that drives the tool-calling agent.

use std::sync::Arc;

use file_agent::agent::{build_system_prompt, Agent, Session};
use file_agent::config::Config;
use file_agent::tools::StdinConfirmation;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "file_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    let agent = Agent::new(&config, Arc::new(StdinConfirmation));
    let mut session = Session::new(build_system_prompt());

    file_agent::repl::run(&agent, &mut session, &config.model).await
}
