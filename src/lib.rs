//! # file-agent
//!
//! A minimal local AI agent with filesystem tools.
//!
//! This library provides:
//! - A bounded tool-calling loop against an OpenAI-compatible endpoint
//! - Five filesystem tools (read, list, write, mkdir, delete)
//! - An interactive REPL and a stdio tool-serving surface
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Receive a user message via the REPL
//! 2. Send the transcript and tool catalog to the model
//! 3. Execute any requested tool calls, feed results back
//! 4. Repeat until the model answers in text or the iteration cap is hit
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use file_agent::{agent::{build_system_prompt, Agent, Session}, config::Config, tools::StdinConfirmation};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(&config, Arc::new(StdinConfirmation));
//! let mut session = Session::new(build_system_prompt());
//! let answer = agent.run_turn(&mut session, "list the current directory").await?;
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod repl;
pub mod stdio;
pub mod tools;

pub use config::Config;
