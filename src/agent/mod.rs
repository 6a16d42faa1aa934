//! Agent module - the core tool-calling loop.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Append the user message to the session transcript
//! 2. Call the model with the transcript and tool catalog
//! 3. If the model requests tool calls, execute them in order and feed
//!    results back
//! 4. Repeat until the model answers in text or the iteration cap is hit

mod agent_loop;
mod prompt;
mod session;

pub use agent_loop::{Agent, MAX_ITERATIONS_MESSAGE};
pub use prompt::build_system_prompt;
pub use session::Session;
