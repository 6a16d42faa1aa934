//! Conversation transcript owned by the caller of the agent.

use crate::llm::{ChatMessage, ToolCall};

/// The ordered, append-only transcript of one session.
///
/// The system prompt is inserted exactly once, at construction. Messages are
/// never mutated or removed; the session lives for the process and is owned
/// by the REPL, passed to the agent by reference each turn.
pub struct Session {
    messages: Vec<ChatMessage>,
}

impl Session {
    /// Create a session seeded with the system prompt.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(system_prompt)],
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: Option<String>, tool_calls: Option<Vec<ToolCall>>) {
        self.messages.push(ChatMessage::assistant(content, tool_calls));
    }

    pub fn push_tool_result(&mut self, tool_call_id: impl Into<String>, content: impl Into<String>) {
        self.messages.push(ChatMessage::tool_result(tool_call_id, content));
    }

    /// The transcript as sent to the completion endpoint.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
