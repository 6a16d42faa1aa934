//! Core agent loop implementation.

use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::llm::{LlmClient, OpenAiCompatClient, ToolCall};
use crate::tools::{ConfirmationPolicy, ToolRegistry};

use super::session::Session;

/// Advisory returned (and appended to the transcript) when a turn exhausts
/// its iteration budget.
pub const MAX_ITERATIONS_MESSAGE: &str =
    "Maximum iterations reached. Please try a simpler query.";

/// The tool-calling agent. One instance serves the whole session; per-turn
/// state lives in the [`Session`] passed to [`Agent::run_turn`].
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    model: String,
    max_iterations: usize,
}

impl Agent {
    /// Create an agent from configuration, wired to the OpenAI-compatible
    /// endpoint and the given confirmation policy for destructive tools.
    pub fn new(config: &Config, confirm: Arc<dyn ConfirmationPolicy>) -> Self {
        let llm = Arc::new(OpenAiCompatClient::new(
            config.base_url.clone(),
            config.api_key.clone(),
        ));
        Self::with_client(llm, config, confirm)
    }

    /// Create an agent with a custom completion client (used by tests).
    pub fn with_client(
        llm: Arc<dyn LlmClient>,
        config: &Config,
        confirm: Arc<dyn ConfirmationPolicy>,
    ) -> Self {
        Self {
            llm,
            tools: ToolRegistry::new(confirm),
            model: config.model.clone(),
            max_iterations: config.max_iterations,
        }
    }

    /// Run one user turn to completion and return the final answer.
    ///
    /// Each round sends the transcript and catalog, then either executes the
    /// requested tool calls strictly in request order (appending one tool
    /// message per call) or finishes with the assistant's text. Transport
    /// failures propagate to the caller; the transcript accumulated so far
    /// is left intact so the session can continue on the next turn.
    pub async fn run_turn(
        &self,
        session: &mut Session,
        user_input: &str,
    ) -> anyhow::Result<String> {
        session.push_user(user_input);

        let tool_schemas = self.tools.schemas();

        for iteration in 0..self.max_iterations {
            tracing::debug!("agent iteration {}", iteration + 1);

            let response = self
                .llm
                .chat_completion(&self.model, session.messages(), &tool_schemas)
                .await?;

            if let Some(tool_calls) = response.requested_tool_calls() {
                let tool_calls = tool_calls.to_vec();
                session.push_assistant(response.content.clone(), Some(tool_calls.clone()));

                // Sequential, in request order: the model may pair a write
                // with a read of the same path in one round.
                for call in &tool_calls {
                    tracing::info!(
                        "tool call: {}({})",
                        call.function.name,
                        call.function.arguments
                    );

                    let result = self.execute_tool_call(call).await;

                    tracing::info!("tool result: {}", truncate_for_log(&result, 1000));
                    session.push_tool_result(call.id.clone(), result);
                }

                continue;
            }

            // No tool calls - this is the final response
            let content = response.content.ok_or_else(|| {
                anyhow::anyhow!("model returned neither content nor tool calls")
            })?;
            session.push_assistant(Some(content.clone()), None);
            return Ok(content);
        }

        // Budget exhausted. Close the turn with the advisory so the
        // transcript still ends on an assistant message.
        session.push_assistant(Some(MAX_ITERATIONS_MESSAGE.to_string()), None);
        Ok(MAX_ITERATIONS_MESSAGE.to_string())
    }

    /// Decode one call's argument payload and dispatch it. Decode failure is
    /// a tool-level error reported back to the model, not a turn failure.
    async fn execute_tool_call(&self, call: &ToolCall) -> String {
        match serde_json::from_str::<Value>(&call.function.arguments) {
            Ok(args) => self.tools.dispatch(&call.function.name, args).await,
            Err(e) => format!(
                "Error: invalid arguments for {}: {}",
                call.function.name, e
            ),
        }
    }
}

/// Truncate a string for logging purposes.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated]", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{AssistantTurn, ChatMessage, FunctionCall, LlmError, Role, ToolSchema};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct AcceptAll;
    impl ConfirmationPolicy for AcceptAll {
        fn confirm(&self, _target: &str) -> bool {
            true
        }
    }

    /// Scripted completion client: pops one response per request. When the
    /// script runs dry it repeats the last scripted turn.
    struct ScriptedLlm {
        script: Mutex<VecDeque<Result<AssistantTurn, ()>>>,
        repeat: Mutex<Option<AssistantTurn>>,
        requests: AtomicUsize,
    }

    impl ScriptedLlm {
        fn new(script: Vec<Result<AssistantTurn, ()>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                repeat: Mutex::new(None),
                requests: AtomicUsize::new(0),
            }
        }

        fn requests_made(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn chat_completion(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
            _tools: &[ToolSchema],
        ) -> Result<AssistantTurn, LlmError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            match self.script.lock().unwrap().pop_front() {
                Some(Ok(turn)) => {
                    *self.repeat.lock().unwrap() = Some(turn.clone());
                    Ok(turn)
                }
                Some(Err(())) => Err(LlmError::MalformedResponse("scripted failure".to_string())),
                None => self
                    .repeat
                    .lock()
                    .unwrap()
                    .clone()
                    .ok_or_else(|| LlmError::MalformedResponse("script exhausted".to_string())),
            }
        }
    }

    fn answer(text: &str) -> Result<AssistantTurn, ()> {
        Ok(AssistantTurn {
            content: Some(text.to_string()),
            tool_calls: None,
        })
    }

    fn tool_round(calls: Vec<(&str, &str, String)>) -> Result<AssistantTurn, ()> {
        Ok(AssistantTurn {
            content: None,
            tool_calls: Some(
                calls
                    .into_iter()
                    .map(|(id, name, arguments)| ToolCall {
                        id: id.to_string(),
                        kind: "function".to_string(),
                        function: FunctionCall {
                            name: name.to_string(),
                            arguments,
                        },
                    })
                    .collect(),
            ),
        })
    }

    fn agent_with(llm: Arc<ScriptedLlm>) -> Agent {
        let config = Config::new("http://unused".to_string(), "test-model".to_string());
        Agent::with_client(llm, &config, Arc::new(AcceptAll))
    }

    #[tokio::test]
    async fn plain_answer_grows_transcript_by_two() {
        let llm = Arc::new(ScriptedLlm::new(vec![answer("hi there")]));
        let agent = agent_with(llm.clone());
        let mut session = Session::new("sys");

        let reply = agent.run_turn(&mut session, "hello").await.unwrap();

        assert_eq!(reply, "hi there");
        assert_eq!(session.len(), 3); // system + user + assistant
        assert_eq!(llm.requests_made(), 1);
    }

    #[tokio::test]
    async fn tool_round_appends_bundle_and_paired_result() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "remember the milk").unwrap();
        let arguments = serde_json::json!({ "path": path.to_string_lossy() }).to_string();

        let llm = Arc::new(ScriptedLlm::new(vec![
            tool_round(vec![("call_1", "read_file", arguments)]),
            answer("the file says: remember the milk"),
        ]));
        let agent = agent_with(llm.clone());
        let mut session = Session::new("sys");

        let reply = agent.run_turn(&mut session, "read the file notes.txt").await.unwrap();

        assert_eq!(reply, "the file says: remember the milk");
        assert_eq!(llm.requests_made(), 2);

        // system, user, assistant bundle, tool result, final assistant
        assert_eq!(session.len(), 5);
        let tool_messages: Vec<&ChatMessage> = session
            .messages()
            .iter()
            .filter(|m| m.role == Role::Tool)
            .collect();
        assert_eq!(tool_messages.len(), 1);
        assert_eq!(tool_messages[0].tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(
            tool_messages[0].content.as_deref(),
            Some("remember the milk")
        );
    }

    #[tokio::test]
    async fn tool_calls_execute_in_request_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let path_str = path.to_string_lossy().into_owned();

        let write_args =
            serde_json::json!({ "path": path_str, "content": "written first" }).to_string();
        let read_args = serde_json::json!({ "path": path_str }).to_string();

        let llm = Arc::new(ScriptedLlm::new(vec![
            tool_round(vec![
                ("call_w", "write_file", write_args),
                ("call_r", "read_file", read_args),
            ]),
            answer("done"),
        ]));
        let agent = agent_with(llm);
        let mut session = Session::new("sys");

        agent.run_turn(&mut session, "write then read").await.unwrap();

        // The read in the same round observes the write that preceded it.
        let results: Vec<&ChatMessage> = session
            .messages()
            .iter()
            .filter(|m| m.role == Role::Tool)
            .collect();
        assert_eq!(results[0].tool_call_id.as_deref(), Some("call_w"));
        assert_eq!(results[1].tool_call_id.as_deref(), Some("call_r"));
        assert_eq!(results[1].content.as_deref(), Some("written first"));
    }

    #[tokio::test]
    async fn iteration_cap_stops_after_five_requests() {
        // The script's last turn repeats forever: the model keeps asking for
        // the same listing and never answers.
        let llm = Arc::new(ScriptedLlm::new(vec![tool_round(vec![(
            "call_1",
            "list_directory",
            "{}".to_string(),
        )])]));
        let agent = agent_with(llm.clone());
        let mut session = Session::new("sys");

        let reply = agent.run_turn(&mut session, "loop forever").await.unwrap();

        assert_eq!(reply, MAX_ITERATIONS_MESSAGE);
        assert_eq!(llm.requests_made(), 5);

        // Every executed round is fully paired, and the turn still ends on
        // an assistant message.
        let last = session.messages().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content.as_deref(), Some(MAX_ITERATIONS_MESSAGE));
        // system + user + 5 rounds of (assistant + tool) + advisory
        assert_eq!(session.len(), 13);
    }

    #[tokio::test]
    async fn malformed_arguments_become_tool_error_result() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            tool_round(vec![("call_1", "read_file", "{not json".to_string())]),
            answer("could not read that"),
        ]));
        let agent = agent_with(llm);
        let mut session = Session::new("sys");

        let reply = agent.run_turn(&mut session, "read something").await.unwrap();

        assert_eq!(reply, "could not read that");
        let tool_msg = session
            .messages()
            .iter()
            .find(|m| m.role == Role::Tool)
            .unwrap();
        assert!(tool_msg
            .content
            .as_deref()
            .unwrap()
            .starts_with("Error: invalid arguments for read_file"));
    }

    #[tokio::test]
    async fn unknown_tool_is_reported_not_fatal() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            tool_round(vec![("call_1", "summon_demon", "{}".to_string())]),
            answer("no such tool"),
        ]));
        let agent = agent_with(llm);
        let mut session = Session::new("sys");

        agent.run_turn(&mut session, "do magic").await.unwrap();

        let tool_msg = session
            .messages()
            .iter()
            .find(|m| m.role == Role::Tool)
            .unwrap();
        assert_eq!(
            tool_msg.content.as_deref(),
            Some("Unknown tool: summon_demon")
        );
    }

    #[tokio::test]
    async fn transport_failure_propagates_but_keeps_transcript() {
        let llm = Arc::new(ScriptedLlm::new(vec![Err(())]));
        let agent = agent_with(llm);
        let mut session = Session::new("sys");

        let err = agent.run_turn(&mut session, "hello").await.unwrap_err();
        assert!(err.to_string().contains("scripted failure"));

        // The user message stays; the session remains usable next turn.
        assert_eq!(session.len(), 2);
        assert_eq!(session.messages()[1].role, Role::User);
    }

    #[tokio::test]
    async fn empty_response_is_a_transport_error() {
        let llm = Arc::new(ScriptedLlm::new(vec![Ok(AssistantTurn {
            content: None,
            tool_calls: None,
        })]));
        let agent = agent_with(llm);
        let mut session = Session::new("sys");

        let err = agent.run_turn(&mut session, "hello").await.unwrap_err();
        assert!(err.to_string().contains("neither content nor tool calls"));
    }

    #[test]
    fn truncate_for_log_respects_char_boundaries() {
        assert_eq!(truncate_for_log("short", 10), "short");
        let truncated = truncate_for_log("aéééééé", 3);
        assert!(truncated.ends_with("... [truncated]"));
    }
}
