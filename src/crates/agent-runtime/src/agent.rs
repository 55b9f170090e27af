//! One agent iteration: interpret model output, then act on it
//!
//! [`AgentStep`] turns raw model output into a [`StepOutcome`]:
//!
//! - a tool call is dispatched through a [`ToolRegistry`]
//! - a completion ends the loop with its response text
//! - anything unparseable yields feedback to send back to the model
//!
//! [`AgentSession`] adds conversation bookkeeping around the step so the
//! history always reflects what the model saw and said.

use crate::context::build_context;
use crate::conversation::ConversationService;
use crate::error::Result;
use crate::messages::Message;
use crate::tools::{ToolCall, ToolRegistry, ToolResult};
use response_parser::{ParsedResponse, ResponseParser};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Counters accumulated across steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AgentMetrics {
    pub iterations: usize,
    pub tool_calls: usize,
    pub parse_errors: usize,
}

/// Result of one step
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Model asked for a tool; it was dispatched
    ToolExecuted { call: ToolCall, result: ToolResult },

    /// Model signalled completion
    Completed(String),

    /// Output could not be interpreted; feedback for the model
    Reprompt(String),
}

impl StepOutcome {
    /// Whether the agent loop should stop
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct AgentStep {
    parser: ResponseParser,
    metrics: AgentMetrics,
}

impl AgentStep {
    pub fn new(parser: ResponseParser) -> Self {
        Self {
            parser,
            metrics: AgentMetrics::default(),
        }
    }

    pub fn metrics(&self) -> AgentMetrics {
        self.metrics
    }

    /// Interpret `raw_text` and act on it
    pub async fn run<R>(&mut self, raw_text: &str, registry: &R) -> StepOutcome
    where
        R: ToolRegistry + ?Sized,
    {
        self.metrics.iterations += 1;

        match self.parser.interpret(raw_text) {
            Ok(ParsedResponse::ToolCall(response)) => {
                let call = ToolCall::from(response);
                self.metrics.tool_calls += 1;
                let result = registry.execute(&call).await;
                debug!(tool = %call.name, success = result.success, "Step executed tool");
                StepOutcome::ToolExecuted { call, result }
            }
            Ok(ParsedResponse::Completion(done)) => {
                info!(iterations = self.metrics.iterations, "Agent completed");
                StepOutcome::Completed(done.response)
            }
            Err(err) => {
                self.metrics.parse_errors += 1;
                warn!(code = err.error_code(), "Re-prompting after unusable response");
                StepOutcome::Reprompt(err.feedback().to_string())
            }
        }
    }
}

/// [`AgentStep`] bound to a conversation
pub struct AgentSession<S> {
    conversation: S,
    step: AgentStep,
}

impl<S: ConversationService> AgentSession<S> {
    pub fn new(conversation: S, parser: ResponseParser) -> Self {
        Self {
            conversation,
            step: AgentStep::new(parser),
        }
    }

    pub fn conversation(&self) -> &S {
        &self.conversation
    }

    pub fn metrics(&self) -> AgentMetrics {
        self.step.metrics()
    }

    /// Record new user input and return the context for the model call
    pub async fn begin_turn(&self, input: &str) -> Result<Vec<Message>> {
        let history = self.conversation.get_all().await?;
        let context = build_context(input, &history)?;
        self.conversation.append(Message::user(input)).await?;
        Ok(context)
    }

    /// Record model output, run the step, and record its follow-up
    ///
    /// Tool results and re-prompt feedback are appended as user messages.
    pub async fn handle_response<R>(&mut self, raw_text: &str, registry: &R) -> Result<StepOutcome>
    where
        R: ToolRegistry + ?Sized,
    {
        self.conversation
            .append(Message::assistant(raw_text))
            .await?;

        let outcome = self.step.run(raw_text, registry).await;
        match &outcome {
            StepOutcome::ToolExecuted { call, result } => {
                let content = format!(
                    "Tool {} returned: {}",
                    call.name,
                    serde_json::to_string(result)?
                );
                self.conversation.append(Message::user(content)).await?;
            }
            StepOutcome::Reprompt(feedback) => {
                self.conversation
                    .append(Message::user(feedback.clone()))
                    .await?;
            }
            StepOutcome::Completed(_) => {}
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{InMemoryConversationRepository, InMemoryConversationService};
    use crate::error::RuntimeError;
    use crate::messages::MessageRole;
    use crate::tools::{InMemoryToolRegistry, Tool};
    use async_trait::async_trait;
    use serde_json::{json, Map, Value};
    use std::sync::Arc;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the arguments"
        }

        async fn execute(&self, args: Map<String, Value>) -> ToolResult {
            ToolResult::ok(Value::Object(args))
        }
    }

    fn registry() -> InMemoryToolRegistry {
        let mut registry = InMemoryToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();
        registry
    }

    async fn session() -> AgentSession<InMemoryConversationService> {
        let service = InMemoryConversationService::new(
            "session",
            Arc::new(InMemoryConversationRepository::new()),
        );
        service.create().await.unwrap();
        AgentSession::new(service, ResponseParser::default())
    }

    #[tokio::test]
    async fn test_step_executes_tool() {
        let mut step = AgentStep::default();
        let outcome = step
            .run("```json\n{\"tool\": \"echo\", \"args\": {\"x\": 1}}\n```", &registry())
            .await;

        let StepOutcome::ToolExecuted { call, result } = outcome else {
            panic!("expected tool execution");
        };
        assert_eq!(call.name, "echo");
        assert_eq!(result, ToolResult::ok(json!({"x": 1})));
        assert_eq!(
            step.metrics(),
            AgentMetrics {
                iterations: 1,
                tool_calls: 1,
                parse_errors: 0
            }
        );
    }

    #[tokio::test]
    async fn test_step_completion() {
        let mut step = AgentStep::default();
        let outcome = step
            .run(r#"{"done": true, "response": "All done!"}"#, &registry())
            .await;

        assert_eq!(outcome, StepOutcome::Completed("All done!".into()));
        assert!(outcome.is_terminal());
    }

    #[tokio::test]
    async fn test_step_reprompts_on_bad_output() {
        let mut step = AgentStep::default();
        let registry = registry();

        let outcome = step.run("I think I should read the file.", &registry).await;
        let StepOutcome::Reprompt(feedback) = &outcome else {
            panic!("expected reprompt");
        };
        assert!(feedback.starts_with("Failed to parse response as JSON:"));
        assert!(!outcome.is_terminal());

        let outcome = step.run(r#"{"done": false, "response": "x"}"#, &registry).await;
        assert!(matches!(outcome, StepOutcome::Reprompt(_)));
        assert_eq!(step.metrics().parse_errors, 2);
        assert_eq!(step.metrics().iterations, 2);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_not_a_parse_error() {
        let mut step = AgentStep::default();
        let outcome = step
            .run(r#"{"tool": "missing", "args": {}}"#, &registry())
            .await;

        let StepOutcome::ToolExecuted { result, .. } = outcome else {
            panic!("expected tool execution");
        };
        assert!(!result.success);
        assert_eq!(step.metrics().parse_errors, 0);
    }

    #[tokio::test]
    async fn test_session_records_full_turn() {
        let mut session = session().await;
        let registry = registry();

        let context = session.begin_turn("Echo something").await.unwrap();
        assert_eq!(context, vec![Message::user("Echo something")]);

        session
            .handle_response(r#"{"tool": "echo", "args": {"v": "hi"}}"#, &registry)
            .await
            .unwrap();
        let outcome = session
            .handle_response(r#"{"done": true, "response": "Echoed"}"#, &registry)
            .await
            .unwrap();
        assert!(outcome.is_terminal());

        let history = session.conversation().get_all().await.unwrap();
        let roles: Vec<MessageRole> = history.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
            ]
        );
        assert_eq!(
            history[2].content,
            r#"Tool echo returned: {"success":true,"data":{"v":"hi"}}"#
        );
        assert_eq!(session.metrics().iterations, 2);
    }

    #[tokio::test]
    async fn test_session_records_feedback() {
        let mut session = session().await;
        session.begin_turn("Do it").await.unwrap();
        session
            .handle_response(r#"{"args": {}}"#, &registry())
            .await
            .unwrap();

        let history = session.conversation().get_all().await.unwrap();
        let feedback = &history.last().unwrap().content;
        assert!(feedback.contains("Field \"tool\": Expected string but received undefined"));
    }

    #[tokio::test]
    async fn test_session_rejects_empty_input() {
        let session = session().await;
        let err = session.begin_turn("  ").await.unwrap_err();

        assert_eq!(err.error_code(), "E_EMPTY_INPUT");
        assert!(session.conversation().get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_session_without_conversation() {
        let service = InMemoryConversationService::new(
            "never-created",
            Arc::new(InMemoryConversationRepository::new()),
        );
        let session = AgentSession::new(service, ResponseParser::default());

        let err = session.begin_turn("hello").await.unwrap_err();
        assert!(matches!(err, RuntimeError::Conversation(_)));
        assert_eq!(err.error_code(), "E_CONVERSATION_NOT_FOUND");
    }
}
