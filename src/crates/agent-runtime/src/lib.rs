//! Agent runtime collaborators
//!
//! Everything an agent loop needs around the response parser:
//!
//! - `messages` - Chat roles and messages
//! - `conversation` - Per-conversation history with existence checks
//! - `tools` - Tool trait and name-keyed registry
//! - `context` - Context assembly for the next model call
//! - `agent` - One interpret-and-act step, optionally bound to a conversation
//!
//! # Example
//!
//! ```rust
//! use agent_runtime::tools::InMemoryToolRegistry;
//! use agent_runtime::{AgentStep, StepOutcome};
//!
//! # tokio_test_block(async {
//! let registry = InMemoryToolRegistry::new();
//! let mut step = AgentStep::default();
//!
//! let outcome = step.run(r#"{"done": true, "response": "Finished"}"#, &registry).await;
//! assert_eq!(outcome, StepOutcome::Completed("Finished".into()));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod agent;
pub mod context;
pub mod conversation;
pub mod error;
pub mod messages;
pub mod tools;

pub use agent::{AgentMetrics, AgentSession, AgentStep, StepOutcome};
pub use context::{build_context, ContextError};
pub use conversation::{
    ConversationError, ConversationService, InMemoryConversationRepository,
    InMemoryConversationService,
};
pub use error::{Result, RuntimeError};
pub use messages::{Message, MessageRole};
pub use tools::{InMemoryToolRegistry, Tool, ToolCall, ToolError, ToolRegistry, ToolResult};
