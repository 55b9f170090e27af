//! Name → tool lookup and dispatch

use super::{Tool, ToolCall, ToolError, ToolResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry of callable tools
#[async_trait]
pub trait ToolRegistry: Send + Sync {
    /// Add a tool; names must be unique
    fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError>;

    /// Validate arguments and run the named tool
    ///
    /// Unknown tools and rejected arguments produce a failed [`ToolResult`].
    async fn execute(&self, call: &ToolCall) -> ToolResult;

    /// Registered tools, sorted by name
    fn list(&self) -> Vec<Arc<dyn Tool>>;
}

#[derive(Default)]
pub struct InMemoryToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl InMemoryToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    fn resolve(&self, call: &ToolCall) -> Result<Arc<dyn Tool>, ToolError> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| ToolError::NotFound(call.name.clone()))?;

        tool.validate_args(&call.args)
            .map_err(|errors| ToolError::InvalidArguments {
                tool: call.name.clone(),
                errors,
            })?;

        Ok(tool)
    }
}

#[async_trait]
impl ToolRegistry for InMemoryToolRegistry {
    fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::AlreadyRegistered(name));
        }
        debug!(tool = %name, "Registered tool");
        self.tools.insert(name, tool);
        Ok(())
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let tool = match self.resolve(call) {
            Ok(tool) => tool,
            Err(err) => {
                warn!(tool = %call.name, "Tool call rejected: {}", err);
                return err.into();
            }
        };

        debug!(tool = %call.name, "Executing tool");
        let result = tool.execute(call.args.clone()).await;
        debug!(tool = %call.name, success = result.success, "Tool finished");
        result
    }

    fn list(&self) -> Vec<Arc<dyn Tool>> {
        let mut tools: Vec<Arc<dyn Tool>> = self.tools.values().cloned().collect();
        tools.sort_by(|a, b| a.name().cmp(b.name()));
        tools
    }
}
