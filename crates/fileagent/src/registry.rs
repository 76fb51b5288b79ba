use std::collections::HashMap;
use std::sync::Arc;

use strum::IntoEnumIterator;

use crate::errors::{AgentError, AgentResult};
use crate::models::content::Content;
use crate::models::tool::{Tool, ToolCall};
use crate::providers::base::Provider;
use crate::tools::ToolKind;

/// Every tool the agent may call, looked up by name.
///
/// Built once at startup and never changed afterwards.
pub struct ToolRegistry {
    tools: Vec<Tool>,
    by_name: HashMap<&'static str, ToolKind>,
    provider: Arc<dyn Provider>,
}

impl ToolRegistry {
    /// `provider` backs `generate_text`
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        let kinds: Vec<ToolKind> = ToolKind::iter().collect();
        Self {
            tools: kinds.iter().map(|kind| kind.tool()).collect(),
            by_name: kinds.iter().map(|kind| (kind.name(), *kind)).collect(),
            provider,
        }
    }

    /// Tool descriptors in registration order
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<ToolKind> {
        self.by_name.get(name).copied()
    }

    pub async fn call(&self, tool_call: ToolCall) -> AgentResult<Vec<Content>> {
        let kind = self
            .get(&tool_call.name)
            .ok_or_else(|| AgentError::ToolNotFound(tool_call.name.clone()))?;

        tracing::debug!(tool = kind.name(), arguments = %tool_call.arguments, "calling tool");

        match kind.invoke(&tool_call.arguments, self.provider.as_ref()).await {
            Ok(output) => Ok(vec![Content::text(output.to_string())]),
            Err(err) => {
                tracing::debug!(tool = kind.name(), error = %err, "tool failed");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockProvider;
    use serde_json::json;
    use tempfile::TempDir;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(Arc::new(MockProvider::new(vec![])))
    }

    #[test]
    fn test_registry_lists_all_tools_in_order() {
        let registry = registry();
        let names: Vec<&str> = registry.tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), 8);
        assert_eq!(names[0], "create_file");
        assert_eq!(names[7], "generate_text");
        assert_eq!(registry.get("delete_dir"), Some(ToolKind::DeleteDir));
        assert_eq!(registry.get("format_disk"), None);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let result = registry()
            .call(ToolCall::new("format_disk", json!({})))
            .await;
        assert_eq!(
            result,
            Err(AgentError::ToolNotFound("format_disk".to_string()))
        );
    }

    #[tokio::test]
    async fn test_call_returns_observation_text() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("out");
        let registry = registry();

        let result = registry
            .call(ToolCall::new(
                "create_dir",
                json!({"path": dir.to_str().unwrap()}),
            ))
            .await
            .unwrap();
        assert_eq!(
            result[0].as_text(),
            Some(format!("Directory created at {}", dir.display()).as_str())
        );

        let again = registry
            .call(ToolCall::new(
                "create_dir",
                json!({"path": dir.to_str().unwrap()}),
            ))
            .await;
        assert_eq!(
            again,
            Err(AgentError::ExecutionError(
                "Directory already exists.".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_bad_arguments_are_invalid_parameters() {
        let result = registry()
            .call(ToolCall::new("terminal_tool", json!({"directory": "/tmp"})))
            .await;
        assert!(matches!(result, Err(AgentError::InvalidParameters(_))));
    }
}
