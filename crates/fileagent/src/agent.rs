use anyhow::Result;
use futures::stream::BoxStream;
use serde_json::json;
use std::sync::Arc;

use crate::errors::{AgentError, AgentResult};
use crate::models::content::Content;
use crate::models::message::{Message, ToolRequest};
use crate::models::tool::{Tool, ToolCall};
use crate::prompt_template::{load_prompt, SYSTEM_PROMPT};
use crate::providers::base::Provider;
use crate::registry::ToolRegistry;

/// Rounds of tool calling allowed for a single user turn
pub const DEFAULT_MAX_TURNS: usize = 15;

pub const ITERATION_LIMIT_MESSAGE: &str = "Agent stopped due to iteration limit.";

/// Agent pairs a hosted model with the file and terminal tools it pilots
pub struct Agent {
    provider: Arc<dyn Provider>,
    registry: ToolRegistry,
    max_turns: usize,
}

impl Agent {
    /// Create an agent whose tools share `provider` with the agent itself
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            registry: ToolRegistry::new(Arc::clone(&provider)),
            provider,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn tools(&self) -> &[Tool] {
        self.registry.tools()
    }

    pub fn system_prompt(&self) -> AgentResult<String> {
        let context = json!({
            "tools": self.registry.tools(),
            "current_date": chrono::Local::now().format("%Y-%m-%d").to_string(),
        });
        load_prompt(SYSTEM_PROMPT, &context).map_err(|e| AgentError::Internal(e.to_string()))
    }

    /// Run one requested tool. A request the provider could not parse passes its error through.
    async fn dispatch_tool_call(
        &self,
        tool_call: AgentResult<ToolCall>,
    ) -> AgentResult<Vec<Content>> {
        let call = tool_call?;
        self.registry.call(call).await
    }

    /// Create a stream that yields each message as it's generated by the agent.
    ///
    /// Assistant messages and the tool responses they trigger alternate until the model
    /// answers without a tool request or the round limit is reached.
    pub async fn reply(&self, messages: &[Message]) -> Result<BoxStream<'_, Result<Message>>> {
        let mut messages = messages.to_vec();
        let tools = self.registry.tools().to_vec();
        let system_prompt = self.system_prompt()?;

        Ok(Box::pin(async_stream::try_stream! {
            let mut finished = false;

            for turn in 0..self.max_turns {
                let (response, usage) = self.provider.complete(
                    &system_prompt,
                    &messages,
                    &tools,
                ).await?;
                tracing::debug!(turn, total_tokens = ?usage.total_tokens, "model responded");

                yield response.clone();

                // Make sure the message above reaches the caller before tools start running
                tokio::task::yield_now().await;

                let tool_requests: Vec<&ToolRequest> = response.content
                    .iter()
                    .filter_map(|content| content.as_tool_request())
                    .collect();

                if tool_requests.is_empty() {
                    finished = true;
                    break;
                }

                // One at a time, in the order the model asked for them
                let mut message_tool_response = Message::user();
                for request in &tool_requests {
                    let output = self.dispatch_tool_call(request.tool_call.clone()).await;
                    message_tool_response = message_tool_response.with_tool_response(
                        request.id.clone(),
                        output,
                    );
                }

                yield message_tool_response.clone();

                messages.push(response.clone());
                messages.push(message_tool_response);
            }

            if !finished {
                tracing::warn!(max_turns = self.max_turns, "tool loop hit the round limit");
                yield Message::assistant().with_text(ITERATION_LIMIT_MESSAGE);
            }
        }))
    }
}
