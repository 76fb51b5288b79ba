use super::arguments::GenerateTextArgs;
use super::error::{ToolError, ToolResult};
use super::ToolOutput;
use crate::models::message::Message;
use crate::providers::base::Provider;
use crate::text::clean_newlines;

/// Ask the model for free-form text. No system prompt and no tools, just the prompt.
pub async fn generate_text(
    args: &GenerateTextArgs,
    provider: &dyn Provider,
) -> ToolResult<ToolOutput> {
    tracing::debug!(prompt_len = args.prompt.len(), "generating text");

    let messages = [Message::user().with_text(&args.prompt)];
    let (reply, _usage) = provider
        .complete("", &messages, &[])
        .await
        .map_err(|e| ToolError::Generation(e.to_string()))?;

    Ok(ToolOutput::Generated(clean_newlines(&reply.text())))
}
