use anyhow::Result;
use fileagent::memory::ConversationMemory;
use fileagent::models::message::Message;
use fileagent::models::role::Role;
use fileagent::text::clean_newlines;
use futures::TryStreamExt;

use crate::context::AppContext;
use crate::prompt::{InputType, Prompt};

pub struct Session<'a> {
    context: AppContext,
    prompt: Box<dyn Prompt + 'a>,
}

impl<'a> Session<'a> {
    pub fn new(context: AppContext, prompt: Box<dyn Prompt + 'a>) -> Self {
        Session { context, prompt }
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.context.memory
    }

    pub async fn start(&mut self) -> Result<()> {
        self.prompt.ready();

        loop {
            let input = self.prompt.get_input()?;
            match input.input_type {
                InputType::Message => {
                    if let Some(content) = input.content {
                        self.process_input(content).await;
                    }
                }
                InputType::Exit => break,
                InputType::AskAgain => continue,
            }
        }

        tracing::debug!(exchanges = self.memory().len(), "session closed");
        self.prompt.close();
        Ok(())
    }

    /// Run one user turn. Only a completed turn with a non-empty answer is remembered.
    async fn process_input(&mut self, input: String) {
        let mut messages = self.context.memory.as_messages();
        messages.push(Message::user().with_text(&input));

        self.prompt.show_busy();
        let result = self.agent_process_messages(&messages).await;
        self.prompt.hide_busy();

        match result {
            Ok(answer) if answer.trim().is_empty() => {
                tracing::warn!("model returned an empty answer");
                self.prompt
                    .render_error("The model returned an empty answer. Try rephrasing the request.");
            }
            Ok(answer) => {
                self.prompt.render(raw_message(&format!(
                    "Agent: {}",
                    clean_newlines(&answer)
                )));
                self.context.memory.record(input, answer);
            }
            Err(e) => {
                tracing::error!(error = %e, "turn failed");
                self.prompt.render_error(&e.to_string());
            }
        }
    }

    /// Drain the reply stream and return the final answer. Tool rounds are shown when verbose.
    async fn agent_process_messages(&mut self, messages: &[Message]) -> Result<String> {
        let mut stream = self.context.agent.reply(messages).await?;
        let mut answer = String::new();

        while let Some(message) = stream.try_next().await? {
            if message.role == Role::Assistant && !message.has_tool_request() {
                answer = message.text();
            } else if self.context.verbose {
                self.prompt.render(Box::new(message));
            }
        }
        Ok(answer)
    }
}

fn raw_message(content: &str) -> Box<Message> {
    Box::new(Message::assistant().with_text(content))
}
