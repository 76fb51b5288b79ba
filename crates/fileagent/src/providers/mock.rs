use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::models::message::Message;
use crate::models::tool::Tool;
use crate::providers::base::{Provider, Usage};

/// Scripted provider for tests. Replies are handed out in order and every
/// request is kept so tests can inspect what the model was shown.
pub struct MockProvider {
    replies: Mutex<VecDeque<Result<Message, String>>>,
    requests: Mutex<Vec<MockRequest>>,
}

#[derive(Debug, Clone)]
pub struct MockRequest {
    pub system: String,
    pub messages: Vec<Message>,
    pub tool_names: Vec<String>,
}

impl MockProvider {
    pub fn new(responses: Vec<Message>) -> Self {
        Self {
            replies: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A provider whose next request fails with `error`
    pub fn failing(error: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([Err(error.to_string())])),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(
        &self,
        system: &str,
        messages: &[Message],
        tools: &[Tool],
    ) -> Result<(Message, Usage)> {
        self.requests.lock().unwrap().push(MockRequest {
            system: system.to_string(),
            messages: messages.to_vec(),
            tool_names: tools.iter().map(|t| t.name.clone()).collect(),
        });

        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(message)) => Ok((message, Usage::default())),
            Some(Err(error)) => Err(anyhow!(error)),
            // Out of script: answer with empty text so loops terminate
            None => Ok((Message::assistant().with_text(""), Usage::default())),
        }
    }
}
