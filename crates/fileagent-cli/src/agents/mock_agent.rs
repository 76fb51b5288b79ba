use anyhow::{anyhow, Result};
use async_trait::async_trait;
use fileagent::models::message::Message;
use futures::stream::BoxStream;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::agents::agent::Orchestrator;

/// Replies with scripted message batches, one batch per call, and remembers what it was sent
#[derive(Default)]
pub struct MockAgent {
    replies: Mutex<VecDeque<Result<Vec<Message>, String>>>,
    received: Mutex<Vec<Vec<Message>>>,
}

impl MockAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, messages: Vec<Message>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(messages));
        self
    }

    pub fn with_failure(self, error: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(error.to_string()));
        self
    }

    pub fn received(&self) -> Vec<Vec<Message>> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Orchestrator for MockAgent {
    async fn reply(&self, messages: &[Message]) -> Result<BoxStream<'_, Result<Message>>> {
        self.received.lock().unwrap().push(messages.to_vec());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(batch)) => Ok(Box::pin(futures::stream::iter(batch.into_iter().map(Ok)))),
            Some(Err(error)) => Err(anyhow!(error)),
            None => Ok(Box::pin(futures::stream::empty())),
        }
    }
}
