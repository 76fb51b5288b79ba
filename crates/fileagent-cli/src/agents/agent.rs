use anyhow::Result;
use async_trait::async_trait;
use fileagent::{agent::Agent, models::message::Message};
use futures::stream::BoxStream;

/// Whatever turns a conversation into a stream of replies, tool rounds included
#[async_trait]
pub trait Orchestrator: Send + Sync {
    async fn reply(&self, messages: &[Message]) -> Result<BoxStream<'_, Result<Message>>>;
}

#[async_trait]
impl Orchestrator for Agent {
    async fn reply(&self, messages: &[Message]) -> Result<BoxStream<'_, Result<Message>>> {
        Agent::reply(self, messages).await
    }
}
