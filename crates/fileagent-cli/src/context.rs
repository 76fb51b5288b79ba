use anyhow::Result;
use fileagent::agent::Agent;
use fileagent::memory::ConversationMemory;
use fileagent::providers::factory::get_provider;
use std::sync::Arc;

use crate::agents::agent::Orchestrator;
use crate::configuration::Settings;

/// Everything a session needs, built once at startup and dropped at exit
pub struct AppContext {
    pub agent: Arc<dyn Orchestrator>,
    pub memory: ConversationMemory,
    pub verbose: bool,
}

impl AppContext {
    pub fn new(agent: Arc<dyn Orchestrator>, verbose: bool) -> Self {
        Self {
            agent,
            memory: ConversationMemory::new(),
            verbose,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let provider = get_provider(settings.provider.to_provider_config())?;
        let agent = Agent::new(provider).with_max_turns(settings.agent.max_turns);
        tracing::debug!(
            tools = agent.tools().len(),
            max_turns = agent.max_turns(),
            "agent ready"
        );
        Ok(Self::new(Arc::new(agent), settings.agent.verbose))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::{AgentSettings, ProviderSettings};
    use fileagent::providers::factory::ProviderType;

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            provider: ProviderSettings {
                kind: ProviderType::Groq,
                host: Some("http://localhost:9".to_string()),
                model: None,
                temperature: Some(0.2),
                max_tokens: None,
                api_key: Some("gsk-test".to_string()),
            },
            agent: AgentSettings {
                max_turns: 4,
                verbose: true,
            },
        };

        let context = AppContext::from_settings(&settings).unwrap();
        assert!(context.verbose);
        assert!(context.memory.is_empty());
    }
}
