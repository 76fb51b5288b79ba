use super::{
    base::Provider,
    configs::{
        ProviderConfig, GROQ_API_KEY_ENV, GROQ_DEFAULT_MODEL, GROQ_HOST, OPENAI_API_KEY_ENV,
        OPENAI_DEFAULT_MODEL, OPENAI_HOST,
    },
    openai::OpenAiProvider,
};
use anyhow::Result;
use serde::Deserialize;
use std::sync::Arc;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(EnumIter, EnumString, Display, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Groq,
    OpenAi,
}

impl ProviderType {
    pub fn default_host(&self) -> &'static str {
        match self {
            ProviderType::Groq => GROQ_HOST,
            ProviderType::OpenAi => OPENAI_HOST,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderType::Groq => GROQ_DEFAULT_MODEL,
            ProviderType::OpenAi => OPENAI_DEFAULT_MODEL,
        }
    }

    /// The environment variable holding this provider's credential
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderType::Groq => GROQ_API_KEY_ENV,
            ProviderType::OpenAi => OPENAI_API_KEY_ENV,
        }
    }
}

pub fn get_provider(config: ProviderConfig) -> Result<Arc<dyn Provider>> {
    match config {
        ProviderConfig::Groq(groq_config) => Ok(Arc::new(OpenAiProvider::new(groq_config)?)),
        ProviderConfig::OpenAi(openai_config) => Ok(Arc::new(OpenAiProvider::new(openai_config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_provider_type_names() {
        assert_eq!(ProviderType::from_str("groq").unwrap(), ProviderType::Groq);
        assert_eq!(ProviderType::from_str("openai").unwrap(), ProviderType::OpenAi);
        assert_eq!(ProviderType::Groq.to_string(), "groq");
        assert_eq!(ProviderType::iter().count(), 2);
    }

    #[test]
    fn test_groq_defaults() {
        assert_eq!(ProviderType::Groq.default_model(), "llama3-70b-8192");
        assert_eq!(ProviderType::Groq.api_key_env(), "GROQ_API_KEY");
    }
}
