pub const GROQ_HOST: &str = "https://api.groq.com/openai";
pub const GROQ_DEFAULT_MODEL: &str = "llama3-70b-8192";
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

pub const OPENAI_HOST: &str = "https://api.openai.com";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const DEFAULT_TEMPERATURE: f32 = 0.2;

// Unified enum to wrap different provider configurations
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Groq(OpenAiProviderConfig),
    OpenAi(OpenAiProviderConfig),
}

/// Settings for any endpoint speaking the OpenAI chat-completions protocol
#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

impl OpenAiProviderConfig {
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self {
            host: GROQ_HOST.to_string(),
            api_key: api_key.into(),
            model: GROQ_DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: None,
        }
    }

    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            host: OPENAI_HOST.to_string(),
            api_key: api_key.into(),
            model: OPENAI_DEFAULT_MODEL.to_string(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: None,
        }
    }
}

impl ProviderConfig {
    pub fn inner(&self) -> &OpenAiProviderConfig {
        match self {
            ProviderConfig::Groq(config) | ProviderConfig::OpenAi(config) => config,
        }
    }
}
