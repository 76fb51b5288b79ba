use config::{Config, Environment, File};
use fileagent::agent::DEFAULT_MAX_TURNS;
use fileagent::providers::configs::{OpenAiProviderConfig, ProviderConfig, DEFAULT_TEMPERATURE};
use fileagent::providers::factory::ProviderType;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_PREFIX: &str = "FILEAGENT";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("agent.max_turns must be at least 1")]
    InvalidMaxTurns,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSettings {
    #[serde(rename = "type")]
    pub kind: ProviderType,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<i32>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ProviderSettings {
    /// Fill in the provider's defaults. The API key falls back to the provider's environment
    /// variable; when that is missing too, requests will fail but startup does not.
    pub fn to_provider_config(&self) -> ProviderConfig {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| std::env::var(self.kind.api_key_env()).ok())
            .unwrap_or_else(|| {
                tracing::warn!(
                    env_var = self.kind.api_key_env(),
                    "no API key configured, requests to the model will fail"
                );
                String::new()
            });

        let config = OpenAiProviderConfig {
            host: self
                .host
                .clone()
                .unwrap_or_else(|| self.kind.default_host().to_string()),
            api_key,
            model: self
                .model
                .clone()
                .unwrap_or_else(|| self.kind.default_model().to_string()),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        match self.kind {
            ProviderType::Groq => ProviderConfig::Groq(config),
            ProviderType::OpenAi => ProviderConfig::OpenAi(config),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentSettings {
    pub max_turns: usize,
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub provider: ProviderSettings,
    pub agent: AgentSettings,
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub provider: Option<String>,
    pub host: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub api_key: Option<String>,
    pub max_turns: Option<usize>,
    pub verbose: bool,
}

impl Settings {
    /// Layer defaults, the optional config file, `FILEAGENT_` environment variables and
    /// command-line overrides, in that order.
    pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("provider.type", "groq")?
            .set_default("provider.temperature", DEFAULT_TEMPERATURE as f64)?
            .set_default("agent.max_turns", DEFAULT_MAX_TURNS as u64)?
            .set_default("agent.verbose", false)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(false));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("provider.type", overrides.provider.clone())?
            .set_override_option("provider.host", overrides.host.clone())?
            .set_override_option("provider.model", overrides.model.clone())?
            .set_override_option(
                "provider.temperature",
                overrides.temperature.map(|t| t as f64),
            )?
            .set_override_option("provider.api_key", overrides.api_key.clone())?
            .set_override_option("agent.max_turns", overrides.max_turns.map(|n| n as u64))?
            .set_override_option("agent.verbose", overrides.verbose.then_some(true))?
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        if settings.agent.max_turns == 0 {
            return Err(SettingsError::InvalidMaxTurns);
        }
        tracing::debug!(provider = %settings.provider.kind, "settings loaded");
        Ok(settings)
    }
}

/// `~/.config/fileagent/config.toml`
pub fn default_config_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("fileagent").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::io::Write;

    fn clean_env() {
        for (key, _) in env::vars() {
            if key.starts_with("FILEAGENT_") {
                env::remove_var(&key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();

        let settings = Settings::load(None, &Overrides::default()).unwrap();
        assert_eq!(settings.provider.kind, ProviderType::Groq);
        assert_eq!(settings.provider.temperature, Some(0.2));
        assert_eq!(settings.provider.model, None);
        assert_eq!(settings.agent.max_turns, 15);
        assert!(!settings.agent.verbose);
    }

    #[test]
    #[serial]
    fn test_groq_provider_config_defaults() {
        clean_env();
        env::set_var("GROQ_API_KEY", "gsk-test");

        let settings = Settings::load(None, &Overrides::default()).unwrap();
        let config = settings.provider.to_provider_config();
        assert!(matches!(config, ProviderConfig::Groq(_)));

        let inner = config.inner();
        assert_eq!(inner.host, "https://api.groq.com/openai");
        assert_eq!(inner.model, "llama3-70b-8192");
        assert_eq!(inner.api_key, "gsk-test");
        assert_eq!(inner.temperature, Some(0.2));

        env::remove_var("GROQ_API_KEY");
    }

    #[test]
    #[serial]
    fn test_missing_api_key_is_not_fatal() {
        clean_env();
        env::remove_var("GROQ_API_KEY");

        let settings = Settings::load(None, &Overrides::default()).unwrap();
        assert_eq!(settings.provider.to_provider_config().inner().api_key, "");
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        clean_env();
        env::set_var("FILEAGENT_PROVIDER__TYPE", "openai");
        env::set_var("FILEAGENT_PROVIDER__MODEL", "gpt-4o");
        env::set_var("FILEAGENT_PROVIDER__TEMPERATURE", "0.7");
        env::set_var("FILEAGENT_AGENT__MAX_TURNS", "4");

        let settings = Settings::load(None, &Overrides::default()).unwrap();
        assert_eq!(settings.provider.kind, ProviderType::OpenAi);
        assert_eq!(settings.provider.model.as_deref(), Some("gpt-4o"));
        assert_eq!(settings.provider.temperature, Some(0.7));
        assert_eq!(settings.agent.max_turns, 4);

        let config = settings.provider.to_provider_config();
        assert!(matches!(config, ProviderConfig::OpenAi(_)));
        assert_eq!(config.inner().host, "https://api.openai.com");

        clean_env();
    }

    #[test]
    #[serial]
    fn test_command_line_wins_over_file_and_env() {
        clean_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[provider]\nmodel = \"from-file\"\nhost = \"http://file.host\"\n\n[agent]\nmax_turns = 3"
        )
        .unwrap();
        env::set_var("FILEAGENT_PROVIDER__MODEL", "from-env");

        let overrides = Overrides {
            model: Some("from-flag".to_string()),
            verbose: true,
            ..Default::default()
        };
        let settings = Settings::load(Some(&path), &overrides).unwrap();
        assert_eq!(settings.provider.model.as_deref(), Some("from-flag"));
        assert_eq!(settings.provider.host.as_deref(), Some("http://file.host"));
        assert_eq!(settings.agent.max_turns, 3);
        assert!(settings.agent.verbose);

        clean_env();
    }

    #[test]
    #[serial]
    fn test_unknown_provider_is_rejected() {
        clean_env();
        let overrides = Overrides {
            provider: Some("databricks".to_string()),
            ..Default::default()
        };
        assert!(Settings::load(None, &overrides).is_err());
    }

    #[test]
    #[serial]
    fn test_zero_max_turns_is_rejected() {
        clean_env();
        env::set_var("FILEAGENT_AGENT__MAX_TURNS", "0");
        let err = Settings::load(None, &Overrides::default()).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidMaxTurns));
        clean_env();

        let overrides = Overrides {
            max_turns: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            Settings::load(None, &overrides),
            Err(SettingsError::InvalidMaxTurns)
        ));
    }

    #[test]
    #[serial]
    fn test_missing_config_file_is_ignored() {
        clean_env();
        let path = PathBuf::from("/definitely/not/here/config.toml");
        assert!(Settings::load(Some(&path), &Overrides::default()).is_ok());
    }
}
