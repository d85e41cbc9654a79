use std::fmt;

use serde::Deserialize;

/// Errors raised while loading configuration at startup
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Env(#[from] envy::Error),

    #[error("Failed to load config: {0} must not be empty")]
    Empty(&'static str),
}

/// Application configuration loaded from environment variables
#[derive(Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL database connection URL
    #[serde(alias = "postgres")]
    pub database_url: String,

    /// Credential for the generative model API
    pub openai_api_key: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Chat model used for recommendations
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Sampling temperature, kept low for conservative completions
    #[serde(default = "default_openai_temperature")]
    pub openai_temperature: f32,

    /// Upper bound on a single model call
    #[serde(default = "default_openai_timeout_secs")]
    pub openai_timeout_secs: u64,

    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    #[serde(default = "default_db_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

fn default_openai_temperature() -> f32 {
    0.2
}

fn default_openai_timeout_secs() -> u64 {
    60
}

fn default_db_max_connections() -> u32 {
    5
}

fn default_db_acquire_timeout_secs() -> u64 {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)?;

        if config.database_url.trim().is_empty() {
            return Err(ConfigError::Empty("DATABASE_URL"));
        }
        if config.openai_api_key.trim().is_empty() {
            return Err(ConfigError::Empty("OPENAI_API_KEY"));
        }

        Ok(config)
    }

    /// First characters of the API key, safe to log
    pub fn masked_api_key(&self) -> String {
        let prefix: String = self.openai_api_key.chars().take(8).collect();
        format!("{}...", prefix)
    }

    /// Database target without credentials, safe to log
    pub fn database_target(&self) -> &str {
        self.database_url
            .rsplit_once('@')
            .map(|(_, target)| target)
            .unwrap_or("<unparsed>")
    }
}

// Credentials only ever appear masked.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_target())
            .field("openai_api_key", &self.masked_api_key())
            .field("openai_api_url", &self.openai_api_url)
            .field("openai_model", &self.openai_model)
            .field("openai_temperature", &self.openai_temperature)
            .field("openai_timeout_secs", &self.openai_timeout_secs)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
