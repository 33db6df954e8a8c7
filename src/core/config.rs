//! Configuration loaded once from the environment and handed to collaborators.

use std::env;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct:free";
pub const DEFAULT_SITEVERIFY_URL: &str =
    "https://challenges.cloudflare.com/turnstile/v0/siteverify";

/// Model gateway settings.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    /// `None` when OPENROUTER_API_KEY is unset; requests then fail with a configuration error.
    pub api_key: Option<String>,
    pub model_id: String,
}

/// Human-verification (Turnstile) settings.
#[derive(Debug, Clone)]
pub struct TurnstileConfig {
    pub enabled: bool,
    pub secret_key: Option<String>,
    pub verify_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub turnstile: TurnstileConfig,
}

/// Errors for commands that cannot run with the loaded configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENROUTER_API_KEY is not set")]
    MissingApiKey,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gateway = GatewayConfig {
            base_url: get("OPENROUTER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: get("OPENROUTER_API_KEY"),
            model_id: get("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        };

        // Either switch set to "false" disables verification.
        let enabled = get("TURNSTILE_ENABLED").as_deref() != Some("false")
            && get("NEXT_PUBLIC_TURNSTILE_ENABLED").as_deref() != Some("false");
        let turnstile = TurnstileConfig {
            enabled,
            secret_key: get("TURNSTILE_SECRET_KEY"),
            verify_url: DEFAULT_SITEVERIFY_URL.to_string(),
        };

        Config { gateway, turnstile }
    }

    /// API key, or an error for commands that need one up front.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.gateway
            .api_key
            .as_deref()
            .ok_or(ConfigError::MissingApiKey)
    }
}
