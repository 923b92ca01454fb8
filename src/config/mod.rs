//! Configuration management for rosterbot
//!
//! This module handles loading and validating configuration from a TOML file
//! or environment variables. Credentials can always be overridden from the
//! environment so they never need to live in the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::auth::AuthStrategy;
use crate::planner::MatchingMode;
use crate::utils::retry::RetryConfig;

/// Yahoo Fantasy Sports v2 API root
pub const DEFAULT_BASE_URL: &str = "https://fantasysports.yahooapis.com/fantasy/v2";

/// Yahoo OAuth2 token endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://api.login.yahoo.com/oauth2/get_token";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Roster resource identification
    pub api: ApiConfig,

    /// Credential material
    pub auth: AuthStrategy,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Planner settings
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Identifies the roster resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Game key (e.g. "mlb")
    pub game_key: String,

    /// League ID
    pub league_id: String,

    /// Team ID within the league
    pub team_id: String,
}

/// HTTP transport configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// User agent string
    pub user_agent: String,

    /// Retry policy for network calls
    pub retry: RetryConfig,
}

/// Planner configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Matching strategy
    pub matching: MatchingMode,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            user_agent: format!("rosterbot/{}", env!("CARGO_PKG_VERSION")),
            retry: RetryConfig::default(),
        }
    }
}

impl HttpConfig {
    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Credentials select the auth mode: a client id switches to the
    /// client-credentials exchange, otherwise the static token is used.
    pub fn from_env() -> Result<Self> {
        let base_url = env_var("ROSTERBOT_BASE_URL").unwrap_or_else(default_base_url);
        let game_key = env_var("ROSTERBOT_GAME_KEY").unwrap_or_else(|| String::from("mlb"));
        let league_id = env_var("ROSTERBOT_LEAGUE_ID").unwrap_or_default();
        let team_id = env_var("ROSTERBOT_TEAM_ID").unwrap_or_default();

        let auth = match env_var("ROSTERBOT_CLIENT_ID") {
            Some(client_id) => AuthStrategy::ClientCredentials {
                token_url: env_var("ROSTERBOT_TOKEN_URL")
                    .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
                client_id,
                client_secret: env_var("ROSTERBOT_CLIENT_SECRET").unwrap_or_default(),
                scope: env_var("ROSTERBOT_TOKEN_SCOPE"),
            },
            None => AuthStrategy::StaticToken {
                access_token: env_var("ROSTERBOT_ACCESS_TOKEN").unwrap_or_default(),
            },
        };

        let mut http = HttpConfig::default();
        if let Some(secs) = env_parse::<u64>("ROSTERBOT_REQUEST_TIMEOUT")? {
            http.request_timeout_secs = secs;
        }
        if let Some(retries) = env_parse::<u32>("ROSTERBOT_MAX_RETRIES")? {
            http.retry.max_retries = retries;
        }
        if let Some(agent) = env_var("ROSTERBOT_USER_AGENT") {
            http.user_agent = agent;
        }

        let matching = match env_var("ROSTERBOT_MATCHING") {
            Some(raw) => serde_json::from_value(serde_json::Value::String(raw.clone()))
                .with_context(|| format!("Invalid ROSTERBOT_MATCHING value: {raw}"))?,
            None => MatchingMode::default(),
        };

        Ok(Self {
            api: ApiConfig {
                base_url,
                game_key,
                league_id,
                team_id,
            },
            auth,
            http,
            planner: PlannerConfig { matching },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load from a file when given, else from the environment, then apply
    /// credential overrides and validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_env()?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Replace credential fields with environment values where set
    pub fn apply_env_overrides(&mut self) {
        match &mut self.auth {
            AuthStrategy::StaticToken { access_token } => {
                if let Some(token) = env_var("ROSTERBOT_ACCESS_TOKEN") {
                    *access_token = token;
                }
            }
            AuthStrategy::ClientCredentials {
                client_id,
                client_secret,
                ..
            } => {
                if let Some(id) = env_var("ROSTERBOT_CLIENT_ID") {
                    *client_id = id;
                }
                if let Some(secret) = env_var("ROSTERBOT_CLIENT_SECRET") {
                    *client_secret = secret;
                }
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .with_context(|| format!("Invalid base_url: {}", self.api.base_url))?;

        if self.api.game_key.trim().is_empty() {
            anyhow::bail!("game_key must not be empty");
        }

        if self.api.league_id.trim().is_empty() {
            anyhow::bail!("league_id must not be empty");
        }

        if self.api.team_id.trim().is_empty() {
            anyhow::bail!("team_id must not be empty");
        }

        if self.http.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        self.auth.validate().context("Invalid auth configuration")?;

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_var(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid {name} value: {raw}"))
        })
        .transpose()
}
