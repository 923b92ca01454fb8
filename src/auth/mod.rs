//! Bearer token acquisition
//!
//! One [`Authenticator`] serves both credential modes:
//!
//! - static token: the configured token is used as-is
//! - client credentials: an OAuth2 `client_credentials` grant against the
//!   configured token endpoint
//!
//! A token is acquired once per run, before the first roster fetch.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::config::HttpConfig;
use crate::utils::error::AuthError;
use crate::utils::retry::{with_retry_if, RetryConfig};

/// Credential material, selected by `mode` in configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum AuthStrategy {
    /// Pre-issued bearer token
    StaticToken { access_token: String },

    /// OAuth2 client-credentials exchange
    ClientCredentials {
        token_url: String,
        client_id: String,
        client_secret: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scope: Option<String>,
    },
}

impl AuthStrategy {
    pub fn mode(&self) -> &'static str {
        match self {
            Self::StaticToken { .. } => "static-token",
            Self::ClientCredentials { .. } => "client-credentials",
        }
    }

    /// Reject empty credential fields
    pub fn validate(&self) -> Result<(), AuthError> {
        match self {
            Self::StaticToken { access_token } => {
                if access_token.trim().is_empty() {
                    return Err(AuthError::MissingCredential("access_token"));
                }
            }
            Self::ClientCredentials {
                token_url,
                client_id,
                client_secret,
                ..
            } => {
                if token_url.trim().is_empty() {
                    return Err(AuthError::MissingCredential("token_url"));
                }
                if client_id.trim().is_empty() {
                    return Err(AuthError::MissingCredential("client_id"));
                }
                if client_secret.trim().is_empty() {
                    return Err(AuthError::MissingCredential("client_secret"));
                }
            }
        }
        Ok(())
    }
}

// Secrets stay out of logs.
impl fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaticToken { .. } => f
                .debug_struct("StaticToken")
                .field("access_token", &"<redacted>")
                .finish(),
            Self::ClientCredentials {
                token_url,
                client_id,
                scope,
                ..
            } => f
                .debug_struct("ClientCredentials")
                .field("token_url", token_url)
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .field("scope", scope)
                .finish(),
        }
    }
}

/// Access token for the fantasy API
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Acquires bearer tokens for one configured strategy
pub struct Authenticator {
    strategy: AuthStrategy,
    client: Client,
    retry: RetryConfig,
}

impl Authenticator {
    /// Create an authenticator with its own HTTP client
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Http` if the HTTP client cannot be created
    pub fn new(strategy: AuthStrategy, http: &HttpConfig) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(http.request_timeout())
            .user_agent(http.user_agent.as_str())
            .build()?;

        Ok(Self {
            strategy,
            client,
            retry: http.retry.clone(),
        })
    }

    /// Authenticator for a pre-issued token
    pub fn static_token(token: impl Into<String>) -> Self {
        Self {
            strategy: AuthStrategy::StaticToken {
                access_token: token.into(),
            },
            client: Client::new(),
            retry: RetryConfig::fail_fast(),
        }
    }

    pub fn strategy(&self) -> &AuthStrategy {
        &self.strategy
    }

    /// Acquire a token for this run
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if credentials are missing or the token endpoint
    /// fails after the retry budget.
    pub async fn bearer_token(&self) -> Result<BearerToken, AuthError> {
        self.strategy.validate()?;

        match &self.strategy {
            AuthStrategy::StaticToken { access_token } => {
                debug!("Using static bearer token");
                Ok(BearerToken::new(access_token.trim()))
            }
            AuthStrategy::ClientCredentials {
                token_url,
                client_id,
                client_secret,
                scope,
            } => {
                with_retry_if(
                    &self.retry,
                    || self.exchange(token_url, client_id, client_secret, scope.as_deref()),
                    AuthError::is_recoverable,
                )
                .await
            }
        }
    }

    async fn exchange(
        &self,
        token_url: &str,
        client_id: &str,
        client_secret: &str,
        scope: Option<&str>,
    ) -> Result<BearerToken, AuthError> {
        let mut form = vec![("grant_type", "client_credentials")];
        if let Some(scope) = scope {
            form.push(("scope", scope));
        }

        let response = self
            .client
            .post(token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        let token = body
            .access_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AuthError::InvalidResponse("missing access_token".to_string()))?;

        info!(
            token_type = body.token_type.as_deref().unwrap_or("bearer"),
            expires_in = ?body.expires_in,
            "Obtained access token via client credentials"
        );

        Ok(BearerToken::new(token))
    }
}
