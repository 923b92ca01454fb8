//! Fantasy API transport
//!
//! Fetches roster snapshots and dispatches roster updates against
//! `{base_url}/game/{game}/league/{league}/team/{team}/roster`.
//! A projected lineup is selected with a `;date=YYYY-MM-DD` suffix.
//!
//! Retries with exponential backoff apply here and nowhere else:
//! - 429, 500, 502, 503 and 504 responses
//! - timeouts and connection failures
//!
//! Other failures surface immediately.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{header::ACCEPT, Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::BearerToken;
use crate::config::{ApiConfig, HttpConfig};
use crate::encoder::UpdatePayload;
use crate::utils::error::FetchError;
use crate::utils::retry::{with_retry_if, RetryConfig};
use crate::utils::{format_lineup_date, truncate_text};

/// Observable result of one update call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub status: u16,
    pub body: String,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Snapshot provider and update dispatcher
#[async_trait]
pub trait RosterApi: Send + Sync {
    /// Raw roster document; `date` selects a projected lineup
    async fn fetch_roster(
        &self,
        token: &BearerToken,
        date: Option<NaiveDate>,
    ) -> Result<String, FetchError>;

    /// Send one update payload
    async fn update_roster(
        &self,
        token: &BearerToken,
        payload: &UpdatePayload,
    ) -> Result<DispatchOutcome, FetchError>;
}

/// HTTP client for the Yahoo Fantasy Sports roster resource
pub struct YahooRosterClient {
    client: Client,
    api: ApiConfig,
    retry: RetryConfig,
}

impl YahooRosterClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` for an unusable base URL and
    /// `FetchError::Http` if the HTTP client cannot be created
    pub fn new(api: ApiConfig, http: &HttpConfig) -> Result<Self, FetchError> {
        url::Url::parse(&api.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", api.base_url)))?;

        let client = Client::builder()
            .timeout(http.request_timeout())
            .user_agent(http.user_agent.as_str())
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            api,
            retry: http.retry.clone(),
        })
    }

    /// Roster resource URL, with a `;date=` selector when given
    pub fn roster_url(&self, date: Option<NaiveDate>) -> String {
        let mut url = format!(
            "{}/game/{}/league/{}/team/{}/roster",
            self.api.base_url.trim_end_matches('/'),
            self.api.game_key,
            self.api.league_id,
            self.api.team_id
        );
        if let Some(date) = date {
            url.push_str(";date=");
            url.push_str(&format_lineup_date(date));
        }
        url
    }

    async fn get_once(&self, url: &str, token: &BearerToken) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token.as_str())
            .header(ACCEPT, "application/xml")
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(FetchError::from_reqwest)?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_text(&body, 512),
            });
        }

        Ok(body)
    }

    async fn put_once(
        &self,
        url: &str,
        token: &BearerToken,
        payload: &UpdatePayload,
    ) -> Result<DispatchOutcome, FetchError> {
        let response = self
            .client
            .put(url)
            .bearer_auth(token.as_str())
            .json(payload)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(FetchError::from_reqwest)?;

        if FetchError::is_retryable_status(status.as_u16()) {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_text(&body, 512),
            });
        }

        Ok(DispatchOutcome {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl RosterApi for YahooRosterClient {
    async fn fetch_roster(
        &self,
        token: &BearerToken,
        date: Option<NaiveDate>,
    ) -> Result<String, FetchError> {
        let url = self.roster_url(date);
        debug!(url = %url, "Fetching roster");

        let body = with_retry_if(
            &self.retry,
            || self.get_once(&url, token),
            FetchError::is_recoverable,
        )
        .await?;

        debug!(bytes = body.len(), "Roster fetched");
        Ok(body)
    }

    async fn update_roster(
        &self,
        token: &BearerToken,
        payload: &UpdatePayload,
    ) -> Result<DispatchOutcome, FetchError> {
        let url = self.roster_url(None);

        let outcome = with_retry_if(
            &self.retry,
            || self.put_once(&url, token, payload),
            FetchError::is_recoverable,
        )
        .await?;

        let reason = StatusCode::from_u16(outcome.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("");
        if outcome.is_success() {
            info!(status = outcome.status, reason, "PUT request completed");
        } else {
            warn!(status = outcome.status, reason, "PUT request was not accepted");
        }
        info!(body = %truncate_text(&outcome.body, 512), "PUT request response");

        Ok(outcome)
    }
}
