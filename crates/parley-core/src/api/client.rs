use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::COOKIE;

use super::HistoryBackend;
use crate::config::ClientConfig;
use crate::constants::{CLEAR_HISTORY_PATH, CLIENT_TYPE_HEADER};
use crate::error::ClearHistoryError;

/// HTTP client bound to one backend and one application identifier
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client_type: String,
    session_cookie: Option<String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let config = config.clone().validated()?;
        let timeout = config.request_timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            session_cookie: config.session_cookie_header(),
            base_url: config.base_url,
            client_type: config.client_type,
            timeout,
            client,
        })
    }

    /// Client for the default local backend (`http://localhost:8080`, `webapp`)
    pub fn with_defaults() -> Result<Self> {
        Self::new(&ClientConfig::default())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client_type(&self) -> &str {
        &self.client_type
    }

    pub fn has_session(&self) -> bool {
        self.session_cookie.is_some()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /api/clear-history
    pub async fn clear_history(&self) -> Result<(), ClearHistoryError> {
        let url = self.endpoint(CLEAR_HISTORY_PATH);

        let mut request = self
            .client
            .post(&url)
            .header(CLIENT_TYPE_HEADER, &self.client_type);
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClearHistoryError::TimedOut(self.timeout)
            } else {
                ClearHistoryError::from(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "clear-history rejected");
            return Err(ClearHistoryError::Status {
                status: status.as_u16(),
            });
        }

        tracing::info!(%url, "chat history cleared");
        Ok(())
    }
}

impl HistoryBackend for ApiClient {
    async fn clear_history(&self) -> Result<(), ClearHistoryError> {
        ApiClient::clear_history(self).await
    }
}
