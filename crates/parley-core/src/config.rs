use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{
    env, DEFAULT_BASE_URL, DEFAULT_CLIENT_TYPE, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SESSION_COOKIE,
};

/// Client configuration that can be loaded from a JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `http://localhost:8080`
    pub base_url: String,

    /// Application identifier sent in the client-type header
    pub client_type: String,

    /// Session token forwarded as a cookie (unauthenticated when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,

    /// Name of the session cookie
    pub session_cookie: String,

    /// Timeout applied to each clear-history request
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_type: DEFAULT_CLIENT_TYPE.to_string(),
            session_token: None,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, client_type: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client_type: client_type.into(),
            ..Self::default()
        }
    }

    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: ClientConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// `<config dir>/parley/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("parley").join("config.json"))
    }

    /// Load the explicit file if given, else the default file if it exists,
    /// else built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Apply `PARLEY_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base_url) = lookup(env::BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = base_url;
        }
        if let Some(token) = lookup(env::SESSION_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.session_token = Some(token);
        }
        self
    }

    /// Check the values and normalize the base URL
    pub fn validated(mut self) -> Result<Self> {
        self.base_url = normalize_base_url(&self.base_url)?;
        if self.client_type.trim().is_empty() {
            bail!("Client type cannot be empty");
        }
        if self.session_cookie.trim().is_empty() {
            bail!("Session cookie name cannot be empty");
        }
        if self.request_timeout_secs == 0 {
            bail!("Request timeout must be at least one second");
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// `Cookie` header value for the configured session, if any
    pub fn session_cookie_header(&self) -> Option<String> {
        self.session_token
            .as_deref()
            .map(|token| format!("{}={}", self.session_cookie, token))
    }
}

/// Validates and normalizes a backend base URL.
///
/// Must be non-empty and use http:// or https://. Trailing slashes are removed.
pub fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim();

    if trimmed.is_empty() {
        bail!("Base URL cannot be empty");
    }

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        bail!("Base URL must start with http:// or https://: {}", trimmed);
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
