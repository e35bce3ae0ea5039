//! Application-wide constants
//!
//! Centralized location for endpoint paths, defaults and fixed strings
//! that are used across multiple modules.

/// Default backend base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Application identifier sent with every API request
pub const DEFAULT_CLIENT_TYPE: &str = "webapp";

/// Header carrying the application identifier
pub const CLIENT_TYPE_HEADER: &str = "X-Client-Type";

/// Cookie the backend reads the session token from
pub const DEFAULT_SESSION_COOKIE: &str = "access_token";

/// Endpoint that wipes the current user's chat history
pub const CLEAR_HISTORY_PATH: &str = "/api/clear-history";

/// Shown when a failure carries no message of its own
pub const FALLBACK_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Upper bound for a single clear-history request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Environment overrides
pub mod env {
    pub const BASE_URL: &str = "PARLEY_BASE_URL";
    pub const SESSION_TOKEN: &str = "PARLEY_SESSION_TOKEN";
    pub const LOG_FILE: &str = "PARLEY_LOG_FILE";
}
