use crate::error::{config_error, env_error, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use url::Url;

/// Default base URL for resource operations
pub const DEFAULT_API_BASE_URL: &str = "https://api.calendly.com";
/// Default base URL for OAuth token issuance
pub const DEFAULT_AUTH_BASE_URL: &str = "https://auth.calendly.com";

/// Credentials used to authorize outbound calls and OAuth exchanges
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Personal access token (legacy API key)
    pub api_key: Option<String>,
    /// OAuth access token
    pub access_token: Option<String>,
    /// OAuth refresh token, only ever used to obtain new access tokens
    pub refresh_token: Option<String>,
    /// OAuth application client ID
    pub client_id: Option<String>,
    /// OAuth application client secret
    pub client_secret: Option<String>,
}

impl Credentials {
    /// Bearer token for outbound calls. The OAuth access token wins over the API key.
    pub fn bearer_token(&self) -> Option<&str> {
        self.access_token.as_deref().or(self.api_key.as_deref())
    }

    /// Client ID and secret, both required for token exchange
    pub fn client_credentials(&self) -> Result<(&str, &str)> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or_else(|| config_error("CALENDLY_CLIENT_ID is not configured"))?;
        let client_secret = self
            .client_secret
            .as_deref()
            .ok_or_else(|| config_error("CALENDLY_CLIENT_SECRET is not configured"))?;
        Ok((client_id, client_secret))
    }
}

/// Main configuration structure for the server
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    /// Base URL for resource operations
    pub api_base_url: Url,
    /// Base URL for OAuth authorization and token issuance
    pub auth_base_url: Url,
    /// Default user URI for listings that name neither user nor organization
    pub user_uri: Option<String>,
    /// Default organization URI for listings that name neither user nor organization
    pub organization_uri: Option<String>,
    /// Request timeout; `None` keeps the HTTP client's default
    pub http_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("valid default API URL"),
            auth_base_url: Url::parse(DEFAULT_AUTH_BASE_URL).expect("valid default auth URL"),
            user_uri: None,
            organization_uri: None,
            http_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let credentials = Credentials {
            api_key: env_opt("CALENDLY_API_KEY"),
            access_token: env_opt("CALENDLY_ACCESS_TOKEN"),
            refresh_token: env_opt("CALENDLY_REFRESH_TOKEN"),
            client_id: env_opt("CALENDLY_CLIENT_ID"),
            client_secret: env_opt("CALENDLY_CLIENT_SECRET"),
        };

        let api_base_url = env_url("CALENDLY_API_BASE_URL", DEFAULT_API_BASE_URL)?;
        let auth_base_url = env_url("CALENDLY_AUTH_BASE_URL", DEFAULT_AUTH_BASE_URL)?;

        let http_timeout = env_opt("CALENDLY_HTTP_TIMEOUT_SECS")
            .map(|secs| {
                secs.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| env_error("CALENDLY_HTTP_TIMEOUT_SECS"))
            })
            .transpose()?;

        Ok(Config {
            credentials,
            api_base_url,
            auth_base_url,
            user_uri: env_opt("CALENDLY_USER_URI"),
            organization_uri: env_opt("CALENDLY_ORGANIZATION_URI"),
            http_timeout,
        })
    }

    /// Set the credentials, mostly useful in tests
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_url(key: &str, default: &str) -> Result<Url> {
    let raw = env_opt(key).unwrap_or_else(|| default.to_string());
    Url::parse(raw.trim_end_matches('/')).map_err(|_| env_error(key))
}
