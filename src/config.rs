use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::repositories::github_repo::DEFAULT_API_BASE;
use crate::services::oauth_services::DEFAULT_OAUTH_BASE;

/// Upper bound for every outbound call; the hosting API is the only slow
/// dependency and a hung request should fail the submission, not park it.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything read from the environment, once, at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github_client_id: String,
    pub github_client_secret: String,
    pub session_secret: String,
    pub github_api_base: String,
    pub github_oauth_base: String,
    pub frontend_url: String,
    pub allowed_origins: String,
    pub port: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            github_client_id: env::var("GITHUB_CLIENT_ID")
                .context("GITHUB_CLIENT_ID not set")?
                .trim()
                .to_string(),
            github_client_secret: env::var("GITHUB_CLIENT_SECRET")
                .context("GITHUB_CLIENT_SECRET not set")?
                .trim()
                .to_string(),
            session_secret: env::var("SESSION_SECRET")
                .context("SESSION_SECRET not set")?
                .trim()
                .to_string(),
            github_api_base: env::var("GITHUB_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            github_oauth_base: env::var("GITHUB_OAUTH_BASE")
                .unwrap_or_else(|_| DEFAULT_OAUTH_BASE.to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string())
                .trim_end_matches('/')
                .to_string(),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "8080".to_string()),
        })
    }
}
