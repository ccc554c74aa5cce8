use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use urlencoding::encode;

use crate::models::repository::HostUser;

pub const DEFAULT_OAUTH_BASE: &str = "https://github.com";

/// `repo` to create repositories and push files, `user` to read the profile.
pub const OAUTH_SCOPE: &str = "repo user";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("github error: {0}")]
    Github(String),
}

/// GitHub OAuth web flow: build the authorize URL, swap the callback code
/// for an access token, and look up who signed in.
#[derive(Clone)]
pub struct OauthService {
    pub client: Client,
    pub oauth_base: String,
    pub api_base: String,
    pub client_id: String,
    pub client_secret: String,
}

impl OauthService {
    pub fn new(
        client: Client,
        oauth_base: String,
        api_base: String,
        client_id: String,
        client_secret: String,
    ) -> Self {
        Self {
            client,
            oauth_base: oauth_base.trim_end_matches('/').to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
        }
    }

    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}/login/oauth/authorize?client_id={}&scope={}&state={}",
            self.oauth_base,
            encode(&self.client_id),
            encode(OAUTH_SCOPE),
            encode(state),
        )
    }

    pub async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        #[derive(Serialize)]
        struct Body<'a> {
            client_id: &'a str,
            client_secret: &'a str,
            code: &'a str,
        }

        // GitHub answers this endpoint with a form body unless JSON is
        // requested explicitly.
        #[derive(Deserialize)]
        struct TokenResp {
            access_token: Option<String>,
            error: Option<String>,
            error_description: Option<String>,
        }

        let body = Body {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            code,
        };

        let url = format!("{}/login/oauth/access_token", self.oauth_base);
        let resp = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(AuthError::Github(format!(
                "token exchange failed: {} {}",
                status, text
            )));
        }

        let tr: TokenResp = serde_json::from_str(&text)
            .map_err(|e| AuthError::Github(format!("invalid json in token response: {}", e)))?;

        if let Some(token) = tr.access_token {
            return Ok(token);
        }
        Err(AuthError::Github(
            tr.error_description
                .or(tr.error)
                .unwrap_or_else(|| "no access token in response".to_string()),
        ))
    }

    /// Profile of whoever the fresh token belongs to; the callback needs the
    /// login and display name to mint the session.
    pub async fn fetch_user(&self, token: &str) -> Result<HostUser, AuthError> {
        let url = format!("{}/user", self.api_base);
        let resp = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", token))
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(AuthError::Github(format!(
                "user lookup failed: {} {}",
                status, text
            )));
        }

        serde_json::from_str(&text)
            .map_err(|e| AuthError::Github(format!("invalid json in user response: {}", e)))
    }
}
