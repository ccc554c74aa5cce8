use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;

use super::repo_host::{HostError, RepoHost};
use crate::models::repository::{CreatedRepository, FileRevision, HostUser, NewRepository};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub REST adapter. Holds the shared client and base URL; the caller's
/// OAuth token is passed per call and never stored here.
#[derive(Clone)]
pub struct GithubRepo {
    client: Client,
    api_base: String,
}

impl GithubRepo {
    pub fn new(client: Client, api_base: String) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: Method, token: &str, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.api_base, path))
            .header("Authorization", format!("Bearer {}", token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

#[async_trait]
impl RepoHost for GithubRepo {
    async fn authenticated_user(&self, token: &str) -> Result<HostUser, HostError> {
        let resp = self.request(Method::GET, token, "/user").send().await?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(HostError::Api {
                status: status.as_u16(),
                detail: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| HostError::Decode(format!("user response: {}", e)))
    }

    async fn create_repository(
        &self,
        token: &str,
        spec: &NewRepository,
    ) -> Result<CreatedRepository, HostError> {
        let resp = self
            .request(Method::POST, token, "/user/repos")
            .json(spec)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(HostError::Api {
                status: status.as_u16(),
                detail: text,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| HostError::Decode(format!("create repository response: {}", e)))
    }

    async fn file_sha(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Option<String>, HostError> {
        let resp = self
            .request(
                Method::GET,
                token,
                &format!("/repos/{}/{}/contents/{}", owner, repo, path),
            )
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(HostError::Api {
                status: status.as_u16(),
                detail: text,
            });
        }

        let revision: FileRevision = serde_json::from_str(&text)
            .map_err(|e| HostError::Decode(format!("contents response: {}", e)))?;
        Ok(Some(revision.sha))
    }

    async fn put_file(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &[u8],
        sha: Option<&str>,
    ) -> Result<(), HostError> {
        #[derive(Serialize)]
        struct Body<'a> {
            message: &'a str,
            content: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            sha: Option<&'a str>,
        }

        let body = Body {
            message,
            // contents API takes the file inline, base64-encoded
            content: general_purpose::STANDARD.encode(content),
            sha,
        };

        let resp = self
            .request(
                Method::PUT,
                token,
                &format!("/repos/{}/{}/contents/{}", owner, repo, path),
            )
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(HostError::Api {
                status: status.as_u16(),
                detail: text,
            });
        }

        Ok(())
    }
}
