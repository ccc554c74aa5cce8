use async_trait::async_trait;
use thiserror::Error;

use crate::models::repository::{CreatedRepository, HostUser, NewRepository};

#[derive(Debug, Error)]
pub enum HostError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {status} {detail}")]
    Api { status: u16, detail: String },
    #[error("invalid json: {0}")]
    Decode(String),
}

/// Seam over the source-hosting REST API. The provisioner only talks to this
/// trait, so the create-then-write sequence stays host-agnostic and tests can
/// swap in a stub.
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Authenticated "who am I" call. Doubles as the token liveness probe.
    async fn authenticated_user(&self, token: &str) -> Result<HostUser, HostError>;

    /// Creates a repository under the authenticated user's account.
    async fn create_repository(
        &self,
        token: &str,
        spec: &NewRepository,
    ) -> Result<CreatedRepository, HostError>;

    /// Current revision id of `path` on the default branch. `None` when the
    /// path does not exist yet.
    async fn file_sha(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<Option<String>, HostError>;

    /// Creates or overwrites a single file. `sha` must carry the existing
    /// revision id when the path is already present, otherwise the host
    /// rejects the write as a conflict.
    #[allow(clippy::too_many_arguments)]
    async fn put_file(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &[u8],
        sha: Option<&str>,
    ) -> Result<(), HostError>;
}
