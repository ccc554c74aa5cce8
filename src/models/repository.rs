// src/models/repository.rs
use serde::{Deserialize, Serialize};

/// The authenticated user behind a bearer token, from `GET /user`.
#[derive(Debug, Clone, Deserialize)]
pub struct HostUser {
    pub login: String,
    pub name: Option<String>,
}

/// Body for `POST /user/repos`. `auto_init` asks the provider to seed the
/// repository with an initial commit so a default branch and a seed file
/// exist before we start writing content.
#[derive(Debug, Clone, Serialize)]
pub struct NewRepository {
    pub name: String,
    pub description: String,
    pub private: bool,
    pub auto_init: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

/// The provider's view of a freshly created repository.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedRepository {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub default_branch: Option<String>,
    pub owner: RepositoryOwner,
}

/// Revision identifier of an existing file, from the contents API. The
/// provider requires this sha when overwriting a path in place.
#[derive(Debug, Clone, Deserialize)]
pub struct FileRevision {
    pub sha: String,
}
