use std::sync::Arc;

use chrono::Utc;
use log::info;
use thiserror::Error;

use crate::models::portfolio::{slugify, PortfolioData, ProvisionedRepository};
use crate::models::repository::NewRepository;
use crate::repositories::repo_host::{HostError, RepoHost};
use crate::site;

/// Longest repository description the host accepts.
const DESCRIPTION_LIMIT: usize = 350;

#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The liveness probe failed; the stored token is stale or revoked.
    #[error("invalid credential: {0}")]
    Credential(String),
    /// A provisioning step failed after the credential checked out.
    #[error("{step} failed: {detail}")]
    Step { step: &'static str, detail: String },
}

fn step_err(step: &'static str, err: HostError) -> ProvisionError {
    ProvisionError::Step {
        step,
        detail: err.to_string(),
    }
}

/// Orchestrates the create-repository-then-write-files sequence against a
/// [`RepoHost`]. Strictly sequential, no retry; a failure after the
/// repository exists leaves it live but partially populated.
#[derive(Clone)]
pub struct ProvisionService {
    host: Arc<dyn RepoHost>,
}

impl ProvisionService {
    pub fn new(host: Arc<dyn RepoHost>) -> Self {
        Self { host }
    }

    pub async fn provision(
        &self,
        token: &str,
        owner_hint: &str,
        profile: &PortfolioData,
    ) -> Result<ProvisionedRepository, ProvisionError> {
        // One no-op authenticated call up front; any failure means the user
        // has to sign in again, so nothing below runs on a dead token.
        let user = self
            .host
            .authenticated_user(token)
            .await
            .map_err(|e| ProvisionError::Credential(e.to_string()))?;

        // Repeat submissions get a fresh repository; the timestamp keeps
        // names from colliding instead of erroring on the second save.
        let repo_name = derive_repo_name(&profile.raw_display_name, Utc::now().timestamp());
        info!(
            "provisioning {} for {} (session hint: {})",
            repo_name, user.login, owner_hint
        );

        // auto_init makes the host create the default branch and a seed
        // README, which the contents API needs before it accepts updates.
        let spec = NewRepository {
            name: repo_name,
            description: repo_description(&profile.raw_bio),
            private: false,
            auto_init: true,
        };
        let created = self
            .host
            .create_repository(token, &spec)
            .await
            .map_err(|e| step_err("create repository", e))?;
        let owner = created.owner.login.clone();

        let seed_sha = self
            .host
            .file_sha(token, &owner, &created.name, site::README_PATH)
            .await
            .map_err(|e| step_err("read seed file", e))?;

        let files = site::render_site(profile).map_err(|e| ProvisionError::Step {
            step: "render site",
            detail: e.to_string(),
        })?;
        for (path, content) in &files {
            // Only the seed README already exists; every other path is a
            // fresh create and must not carry a revision id.
            let sha = if path == site::README_PATH {
                seed_sha.as_deref()
            } else {
                None
            };
            self.host
                .put_file(
                    token,
                    &owner,
                    &created.name,
                    path,
                    &format!("Add {}", path),
                    content.as_bytes(),
                    sha,
                )
                .await
                .map_err(|e| ProvisionError::Step {
                    step: "write file",
                    detail: format!("{}: {}", path, e),
                })?;
        }

        info!("created repository {}", created.html_url);
        Ok(ProvisionedRepository {
            html_url: created.html_url,
            owner_login: owner,
            repo_name: created.name,
        })
    }
}

/// `slugify(display name)` + fixed suffix + timestamp disambiguator.
pub fn derive_repo_name(display_name: &str, timestamp: i64) -> String {
    format!("{}-portfolio-{}", slugify(display_name), timestamp)
}

/// Flattens the bio onto one line and truncates it for use as repository
/// metadata.
pub fn repo_description(bio: &str) -> String {
    bio.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(DESCRIPTION_LIMIT)
        .collect()
}
