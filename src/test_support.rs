use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::repository::{CreatedRepository, HostUser, NewRepository, RepositoryOwner};
use crate::repositories::repo_host::{HostError, RepoHost};

/// In-memory host for service and handler tests. Records every call and the
/// written file contents so tests can assert ordering, sha threading, what
/// actually landed in the repository, and that rejected requests never
/// reach the host at all.
#[derive(Default)]
pub struct StubHost {
    calls: Mutex<Vec<String>>,
    files: Mutex<BTreeMap<String, String>>,
    created: Mutex<Option<NewRepository>>,
    fail_at: Option<&'static str>,
}

impl StubHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stub whose named method returns an api error; every other method
    /// keeps succeeding.
    pub fn failing_at(method: &'static str) -> Self {
        Self {
            fail_at: Some(method),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn file_content(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }

    /// The spec passed to the last `create_repository` call.
    pub fn created_spec(&self) -> Option<NewRepository> {
        self.created.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.calls.lock().unwrap().push(entry);
    }

    fn check(&self, method: &str, status: u16) -> Result<(), HostError> {
        if self.fail_at == Some(method) {
            return Err(HostError::Api {
                status,
                detail: "stub failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RepoHost for StubHost {
    async fn authenticated_user(&self, _token: &str) -> Result<HostUser, HostError> {
        self.record("authenticated_user".to_string());
        self.check("authenticated_user", 401)?;
        Ok(HostUser {
            login: "octo-ada".to_string(),
            name: Some("Ada Lovelace".to_string()),
        })
    }

    async fn create_repository(
        &self,
        _token: &str,
        spec: &NewRepository,
    ) -> Result<CreatedRepository, HostError> {
        self.record(format!("create_repository {}", spec.name));
        self.check("create_repository", 422)?;
        *self.created.lock().unwrap() = Some(spec.clone());
        Ok(CreatedRepository {
            name: spec.name.clone(),
            full_name: format!("octo-ada/{}", spec.name),
            html_url: format!("https://github.com/octo-ada/{}", spec.name),
            default_branch: Some("main".to_string()),
            owner: RepositoryOwner {
                login: "octo-ada".to_string(),
            },
        })
    }

    async fn file_sha(
        &self,
        _token: &str,
        _owner: &str,
        _repo: &str,
        path: &str,
    ) -> Result<Option<String>, HostError> {
        self.record(format!("file_sha {}", path));
        self.check("file_sha", 500)?;
        Ok(Some("seed-sha".to_string()))
    }

    async fn put_file(
        &self,
        _token: &str,
        _owner: &str,
        _repo: &str,
        path: &str,
        _message: &str,
        content: &[u8],
        sha: Option<&str>,
    ) -> Result<(), HostError> {
        self.record(format!("put_file {} sha={}", path, sha.unwrap_or("none")));
        self.check("put_file", 409)?;
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), String::from_utf8_lossy(content).into_owned());
        Ok(())
    }
}
