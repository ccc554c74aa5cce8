pub mod github_repo;
pub mod repo_host;
