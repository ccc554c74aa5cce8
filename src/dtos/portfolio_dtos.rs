use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::portfolio::ProvisionedRepository;

/// Raw portfolio submission from the frontend. Everything defaults so that a
/// missing required field becomes a field-level validation message instead
/// of a deserialization failure. `name`/`description` are accepted as
/// aliases for older clients.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioIn {
    #[serde(alias = "name")]
    pub display_name: String,
    #[serde(alias = "description")]
    pub bio: String,
    pub location: Option<String>,
    pub social_links: SocialLinksIn,
    pub projects: Vec<ProjectIn>,
    pub experience: Vec<ExperienceIn>,
    pub theme: Option<ThemeIn>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLinksIn {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectIn {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(alias = "url")]
    pub repository_url: Option<String>,
    pub live_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceIn {
    pub company: String,
    pub location: String,
    pub period: String,
    pub description: String,
}

/// Theme choices arrive as plain strings; unknown values are resolved to
/// the default palette during sanitization rather than rejected here.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeIn {
    pub background: Option<String>,
    pub primary: Option<String>,
    pub text: Option<String>,
}

/// Success payload for `POST /api/create`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioResponse {
    pub success: bool,
    pub url: String,
    pub deploy_url: String,
    pub repository: ProvisionedRepository,
}

/// Generic error payload: `{ "error": "..." }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorBody {
            error: message.into(),
        }
    }
}

/// Validation failures additionally carry per-field messages.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    pub error: String,
    pub fields: BTreeMap<String, String>,
}
