use serde::{Deserialize, Serialize};

/// Query parameters GitHub appends to the OAuth callback redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Payload for `GET /api/session`. Reports whether a usable GitHub token is
/// attached without ever echoing the token itself.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub is_authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub has_token: bool,
}
