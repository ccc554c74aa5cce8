use actix_web::{get, web, HttpResponse};
use log::{error, warn};
use urlencoding::encode;

use crate::dtos::auth::{CallbackQuery, SessionResponse};
use crate::dtos::portfolio::ErrorBody;
use crate::middleware::auth_extractor::{
    issue_session, issue_state, verify_state, AuthenticatedSession,
};
use crate::services::oauth_services::OauthService;
use crate::AppState;

/// GET /api/auth/github/login
/// Sends the browser to GitHub's authorize page with a signed state nonce.
#[get("/github/login")]
pub async fn github_login(
    state: web::Data<AppState>,
    oauth: web::Data<OauthService>,
) -> HttpResponse {
    match issue_state(state.session_secret.as_bytes()) {
        Ok(signed) => HttpResponse::Found()
            .insert_header(("Location", oauth.authorize_url(&signed)))
            .finish(),
        Err(e) => {
            error!("failed to sign oauth state: {}", e);
            HttpResponse::InternalServerError().json(ErrorBody::new("Failed to start sign-in"))
        }
    }
}

/// GET /api/auth/github/callback
/// Finishes the OAuth dance: verify state, trade the code for a token, look
/// up the user, mint the session, and hand everything back to the frontend
/// in the URL fragment. Failures redirect with `#error=` so the form can
/// show something useful instead of a bare API error.
#[get("/github/callback")]
pub async fn github_callback(
    state: web::Data<AppState>,
    oauth: web::Data<OauthService>,
    query: web::Query<CallbackQuery>,
) -> HttpResponse {
    if let Some(denied) = &query.error {
        warn!("github denied authorization: {}", denied);
        return redirect_error(&state.frontend_url, denied);
    }

    let (Some(code), Some(signed_state)) = (query.code.as_deref(), query.state.as_deref()) else {
        return redirect_error(&state.frontend_url, "missing code or state");
    };

    if !verify_state(state.session_secret.as_bytes(), signed_state) {
        warn!("oauth state rejected");
        return redirect_error(&state.frontend_url, "state mismatch");
    }

    let token = match oauth.exchange_code(code).await {
        Ok(token) => token,
        Err(e) => {
            error!("code exchange failed: {}", e);
            return redirect_error(&state.frontend_url, "token exchange failed");
        }
    };

    let user = match oauth.fetch_user(&token).await {
        Ok(user) => user,
        Err(e) => {
            error!("user lookup failed: {}", e);
            return redirect_error(&state.frontend_url, "user lookup failed");
        }
    };

    let display_name = user.name.unwrap_or_else(|| user.login.clone());
    match issue_session(
        state.session_secret.as_bytes(),
        &user.login,
        &display_name,
        Some(token),
    ) {
        Ok(jwt) => HttpResponse::Found()
            .insert_header((
                "Location",
                format!("{}/create#session={}", state.frontend_url, jwt),
            ))
            .finish(),
        Err(e) => {
            error!("failed to mint session: {}", e);
            redirect_error(&state.frontend_url, "session mint failed")
        }
    }
}

/// GET /api/session
#[get("/session")]
pub async fn session_info(session: Option<AuthenticatedSession>) -> HttpResponse {
    let payload = match session {
        Some(session) => SessionResponse {
            is_authenticated: true,
            has_token: session.access_token.is_some(),
            display_name: Some(session.display_name),
        },
        None => SessionResponse {
            is_authenticated: false,
            has_token: false,
            display_name: None,
        },
    };
    HttpResponse::Ok().json(payload)
}

fn redirect_error(frontend_url: &str, reason: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((
            "Location",
            format!("{}/create#error={}", frontend_url, encode(reason)),
        ))
        .finish()
}
