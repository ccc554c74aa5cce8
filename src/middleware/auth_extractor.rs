use actix_web::{dev::Payload, http::StatusCode, web, FromRequest, HttpRequest, HttpResponse};
use chrono::{Duration, Utc};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::dtos::portfolio::ErrorBody;
use crate::AppState;

const SESSION_TTL_HOURS: i64 = 24;
const STATE_TTL_MINUTES: i64 = 10;
// State and session tokens share one secret; the audience claim keeps a
// session JWT from passing as an OAuth state nonce.
const STATE_AUDIENCE: &str = "oauth-state";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Unauthorized")]
    MissingCredentials,
    #[error("Invalid session. Please sign in again.")]
    InvalidToken,
}

impl actix_web::ResponseError for SessionError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}

/// Claims inside the session token this service mints after the OAuth
/// callback. `ght` is the GitHub access token; a session can verify while
/// `ght` is absent, and `/api/create` treats that as unauthenticated too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ght: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// Short-lived claims for the OAuth `state` parameter.
#[derive(Debug, Serialize, Deserialize)]
struct StateClaims {
    sub: String,
    aud: String,
    exp: i64,
}

pub fn issue_session(
    secret: &[u8],
    login: &str,
    name: &str,
    access_token: Option<String>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: login.to_string(),
        name: name.to_string(),
        ght: access_token,
        iat: now.timestamp(),
        exp: (now + Duration::hours(SESSION_TTL_HOURS)).timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
}

pub fn decode_session(
    secret: &[u8],
    token: &str,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

/// Signed nonce sent as the OAuth `state` parameter and checked on callback.
pub fn issue_state(secret: &[u8]) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = StateClaims {
        sub: Uuid::new_v4().to_string(),
        aud: STATE_AUDIENCE.to_string(),
        exp: (Utc::now() + Duration::minutes(STATE_TTL_MINUTES)).timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
}

pub fn verify_state(secret: &[u8], token: &str) -> bool {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[STATE_AUDIENCE]);
    validation.set_required_spec_claims(&["exp", "aud"]);
    decode::<StateClaims>(token, &DecodingKey::from_secret(secret), &validation).is_ok()
}

/// A verified session, extracted from `Authorization: Bearer <jwt>`.
pub struct AuthenticatedSession {
    pub login: String,
    pub display_name: String,
    pub access_token: Option<String>,
}

impl FromRequest for AuthenticatedSession {
    type Error = SessionError;
    type Future = Ready<Result<AuthenticatedSession, SessionError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedSession, SessionError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(SessionError::MissingCredentials)?;

    let header = req
        .headers()
        .get("Authorization")
        .ok_or(SessionError::MissingCredentials)?
        .to_str()
        .map_err(|_| SessionError::MissingCredentials)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(SessionError::MissingCredentials)?
        .trim();

    let claims = decode_session(state.session_secret.as_bytes(), token).map_err(|e| {
        debug!("session rejected: {}", e);
        SessionError::InvalidToken
    })?;

    Ok(AuthenticatedSession {
        login: claims.sub,
        display_name: claims.name,
        access_token: claims.ght,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    const SECRET: &[u8] = b"test-secret";

    fn app_state() -> web::Data<AppState> {
        web::Data::new(AppState {
            session_secret: "test-secret".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
        })
    }

    #[test]
    fn session_round_trips() {
        let token = issue_session(SECRET, "ada", "Ada Lovelace", Some("gho_x".into())).unwrap();
        let claims = decode_session(SECRET, &token).unwrap();
        assert_eq!(claims.sub, "ada");
        assert_eq!(claims.name, "Ada Lovelace");
        assert_eq!(claims.ght.as_deref(), Some("gho_x"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_session_is_rejected() {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: "ada".to_string(),
            name: "Ada".to_string(),
            ght: None,
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        assert!(decode_session(SECRET, &token).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_session(SECRET, "ada", "Ada", None).unwrap();
        assert!(decode_session(b"other-secret", &token).is_err());
    }

    #[test]
    fn state_round_trips_and_rejects_garbage() {
        let state = issue_state(SECRET).unwrap();
        assert!(verify_state(SECRET, &state));
        assert!(!verify_state(SECRET, "not-a-jwt"));
        assert!(!verify_state(b"other-secret", &state));
    }

    #[test]
    fn session_token_does_not_pass_as_state() {
        let session = issue_session(SECRET, "ada", "Ada", Some("gho_x".into())).unwrap();
        assert!(!verify_state(SECRET, &session));
    }

    #[actix_web::test]
    async fn extractor_rejects_missing_header() {
        let req = TestRequest::default()
            .app_data(app_state())
            .to_http_request();
        let result = AuthenticatedSession::from_request(&req, &mut Payload::None).await;
        assert!(matches!(result, Err(SessionError::MissingCredentials)));
    }

    #[actix_web::test]
    async fn extractor_rejects_non_bearer_header() {
        let req = TestRequest::default()
            .app_data(app_state())
            .insert_header(("Authorization", "Basic abc"))
            .to_http_request();
        let result = AuthenticatedSession::from_request(&req, &mut Payload::None).await;
        assert!(matches!(result, Err(SessionError::MissingCredentials)));
    }

    #[actix_web::test]
    async fn extractor_accepts_a_minted_session() {
        let token = issue_session(SECRET, "ada", "Ada Lovelace", Some("gho_x".into())).unwrap();
        let req = TestRequest::default()
            .app_data(app_state())
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        let session = AuthenticatedSession::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(session.login, "ada");
        assert_eq!(session.access_token.as_deref(), Some("gho_x"));
    }

    #[actix_web::test]
    async fn extractor_rejects_a_tampered_token() {
        let token = issue_session(b"other-secret", "ada", "Ada", None).unwrap();
        let req = TestRequest::default()
            .app_data(app_state())
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        let result = AuthenticatedSession::from_request(&req, &mut Payload::None).await;
        assert!(matches!(result, Err(SessionError::InvalidToken)));
    }
}
