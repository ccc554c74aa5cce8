use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use log::{error, warn};

use crate::dtos::portfolio::{
    CreatePortfolioResponse, ErrorBody, PortfolioIn, ValidationErrorBody,
};
use crate::middleware::auth_extractor::AuthenticatedSession;
use crate::services::provision_services::{ProvisionError, ProvisionService};
use crate::validation::{sanitize_portfolio, validate_portfolio};

/// Vercel's import flow, parameterized only by the percent-encoded
/// repository URL. Composed locally, no extra network call.
const DEPLOY_IMPORT_URL: &str = "https://vercel.com/new/clone?repository-url=";

#[post("/create")]
pub async fn create_portfolio(
    session: AuthenticatedSession,
    provisioner: web::Data<ProvisionService>,
    body: web::Json<PortfolioIn>,
) -> HttpResponse {
    // A session can verify while the GitHub token is missing (e.g. minted
    // before the token was linked); that gates independently of the JWT.
    let Some(token) = session.access_token.as_deref() else {
        warn!("session for {} carries no github token", session.login);
        return HttpResponse::Unauthorized().json(ErrorBody::new(
            "GitHub token not found. Please sign in again.",
        ));
    };

    let input = body.into_inner();
    if let Err(fields) = validate_portfolio(&input) {
        return HttpResponse::BadRequest().json(ValidationErrorBody {
            error: "Validation failed".to_string(),
            fields,
        });
    }
    let profile = sanitize_portfolio(input);

    match provisioner
        .provision(token, &session.display_name, &profile)
        .await
    {
        Ok(repository) => {
            let deploy_url = format!(
                "{}{}",
                DEPLOY_IMPORT_URL,
                urlencoding::encode(&repository.html_url)
            );
            HttpResponse::Ok().json(CreatePortfolioResponse {
                success: true,
                url: repository.html_url.clone(),
                deploy_url,
                repository,
            })
        }
        Err(ProvisionError::Credential(detail)) => {
            warn!("github token rejected for {}: {}", session.login, detail);
            HttpResponse::Unauthorized().json(ErrorBody::new(
                "Invalid GitHub token. Please sign in again.",
            ))
        }
        Err(err @ ProvisionError::Step { .. }) => {
            // detail stays server-side; the client gets a generic failure
            error!("provisioning failed for {}: {}", session.login, err);
            HttpResponse::InternalServerError().json(ErrorBody::new("Failed to create portfolio"))
        }
    }
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Malformed JSON bodies get the same `{ "error": ... }` shape as every
/// other failure instead of actix's default plain-text 400.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    InternalError::from_response(err, HttpResponse::BadRequest().json(ErrorBody::new(detail)))
        .into()
}
