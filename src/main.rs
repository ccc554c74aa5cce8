mod config;
mod dtos;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod services;
mod site;
#[cfg(test)]
mod test_support;
mod validation;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};
use reqwest::Client;

use crate::config::AppConfig;
use crate::handlers::auth_handlers::{github_callback, github_login, session_info};
use crate::handlers::portfolio_handlers::{create_portfolio, health, json_error_handler};
use crate::repositories::github_repo::GithubRepo;
use crate::repositories::repo_host::RepoHost;
use crate::services::oauth_services::OauthService;
use crate::services::provision_services::ProvisionService;

/// Request-time state shared with extractors; the services get their own
/// `web::Data` entries.
#[derive(Clone)]
pub struct AppState {
    pub session_secret: String,
    pub frontend_url: String,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("github api base: {}", config.github_api_base);

    let http_client = Client::builder()
        .user_agent("folioforge-be/0.1")
        .timeout(config::HTTP_TIMEOUT)
        .build()
        .expect("failed to build http client");

    let host: Arc<dyn RepoHost> = Arc::new(GithubRepo::new(
        http_client.clone(),
        config.github_api_base.clone(),
    ));
    let provision_data = web::Data::new(ProvisionService::new(host));

    let oauth_data = web::Data::new(OauthService::new(
        http_client,
        config.github_oauth_base.clone(),
        config.github_api_base.clone(),
        config.github_client_id.clone(),
        config.github_client_secret.clone(),
    ));

    let state = web::Data::new(AppState {
        session_secret: config.session_secret.clone(),
        frontend_url: config.frontend_url.clone(),
    });

    let allowed_origins = config.allowed_origins.clone();
    let bind_address = format!("0.0.0.0:{}", config.port);
    info!("starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["authorization", "content-type", "accept"])
            .supports_credentials()
            .max_age(3600);

        for origin in allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(provision_data.clone())
            .app_data(oauth_data.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(
                web::scope("/api/auth")
                    .service(github_login) // GET /api/auth/github/login
                    .service(github_callback), // GET /api/auth/github/callback
            )
            .service(
                web::scope("/api")
                    .service(create_portfolio) // POST /api/create
                    .service(session_info) // GET /api/session
                    .service(health), // GET /api/health
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
