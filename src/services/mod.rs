pub mod oauth_services;
pub mod provision_services;
