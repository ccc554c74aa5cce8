pub mod auth_extractor;
