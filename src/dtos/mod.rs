pub mod auth_dtos;
pub mod portfolio_dtos;

// alias so callers can reach these as `crate::dtos::auth` and `crate::dtos::portfolio`
pub use auth_dtos as auth;
pub use portfolio_dtos as portfolio;
