pub mod auth_handlers;
pub mod portfolio_handlers;
