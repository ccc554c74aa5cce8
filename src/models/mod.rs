pub mod portfolio;
pub mod repository;
