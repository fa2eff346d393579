pub mod api;
pub mod auth;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use api::client::ApiClient;
pub use auth::session::Session;
pub use config::Config;
pub use core::errors::ApiError;
pub use infrastructure::storage::{SessionStore, SessionVault};

#[cfg(test)]
mod tests; // Include integration tests
