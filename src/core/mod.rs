//! Core Module - Infrastructure of the application
//!
//! - Authentication (JWT, integration token, role checks)
//! - Configuration
//! - Error handling
//! - Application state and user cache

pub mod auth;
pub mod config;
pub mod error;
pub mod state;
pub mod user_cache;

// Re-exports
pub use auth::{
    Claims, authentication_middleware, decode_jwt, encode_jwt, integration_auth_middleware,
    require_roles,
};
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
pub use user_cache::UserCache;
