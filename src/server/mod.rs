//! Storefront HTTP server.
//!
//! Provides the catalog HTTP API:
//! - Account registration and login (bearer tokens)
//! - Product CRUD with multipart image uploads
//! - Testimonials with XSS screening of free-text fields
//! - Stored image serving
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront::server::{create_router, AppState, ServerConfig};
//!
//! let config = ServerConfig::default().with_port(8080);
//! let state = Arc::new(AppState::new(config).await?);
//! let app = create_router(state);
//! ```

mod config;
mod handlers;
mod state;

pub use config::{ServerConfig, DEV_TOKEN_SECRET};
pub use handlers::{create_router, health_check, AuthUser};
pub use state::AppState;
