//! # Storefront - Product Catalog Backend
//!
//! A small HTTP backend for a product catalog with user accounts,
//! testimonials, and image uploads. Free-text fields are screened by a
//! pattern-based XSS detector before anything is persisted.
//!
//! ## Endpoints
//!
//! | Route                  | Method         | Purpose                          |
//! |------------------------|----------------|----------------------------------|
//! | `/register`, `/login`  | POST           | Accounts and bearer tokens       |
//! | `/products`            | GET/POST       | Catalog list / create (auth)     |
//! | `/products/{id}`       | GET/PUT/DELETE | Single product (mutations auth)  |
//! | `/testimonials`        | GET/POST       | Reviews; create runs the XSS gate|
//! | `/uploads/{filename}`  | GET            | Stored product images            |
//! | `/health`, `/status`   | GET            | Service health and counters      |
//!
//! ## XSS screening
//!
//! The [`security`] module classifies strings against a fixed catalog of
//! ten script-injection signatures (`<script>` elements, event-handler
//! attributes, `javascript:`/`vbscript:`/`data:` schemes, and friends).
//! It is a heuristic boolean gate, not a sanitizer: input is never
//! mutated, and a match anywhere in the string rejects the whole write.
//!
//! ```rust,ignore
//! use storefront::security::XssDetector;
//!
//! let detector = XssDetector::new();
//! assert!(detector.detect("<script>alert(1)</script>"));
//! assert!(!detector.detect("Hello, I loved the service!"));
//! ```
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront::server::{create_router, AppState, ServerConfig};
//!
//! let config = ServerConfig::default().with_port(3000);
//! let state = Arc::new(AppState::new(config.clone()).await?);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind(config.addr).await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! ## Modules
//!
//! - [`security`]: XSS pattern catalog and detector
//! - [`server`]: HTTP API (Axum-based), configuration, shared state
//! - [`store`]: in-memory record stores (users, products, testimonials)
//! - [`auth`]: password hashing and bearer tokens
//! - [`uploads`]: on-disk image storage
//! - [`error`]: error types and result alias

pub mod auth;
pub mod error;
pub mod security;
pub mod server;
pub mod store;
pub mod uploads;

// Re-exports for convenience
pub use auth::TokenIssuer;
pub use error::{Result, StoreError};
pub use security::{detect, ScanReport, XssDetector};
pub use server::{create_router, AppState, ServerConfig};
pub use store::{Product, Testimonial, User};
pub use uploads::ImageStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
