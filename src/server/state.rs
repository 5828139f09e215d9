//! Shared application state.

use std::time::{Duration, Instant};

use super::config::ServerConfig;
use crate::auth::TokenIssuer;
use crate::error::Result;
use crate::security::XssDetector;
use crate::store::{ProductStore, TestimonialStore, UserStore};
use crate::uploads::ImageStore;

/// Application state shared across handlers
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Registered accounts
    pub users: UserStore,
    /// Product catalog
    pub products: ProductStore,
    /// Customer testimonials
    pub testimonials: TestimonialStore,
    /// Uploaded image files
    pub images: ImageStore,
    /// XSS input detector
    pub detector: XssDetector,
    /// Access token issuer
    pub tokens: TokenIssuer,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create application state and the upload directory
    pub async fn new(config: ServerConfig) -> Result<Self> {
        let images = ImageStore::new(&config.upload_dir);
        images.init().await?;

        let tokens = TokenIssuer::new(&config.token_secret, config.token_ttl());

        Ok(Self {
            users: UserStore::new(),
            products: ProductStore::new(),
            testimonials: TestimonialStore::new(),
            images,
            detector: XssDetector::new(),
            tokens,
            start_time: Instant::now(),
            config,
        })
    }

    /// Get server uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
