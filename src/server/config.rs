//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Placeholder secret used when none is configured. The server warns
/// loudly at startup if this is still in effect.
pub const DEV_TOKEN_SECRET: &str = "insecure-dev-secret";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "defaults::addr")]
    pub addr: SocketAddr,
    /// Upload directory for product images
    #[serde(default = "defaults::upload_dir")]
    pub upload_dir: PathBuf,
    /// Maximum request body size (bytes)
    #[serde(default = "defaults::max_body_size")]
    pub max_body_size: usize,
    /// HMAC secret for access tokens
    #[serde(default = "defaults::token_secret")]
    pub token_secret: String,
    /// Access token lifetime (seconds)
    #[serde(default = "defaults::token_ttl_secs")]
    pub token_ttl_secs: u64,
    /// Enable XSS screening of free-text fields
    #[serde(default = "defaults::enabled")]
    pub security_enabled: bool,
    /// CORS enabled
    #[serde(default = "defaults::enabled")]
    pub cors_enabled: bool,
    /// Enable request logging
    #[serde(default = "defaults::enabled")]
    pub logging: bool,
}

mod defaults {
    use std::net::SocketAddr;
    use std::path::PathBuf;

    pub fn addr() -> SocketAddr {
        "127.0.0.1:3000".parse().unwrap()
    }

    pub fn upload_dir() -> PathBuf {
        PathBuf::from("uploads")
    }

    pub fn max_body_size() -> usize {
        2 * 1024 * 1024 // 2MB
    }

    pub fn token_secret() -> String {
        super::DEV_TOKEN_SECRET.to_string()
    }

    pub fn token_ttl_secs() -> u64 {
        12 * 60 * 60 // 12 hours
    }

    pub fn enabled() -> bool {
        true
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: defaults::addr(),
            upload_dir: defaults::upload_dir(),
            max_body_size: defaults::max_body_size(),
            token_secret: defaults::token_secret(),
            token_ttl_secs: defaults::token_ttl_secs(),
            security_enabled: true,
            cors_enabled: true,
            logging: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| StoreError::Config(format!("Failed to read config file: {e}")))?;

        Ok(toml::from_str(&content)?)
    }

    /// Create with custom port
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr = SocketAddr::new(self.addr.ip(), port);
        self
    }

    /// Bind to all interfaces
    pub fn bind_all(mut self) -> Self {
        self.addr = format!("0.0.0.0:{}", self.addr.port()).parse().unwrap();
        self
    }

    /// Set address directly
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Set upload directory
    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = dir.into();
        self
    }

    /// Set token secret
    pub fn with_token_secret(mut self, secret: impl Into<String>) -> Self {
        self.token_secret = secret.into();
        self
    }

    /// Set token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl_secs = ttl.as_secs();
        self
    }

    /// Set max body size
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Disable XSS screening
    pub fn without_security(mut self) -> Self {
        self.security_enabled = false;
        self
    }

    /// Disable CORS
    pub fn without_cors(mut self) -> Self {
        self.cors_enabled = false;
        self
    }

    /// Disable logging
    pub fn without_logging(mut self) -> Self {
        self.logging = false;
        self
    }

    /// Token lifetime as a `Duration`
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.max_body_size, 2 * 1024 * 1024);
        assert_eq!(config.token_ttl(), Duration::from_secs(43200));
        assert!(config.security_enabled);
    }

    #[test]
    fn test_builders() {
        let config = ServerConfig::default()
            .with_port(8080)
            .bind_all()
            .with_token_secret("s3cret")
            .without_security();

        assert_eq!(config.addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.token_secret, "s3cret");
        assert!(!config.security_enabled);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            addr = "0.0.0.0:9090"
            upload_dir = "/var/lib/storefront/uploads"
            token_secret = "from-file"
            token_ttl_secs = 3600
        "#;

        let config: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.addr.port(), 9090);
        assert_eq!(config.token_secret, "from-file");
        assert_eq!(config.token_ttl_secs, 3600);
        // Unset keys fall back to defaults.
        assert_eq!(config.max_body_size, 2 * 1024 * 1024);
        assert!(config.cors_enabled);
    }
}
