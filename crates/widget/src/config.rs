//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CART_CATALOG_URL` - Catalog API base URL (default: `https://fakestoreapi.com/`)
//! - `CART_STORAGE_DIR` - Directory backing the local key-value store (default: `.fakestore-cart`)
//! - `CART_STORAGE_KEY` - Key the serialized cart is stored under (default: `cart`)
//! - `CART_STORAGE_QUOTA_BYTES` - Capacity of the local store in bytes (default: 5 MiB)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::storage::validate_key;

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/";
pub const DEFAULT_STORAGE_DIR: &str = ".fakestore-cart";
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Browsers cap local storage at roughly 5 MiB per origin.
pub const DEFAULT_STORAGE_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Widget configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Catalog API base URL, always ending in `/`
    pub catalog_url: Url,
    /// Local storage settings
    pub storage: StorageConfig,
}

/// Local key-value storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding one file per key
    pub dir: PathBuf,
    /// Key the serialized cart lives under
    pub cart_key: String,
    /// Maximum total bytes across all keys
    pub quota_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            cart_key: DEFAULT_STORAGE_KEY.to_string(),
            quota_bytes: DEFAULT_STORAGE_QUOTA_BYTES,
        }
    }
}

impl WidgetConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_catalog_url =
            lookup("CART_CATALOG_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
        let catalog_url = parse_base_url(&raw_catalog_url).map_err(|e| {
            ConfigError::InvalidEnvVar("CART_CATALOG_URL".to_string(), e.to_string())
        })?;

        let dir = lookup("CART_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let cart_key = lookup("CART_STORAGE_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        validate_key(&cart_key).map_err(|e| {
            ConfigError::InvalidEnvVar("CART_STORAGE_KEY".to_string(), e.to_string())
        })?;

        let quota_bytes = match lookup("CART_STORAGE_QUOTA_BYTES") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("CART_STORAGE_QUOTA_BYTES".to_string(), e.to_string())
            })?,
            None => DEFAULT_STORAGE_QUOTA_BYTES,
        };

        Ok(Self {
            catalog_url,
            storage: StorageConfig {
                dir,
                cart_key,
                quota_bytes,
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a base URL, appending a trailing slash so relative joins keep the path.
///
/// # Errors
///
/// Returns the parse error if `raw` is not an absolute URL.
pub fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{trimmed}/"))
    }
}
