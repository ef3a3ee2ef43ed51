//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORCHARD_API_BASE_URL` - Base URL of the catalog/customer REST backend
//!
//! ## Optional
//! - `ORCHARD_STATE_DIR` - Directory for persisted client state
//!   (default: `.orchard-state`)
//! - `ORCHARD_CUSTOMER_ID` - Authenticated customer reference
//! - `ORCHARD_CUSTOMER_TOKEN` - Bearer token for customer endpoints
//!
//! A customer is considered signed in only when both `ORCHARD_CUSTOMER_ID`
//! and `ORCHARD_CUSTOMER_TOKEN` are present; wishlist operations short-
//! circuit to no-ops otherwise.

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use orchard_core::CustomerId;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the REST backend.
    pub api_base_url: Url,
    /// Directory holding persisted client state (cart, cache, searches).
    pub state_dir: PathBuf,
    /// Signed-in customer, when present.
    pub customer: Option<CustomerAuth>,
}

/// Credentials for an authenticated customer.
///
/// `SecretString` redacts the token in `Debug` output.
#[derive(Debug, Clone)]
pub struct CustomerAuth {
    /// Customer reference the wishlist belongs to.
    pub customer_id: CustomerId,
    /// Bearer token sent on customer endpoints.
    pub token: SecretString,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_required_env("ORCHARD_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ORCHARD_API_BASE_URL".to_string(), e.to_string())
            })?;
        let state_dir =
            PathBuf::from(get_env_or_default("ORCHARD_STATE_DIR", ".orchard-state"));

        let customer = match (
            get_optional_env("ORCHARD_CUSTOMER_ID"),
            get_optional_env("ORCHARD_CUSTOMER_TOKEN"),
        ) {
            (Some(id), Some(token)) => Some(CustomerAuth {
                customer_id: CustomerId::new(id),
                token: SecretString::from(token),
            }),
            _ => None,
        };

        Ok(Self {
            api_base_url,
            state_dir,
            customer,
        })
    }

    /// Whether a customer is signed in.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.customer.is_some()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_in_requires_customer() {
        let config = StorefrontConfig {
            api_base_url: "https://api.example.test".parse().unwrap(),
            state_dir: PathBuf::from(".orchard-state"),
            customer: None,
        };
        assert!(!config.is_signed_in());

        let config = StorefrontConfig {
            customer: Some(CustomerAuth {
                customer_id: CustomerId::new("cust_1"),
                token: SecretString::from("token-value"),
            }),
            ..config
        };
        assert!(config.is_signed_in());
    }

    #[test]
    fn test_customer_auth_debug_redacts_token() {
        let auth = CustomerAuth {
            customer_id: CustomerId::new("cust_1"),
            token: SecretString::from("super_secret_token"),
        };
        let debug_output = format!("{auth:?}");
        assert!(debug_output.contains("cust_1"));
        assert!(!debug_output.contains("super_secret_token"));
    }
}
