//! Configuration for the RBAC authority.

use secrecy::SecretString;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorityConfig {
    /// DSN of the privilege store.
    pub database_url: String,
    pub max_connections: u32,
    pub token: TokenConfig,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_owned(),
            max_connections: 5,
            token: TokenConfig::default(),
        }
    }
}

/// Immutable token settings, injected into the verifier at construction.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenConfig {
    /// HMAC signing secret. Empty by default; deployments must set it.
    pub secret: SecretString,
    /// Token lifetime in seconds.
    pub ttl_secs: u64,
    pub issuer: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: SecretString::from(String::new()),
            ttl_secs: 3600,
            issuer: "rbac-authority".to_owned(),
        }
    }
}
