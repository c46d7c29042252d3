//! Identity collaborator: bearer-token issuance and verification.
//!
//! A bearer credential decodes to `{ id, name, email }`. Verification fails
//! with one of three errors; callers must treat every one of them as "no
//! identity", never as a silent allow.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::TokenConfig;

/// The authenticated principal a valid token decodes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    name: String,
    email: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Why a token was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is expired")]
    Expired,

    #[error("token is malformed: {0}")]
    Malformed(String),
}

/// Stateless HS256 issuer/verifier over an immutable [`TokenConfig`].
pub struct TokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl_secs: u64,
}

impl TokenVerifier {
    #[must_use]
    pub fn new(config: &TokenConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer: config.issuer.clone(),
            ttl_secs: config.ttl_secs,
        }
    }

    /// Issue a signed token for the identity, valid for the configured ttl.
    ///
    /// # Errors
    ///
    /// Returns `Malformed` if encoding fails.
    pub fn issue(&self, identity: &Identity) -> Result<String, IdentityError> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let ttl = i64::try_from(self.ttl_secs).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: identity.id,
            name: identity.name.clone(),
            email: identity.email.clone(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now.saturating_add(ttl),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| IdentityError::Malformed(e.to_string()))
    }

    /// Verify a token and decode the identity it carries.
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` if the signature does not match
    /// - `Expired` if the token is past its expiry
    /// - `Malformed` for anything else (garbage input, wrong issuer,
    ///   missing claims)
    pub fn verify(&self, token: &str) -> Result<Identity, IdentityError> {
        let data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(map_error)?;
        Ok(Identity {
            id: data.claims.sub,
            name: data.claims.name,
            email: data.claims.email,
        })
    }
}

fn map_error(e: jsonwebtoken::errors::Error) -> IdentityError {
    use jsonwebtoken::errors::ErrorKind;
    match e.kind() {
        ErrorKind::ExpiredSignature => IdentityError::Expired,
        ErrorKind::InvalidSignature => IdentityError::InvalidSignature,
        _ => IdentityError::Malformed(e.to_string()),
    }
}
