//! JWT utilities for authentication
//!
//! Provides token encoding, decoding, and validation using the `jsonwebtoken` crate.
//! Every operation has an `_at` variant taking an explicit clock.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
    /// Unique token id, so two tokens issued in the same second differ
    #[serde(default)]
    pub jti: String,
}

impl Claims {
    /// Get the non-empty subject
    ///
    /// # Errors
    /// Returns `InvalidToken` if the subject is absent or empty
    pub fn subject(&self) -> Result<&str, AppError> {
        self.sub
            .as_deref()
            .filter(|sub| !sub.is_empty())
            .ok_or(AppError::InvalidToken)
    }

    /// Check if the token is expired at `now`; the expiry instant itself counts as expired
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// JWT service for issuing and validating access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl JwtService {
    /// Create a new JWT service with the given secret, algorithm and lifetime
    #[must_use]
    pub fn new(secret: &str, algorithm: Algorithm, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            // Out-of-range lifetimes saturate; issuing then fails instead of panicking.
            ttl: Duration::try_minutes(ttl_minutes).unwrap_or(Duration::MAX),
        }
    }

    /// Create a JWT service from configuration
    #[must_use]
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            &config.secret,
            config.algorithm,
            config.access_token_expire_minutes,
        )
    }

    /// Token lifetime
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token for `subject` as if the current time were `now`
    ///
    /// # Errors
    /// Returns an error if the expiry falls outside the calendar or encoding fails
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, AppError> {
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            AppError::internal(anyhow::anyhow!("Token expiry is out of range"))
        })?;

        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to encode JWT: {e}")))
    }

    /// Decode and validate a token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_at(token, Utc::now())
    }

    /// Decode and validate a token against an explicit clock
    ///
    /// Signature and algorithm are checked first, then expiry, then the subject.
    ///
    /// # Errors
    /// `TokenExpired` when `now >= exp`, `InvalidToken` for anything else
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the supplied clock, without leeway.
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::InvalidToken)?
            .claims;

        if claims.is_expired_at(now) {
            return Err(AppError::TokenExpired);
        }

        claims.subject()?;
        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("algorithm", &self.algorithm)
            .field("ttl_minutes", &self.ttl.num_minutes())
            .finish_non_exhaustive()
    }
}
