//! JWT Bearer Tokens
//!
//! Issues and validates HS256 tokens binding a user ID (`sub`) and username.
//! Expiry, malformed tokens and bad signatures are reported separately.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::game::model::UserRecord;

/// Secret used when `JWT_SECRET_KEY` is not set.
pub const DEV_SECRET: &str = "your-secret-key-change-in-production";

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL_DAYS: u64 = 30;

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Authentication configuration.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// HS256 signing secret.
    pub secret: String,
    /// Issuer claim ("iss") to stamp and require. If None, not checked.
    pub issuer: Option<String>,
    /// Lifetime of issued tokens.
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
            issuer: None,
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_DAYS * SECS_PER_DAY),
        }
    }
}

impl AuthConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET_KEY").unwrap_or(defaults.secret),
            issuer: std::env::var("JWT_ISSUER").ok(),
            token_ttl: std::env::var("TOKEN_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .and_then(ttl_from_days)
                .unwrap_or(defaults.token_ttl),
        }
    }

    /// Whether the development placeholder secret is in use.
    pub fn uses_dev_secret(&self) -> bool {
        self.secret == DEV_SECRET
    }
}

/// Token lifetime for a day count, or `None` if it overflows.
fn ttl_from_days(days: u64) -> Option<Duration> {
    days.checked_mul(SECS_PER_DAY).map(Duration::from_secs)
}

/// Claims carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user ID.
    pub sub: String,
    /// Username at issue time.
    #[serde(default)]
    pub username: String,
    /// Expiry timestamp (Unix seconds).
    pub exp: u64,
    /// Issued at timestamp.
    #[serde(default)]
    pub iat: u64,
    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Issue a token for `user`.
pub fn issue_token(user: &UserRecord, config: &AuthConfig) -> Result<String, AuthError> {
    let iat = now_secs();
    let claims = TokenClaims {
        sub: user.id.clone(),
        username: user.username.clone(),
        exp: iat.saturating_add(config.token_ttl.as_secs()),
        iat,
        iss: config.issuer.clone(),
    };

    let key = EncodingKey::from_secret(config.secret.as_bytes());
    encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Signing(e.to_string()))
}

/// Validate a token and extract claims.
pub fn validate_token(token: &str, config: &AuthConfig) -> Result<TokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    if let Some(ref issuer) = config.issuer {
        validation.set_issuer(&[issuer]);
    }

    let key = DecodingKey::from_secret(config.secret.as_bytes());
    let claims = decode::<TokenClaims>(token, &key, &validation)
        .map_err(map_jwt_error)?
        .claims;

    if claims.sub.is_empty() {
        return Err(AuthError::MissingClaim("sub".into()));
    }

    // The library allows a small leeway; tokens past `exp` are expired here.
    if now_secs() > claims.exp {
        return Err(AuthError::Expired);
    }

    Ok(claims)
}

/// Map JWT library errors to our error type.
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
        ErrorKind::MissingRequiredClaim(claim) => AuthError::MissingClaim(claim.clone()),
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AuthError::InvalidFormat,
        _ => AuthError::DecodeError(err.to_string()),
    }
}

// =============================================================================
// TESTS
// =============================================================================
