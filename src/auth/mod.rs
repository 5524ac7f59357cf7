//! Identity Store
//!
//! Signup, login, bearer-token resolution and user search. Passwords are
//! hashed with Argon2id; tokens are HS256 JWTs.

pub mod identity;
pub mod password;
pub mod token;

use thiserror::Error;

use crate::store::StoreError;

pub use identity::{AuthSession, IdentityService, SignupRequest, SEARCH_LIMIT};
pub use password::{hash_password, verify_password};
pub use token::{issue_token, validate_token, AuthConfig, TokenClaims};

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer token on the request.
    #[error("missing token")]
    MissingToken,
    /// Token format is invalid.
    #[error("invalid token format")]
    InvalidFormat,
    /// Token signature verification failed.
    #[error("invalid signature")]
    InvalidSignature,
    /// Token has expired.
    #[error("token expired")]
    Expired,
    /// Issuer claim doesn't match expected value.
    #[error("invalid issuer")]
    InvalidIssuer,
    /// Required claim is missing.
    #[error("missing required claim: {0}")]
    MissingClaim(String),
    /// JWT decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),
    /// Token could not be signed.
    #[error("signing error: {0}")]
    Signing(String),
    /// Token is valid but its user no longer exists.
    #[error("user not found")]
    UserNotFound,
    /// Unknown username or wrong password. Deliberately not distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Username already registered.
    #[error("username already exists")]
    UsernameTaken,
    /// Email already registered.
    #[error("email already exists")]
    EmailTaken,
    /// Signup field failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Password hashing failed or a stored hash is unreadable.
    #[error("password hash error: {0}")]
    PasswordHash(String),
    /// Persistence failure.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field: "username" } => AuthError::UsernameTaken,
            StoreError::Duplicate { field: "email" } => AuthError::EmailTaken,
            other => AuthError::Store(other),
        }
    }
}

impl AuthError {
    /// Whether the error means the caller is not authenticated.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::InvalidFormat
                | AuthError::InvalidSignature
                | AuthError::Expired
                | AuthError::InvalidIssuer
                | AuthError::MissingClaim(_)
                | AuthError::DecodeError(_)
                | AuthError::UserNotFound
                | AuthError::InvalidCredentials
        )
    }
}
