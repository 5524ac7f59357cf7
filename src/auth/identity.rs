//! Identity service: accounts, sessions and user lookup.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::password::{hash_password, verify_dummy, verify_password};
use super::token::{issue_token, validate_token, AuthConfig};
use super::AuthError;
use crate::game::model::{new_id, UserProfile, UserRecord};
use crate::store::Store;

/// Maximum users returned by a search.
pub const SEARCH_LIMIT: usize = 10;

/// New account details.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    /// Unique account name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Plaintext password; only its hash is stored.
    pub password: String,
    /// Gender category.
    pub gender: String,
}

impl SignupRequest {
    fn validate(&self) -> Result<(), AuthError> {
        if self.username.trim().is_empty() {
            return Err(AuthError::InvalidInput("username is required".into()));
        }
        if self.password.is_empty() {
            return Err(AuthError::InvalidInput("password is required".into()));
        }
        if !self.email.contains('@') {
            return Err(AuthError::InvalidInput("email is invalid".into()));
        }
        if self.gender.trim().is_empty() {
            return Err(AuthError::InvalidInput("gender is required".into()));
        }
        Ok(())
    }
}

/// Token plus profile, returned by signup and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Signed bearer token.
    pub token: String,
    /// Profile of the authenticated user.
    pub user: UserProfile,
}

/// Identity Store.
pub struct IdentityService {
    store: Arc<dyn Store>,
    config: AuthConfig,
}

impl IdentityService {
    /// Create the service over a store.
    pub fn new(store: Arc<dyn Store>, config: AuthConfig) -> Self {
        Self { store, config }
    }

    /// Token configuration in use.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register a user and log them in.
    ///
    /// Username and email must both be unused; the store enforces this
    /// atomically so no duplicate record is ever written.
    #[instrument(skip(self, req), fields(username = %req.username))]
    pub async fn signup(&self, req: SignupRequest) -> Result<AuthSession, AuthError> {
        req.validate()?;

        let user = UserRecord {
            id: new_id(),
            username: req.username,
            email: req.email,
            gender: req.gender,
            password_hash: hash_password(&req.password)?,
            friends: Vec::new(),
            created_at: Utc::now(),
        };

        self.store.insert_user(user.clone()).await?;
        info!(user_id = %user.id, "user signed up");

        self.session_for(&user)
    }

    /// Log in with username and password.
    ///
    /// An unknown username and a wrong password fail identically.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, AuthError> {
        let Some(user) = self.store.user_by_username(username).await? else {
            verify_dummy(password);
            debug!("login for unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            debug!("login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        self.session_for(&user)
    }

    /// Resolve a bearer token to its user.
    pub async fn authenticate(&self, token: &str) -> Result<UserRecord, AuthError> {
        let claims = validate_token(token, &self.config)?;

        self.store
            .user(&claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Case-insensitive username search, excluding the requester.
    pub async fn search_users(
        &self,
        query: &str,
        requester: &UserRecord,
    ) -> Result<Vec<UserProfile>, AuthError> {
        let found = self
            .store
            .search_users(query, &requester.id, SEARCH_LIMIT)
            .await?;
        Ok(found.iter().map(UserProfile::from).collect())
    }

    fn session_for(&self, user: &UserRecord) -> Result<AuthSession, AuthError> {
        Ok(AuthSession {
            token: issue_token(user, &self.config)?,
            user: UserProfile::from(user),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::game::testing::test_identity;

    fn signup_req(username: &str, email: &str) -> SignupRequest {
        SignupRequest {
            username: username.into(),
            email: email.into(),
            password: "pw-123".into(),
            gender: "male".into(),
        }
    }

    #[tokio::test]
    async fn test_signup_returns_token_and_profile() {
        let (identity, _) = test_identity();
        let session = identity.signup(signup_req("alice", "alice@x.io")).await.unwrap();

        assert_eq!(session.user.username, "alice");
        let user = identity.authenticate(&session.token).await.unwrap();
        assert_eq!(user.id, session.user.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_or_email_rejected() {
        let (identity, store) = test_identity();
        identity.signup(signup_req("alice", "alice@x.io")).await.unwrap();

        let dup_name = identity.signup(signup_req("alice", "new@x.io")).await;
        assert!(matches!(dup_name, Err(AuthError::UsernameTaken)));

        let dup_email = identity.signup(signup_req("alicia", "alice@x.io")).await;
        assert!(matches!(dup_email, Err(AuthError::EmailTaken)));

        assert!(store.user_by_username("alicia").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let (identity, _) = test_identity();
        let result = identity.signup(signup_req("bob", "not-an-email")).await;
        assert!(matches!(result, Err(AuthError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (identity, _) = test_identity();
        identity.signup(signup_req("alice", "alice@x.io")).await.unwrap();

        let wrong_pw = identity.login("alice", "nope").await.unwrap_err();
        let no_user = identity.login("mallory", "pw-123").await.unwrap_err();

        assert!(matches!(wrong_pw, AuthError::InvalidCredentials));
        assert!(matches!(no_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_pw.to_string(), no_user.to_string());

        assert!(identity.login("alice", "pw-123").await.is_ok());
    }

    async fn time_failed_logins(identity: &IdentityService, username: &str) -> Duration {
        let start = Instant::now();
        for _ in 0..5 {
            let _ = identity.login(username, "wrong-password").await;
        }
        start.elapsed()
    }

    #[tokio::test]
    async fn test_unknown_user_login_costs_a_hash_check() {
        let (identity, _) = test_identity();
        identity.signup(signup_req("alice", "alice@x.io")).await.unwrap();
        // Warm the lazily built throwaway hash
        let _ = identity.login("nobody", "pw").await;

        let wrong_pw = time_failed_logins(&identity, "alice").await;
        let no_user = time_failed_logins(&identity, "mallory").await;

        assert!(no_user * 10 > wrong_pw, "unknown user {no_user:?} vs wrong password {wrong_pw:?}");
    }

    #[tokio::test]
    async fn test_token_for_vanished_user() {
        let (identity, _) = test_identity();
        let ghost = UserRecord {
            id: new_id(),
            username: "ghost".into(),
            email: "ghost@x.io".into(),
            gender: "male".into(),
            password_hash: String::new(),
            friends: Vec::new(),
            created_at: Utc::now(),
        };
        let token = issue_token(&ghost, identity.config()).unwrap();

        let result = identity.authenticate(&token).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_search_excludes_self_and_handles_no_match() {
        let (identity, store) = test_identity();
        identity.signup(signup_req("Jordan", "j@x.io")).await.unwrap();
        identity.signup(signup_req("jo", "jo@x.io")).await.unwrap();
        let me = store.user_by_username("jo").await.unwrap().unwrap();

        let found = identity.search_users("JO", &me).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "Jordan");

        assert!(identity.search_users("zzz", &me).await.unwrap().is_empty());
    }
}
