//! Test fixtures shared by the component tests.

use std::sync::Arc;

use chrono::Utc;

use super::model::{new_id, Proposal, ProposalStatus, UserRecord};
use crate::auth::{AuthConfig, IdentityService};
use crate::store::{MemoryStore, Store};

pub(crate) const TEST_SECRET: &str = "test-secret-key-256-bits-long!!";

pub(crate) fn test_store() -> Arc<dyn Store> {
    Arc::new(MemoryStore::new())
}

pub(crate) fn test_auth_config() -> AuthConfig {
    AuthConfig {
        secret: TEST_SECRET.into(),
        ..Default::default()
    }
}

pub(crate) fn test_identity() -> (IdentityService, Arc<dyn Store>) {
    let store = test_store();
    (IdentityService::new(store.clone(), test_auth_config()), store)
}

/// Insert a user directly, skipping password hashing.
pub(crate) async fn seed_user(store: &Arc<dyn Store>, username: &str, gender: &str) -> UserRecord {
    let user = UserRecord {
        id: new_id(),
        username: username.into(),
        email: format!("{username}@example.com"),
        gender: gender.into(),
        password_hash: String::new(),
        friends: Vec::new(),
        created_at: Utc::now(),
    };
    store.insert_user(user.clone()).await.unwrap();
    user
}

/// Insert an accepted proposal from `proposer` to `target`.
pub(crate) async fn seed_proposal(
    store: &Arc<dyn Store>,
    proposer: &UserRecord,
    target: &UserRecord,
) -> Proposal {
    let proposal = Proposal {
        id: new_id(),
        proposer_id: proposer.id.clone(),
        proposer_username: proposer.username.clone(),
        target_user_id: target.id.clone(),
        target_username: target.username.clone(),
        proposed_match_name: "Riley".into(),
        stakes: "loser buys brunch".into(),
        status: ProposalStatus::Accepted,
        created_at: Utc::now(),
    };
    store.insert_proposal(proposal.clone()).await.unwrap();
    proposal
}
