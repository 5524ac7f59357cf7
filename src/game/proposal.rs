//! Proposal Manager
//!
//! Creates date proposals and applies the target's accept/decline.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};

use super::error::GameError;
use super::model::{new_id, Proposal, ProposalStatus, UserRecord};
use crate::store::Store;

/// Owns proposal creation and the accept/decline transitions.
pub struct ProposalManager {
    store: Arc<dyn Store>,
}

impl ProposalManager {
    /// Create the manager over a store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Propose a date to `target_username`. New proposals start `Pending`.
    #[instrument(skip(self, proposer, stakes), fields(proposer = %proposer.username))]
    pub async fn create(
        &self,
        proposer: &UserRecord,
        target_username: &str,
        proposed_match_name: &str,
        stakes: &str,
    ) -> Result<Proposal, GameError> {
        let target = self
            .store
            .user_by_username(target_username)
            .await?
            .ok_or(GameError::NotFound("Target user"))?;

        if target.id == proposer.id {
            return Err(GameError::InvalidInput("cannot propose a date to yourself".into()));
        }

        let proposal = Proposal {
            id: new_id(),
            proposer_id: proposer.id.clone(),
            proposer_username: proposer.username.clone(),
            target_user_id: target.id,
            target_username: target.username,
            proposed_match_name: proposed_match_name.to_string(),
            stakes: stakes.to_string(),
            status: ProposalStatus::Pending,
            created_at: Utc::now(),
        };

        self.store.insert_proposal(proposal.clone()).await?;
        info!(proposal_id = %proposal.id, "proposal created");
        Ok(proposal)
    }

    /// Every proposal the user sent or received.
    pub async fn list(&self, user: &UserRecord) -> Result<Vec<Proposal>, GameError> {
        Ok(self.store.proposals_for_user(&user.id).await?)
    }

    /// Target accepts.
    pub async fn accept(&self, proposal_id: &str, user: &UserRecord) -> Result<(), GameError> {
        self.respond(proposal_id, user, ProposalStatus::Accepted).await
    }

    /// Target declines.
    pub async fn decline(&self, proposal_id: &str, user: &UserRecord) -> Result<(), GameError> {
        self.respond(proposal_id, user, ProposalStatus::Declined).await
    }

    /// A proposal the caller is not the target of is reported as missing.
    /// The stored status is overwritten even if already terminal.
    #[instrument(skip(self, user), fields(user = %user.username))]
    async fn respond(
        &self,
        proposal_id: &str,
        user: &UserRecord,
        status: ProposalStatus,
    ) -> Result<(), GameError> {
        let proposal = target_only(self.store.as_ref(), proposal_id, user).await?;

        if !self.store.set_proposal_status(&proposal.id, status).await? {
            return Err(GameError::NotFound("Proposal"));
        }
        info!(status = status.as_str(), "proposal answered");
        Ok(())
    }
}

/// Load a proposal only if `user` is its target. Anything else is `NotFound`.
pub(crate) async fn target_only(
    store: &dyn Store,
    proposal_id: &str,
    user: &UserRecord,
) -> Result<Proposal, GameError> {
    match store.proposal(proposal_id).await? {
        Some(p) if p.target_user_id == user.id => Ok(p),
        _ => Err(GameError::NotFound("Proposal")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::testing::{seed_user, test_store};

    #[tokio::test]
    async fn test_create_starts_pending() {
        let store = test_store();
        let alice = seed_user(&store, "alice", "female").await;
        let bob = seed_user(&store, "bob", "male").await;
        let proposals = ProposalManager::new(store.clone());

        let p = proposals.create(&alice, "bob", "Riley", "loser buys tacos").await.unwrap();
        assert_eq!(p.status, ProposalStatus::Pending);
        assert_eq!(p.target_user_id, bob.id);
        assert_eq!(p.target_username, "bob");
        assert_eq!(p.proposer_username, "alice");
    }

    #[tokio::test]
    async fn test_unknown_target_not_found() {
        let store = test_store();
        let alice = seed_user(&store, "alice", "female").await;
        let proposals = ProposalManager::new(store.clone());

        let result = proposals.create(&alice, "nobody", "Riley", "x").await;
        assert!(matches!(result, Err(GameError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_self_proposal_rejected() {
        let store = test_store();
        let alice = seed_user(&store, "alice", "female").await;
        let proposals = ProposalManager::new(store.clone());

        let result = proposals.create(&alice, "alice", "Riley", "x").await;
        assert!(matches!(result, Err(GameError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_list_covers_both_sides() {
        let store = test_store();
        let alice = seed_user(&store, "alice", "female").await;
        let bob = seed_user(&store, "bob", "male").await;
        let carol = seed_user(&store, "carol", "female").await;
        let proposals = ProposalManager::new(store.clone());

        proposals.create(&alice, "bob", "Riley", "x").await.unwrap();
        proposals.create(&carol, "alice", "Sam", "y").await.unwrap();

        assert_eq!(proposals.list(&alice).await.unwrap().len(), 2);
        assert_eq!(proposals.list(&bob).await.unwrap().len(), 1);
        assert_eq!(proposals.list(&carol).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_only_target_can_answer() {
        let store = test_store();
        let alice = seed_user(&store, "alice", "female").await;
        let bob = seed_user(&store, "bob", "male").await;
        let proposals = ProposalManager::new(store.clone());
        let p = proposals.create(&alice, "bob", "Riley", "x").await.unwrap();

        let by_proposer = proposals.accept(&p.id, &alice).await;
        assert!(matches!(by_proposer, Err(GameError::NotFound("Proposal"))));
        let by_proposer = proposals.decline(&p.id, &alice).await;
        assert!(matches!(by_proposer, Err(GameError::NotFound("Proposal"))));

        proposals.accept(&p.id, &bob).await.unwrap();
        let stored = store.proposal(&p.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ProposalStatus::Accepted);
    }

    #[tokio::test]
    async fn test_answer_overwrites_previous_answer() {
        let store = test_store();
        let alice = seed_user(&store, "alice", "female").await;
        let bob = seed_user(&store, "bob", "male").await;
        let proposals = ProposalManager::new(store.clone());
        let p = proposals.create(&alice, "bob", "Riley", "x").await.unwrap();

        proposals.decline(&p.id, &bob).await.unwrap();
        proposals.accept(&p.id, &bob).await.unwrap();

        let stored = store.proposal(&p.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ProposalStatus::Accepted);
    }

    #[tokio::test]
    async fn test_missing_proposal_not_found() {
        let store = test_store();
        let bob = seed_user(&store, "bob", "male").await;
        let proposals = ProposalManager::new(store.clone());

        let result = proposals.decline("missing", &bob).await;
        assert!(matches!(result, Err(GameError::NotFound("Proposal"))));
    }
}
