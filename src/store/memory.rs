//! In-memory store.
//!
//! All tables sit behind one `RwLock`, so a settlement batch is applied under
//! a single write guard and no reader can observe it half done.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Settlement, SettlementReport, Store, StoreError};
use crate::game::model::{Bet, Dare, Outcome, Proposal, ProposalStatus, UserRecord};

#[derive(Default)]
struct Tables {
    users: BTreeMap<String, UserRecord>,
    proposals: BTreeMap<String, Proposal>,
    bets: BTreeMap<String, Bet>,
    dares: BTreeMap<String, Dare>,
    /// Keyed by proposal ID: at most one outcome per proposal.
    outcomes: BTreeMap<String, Outcome>,
}

/// `Store` backed by process memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: UserRecord) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate { field: "username" });
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate { field: "email" });
        }

        tables.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn user(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn search_users(
        &self,
        query: &str,
        exclude_id: &str,
        limit: usize,
    ) -> Result<Vec<UserRecord>, StoreError> {
        let needle = query.to_lowercase();
        let tables = self.tables.read().await;

        let mut found: Vec<UserRecord> = tables
            .users
            .values()
            .filter(|u| u.id != exclude_id && u.username.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.username.cmp(&b.username));
        found.truncate(limit);
        Ok(found)
    }

    async fn insert_proposal(&self, proposal: Proposal) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.proposals.insert(proposal.id.clone(), proposal);
        Ok(())
    }

    async fn proposal(&self, id: &str) -> Result<Option<Proposal>, StoreError> {
        Ok(self.tables.read().await.proposals.get(id).cloned())
    }

    async fn proposals_for_user(&self, user_id: &str) -> Result<Vec<Proposal>, StoreError> {
        let tables = self.tables.read().await;
        let mut found: Vec<Proposal> = tables
            .proposals
            .values()
            .filter(|p| p.involves(user_id))
            .cloned()
            .collect();
        found.sort_by_key(|p| p.created_at);
        Ok(found)
    }

    async fn set_proposal_status(
        &self,
        id: &str,
        status: ProposalStatus,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.proposals.get_mut(id) {
            Some(proposal) => {
                proposal.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_bet(&self, bet: Bet) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.bets.insert(bet.id.clone(), bet);
        Ok(())
    }

    async fn bet(&self, id: &str) -> Result<Option<Bet>, StoreError> {
        Ok(self.tables.read().await.bets.get(id).cloned())
    }

    async fn bets_for_proposal(&self, proposal_id: &str) -> Result<Vec<Bet>, StoreError> {
        let tables = self.tables.read().await;
        let mut found: Vec<Bet> = tables
            .bets
            .values()
            .filter(|b| b.proposal_id == proposal_id)
            .cloned()
            .collect();
        found.sort_by_key(|b| b.created_at);
        Ok(found)
    }

    async fn settle_bet(&self, id: &str, won: bool) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.bets.get_mut(id) {
            Some(bet) => {
                bet.settle(won);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn insert_dare(&self, dare: Dare) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.dares.insert(dare.id.clone(), dare);
        Ok(())
    }

    async fn dares_for_proposal(&self, proposal_id: &str) -> Result<Vec<Dare>, StoreError> {
        let tables = self.tables.read().await;
        let mut found: Vec<Dare> = tables
            .dares
            .values()
            .filter(|d| d.proposal_id == proposal_id)
            .cloned()
            .collect();
        found.sort_by_key(|d| d.created_at);
        Ok(found)
    }

    async fn complete_dare(&self, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.dares.get_mut(id) {
            Some(dare) => {
                dare.completed = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn outcome_for_proposal(&self, proposal_id: &str) -> Result<Option<Outcome>, StoreError> {
        Ok(self.tables.read().await.outcomes.get(proposal_id).cloned())
    }

    async fn apply_settlement(
        &self,
        settlement: Settlement,
    ) -> Result<SettlementReport, StoreError> {
        let Settlement { outcome, bet_results } = settlement;
        let mut tables = self.tables.write().await;

        if tables.outcomes.contains_key(&outcome.proposal_id) {
            return Err(StoreError::Duplicate { field: "proposal_id" });
        }

        if let Some(proposal) = tables.proposals.get_mut(&outcome.proposal_id) {
            proposal.status = ProposalStatus::Completed;
        }

        let mut report = SettlementReport::default();
        for result in &bet_results {
            match tables.bets.get_mut(&result.bet_id) {
                Some(bet) => {
                    bet.settle(result.won);
                    report.settled_bets.push(result.bet_id.clone());
                }
                None => report.missing_bets.push(result.bet_id.clone()),
            }
        }

        tables.outcomes.insert(outcome.proposal_id.clone(), outcome);
        Ok(report)
    }
}
