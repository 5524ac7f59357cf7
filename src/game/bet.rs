//! Bet Ledger
//!
//! Side bets on a proposal. Hidden bets are filtered out of listings for
//! everyone except their creator.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument};

use super::error::GameError;
use super::model::{new_id, Bet, UserRecord};
use crate::store::Store;

/// Fields supplied when placing a bet.
#[derive(Debug, Clone)]
pub struct NewBet {
    /// Proposal the bet is on.
    pub proposal_id: String,
    /// What is being bet on.
    pub bet_description: String,
    /// What the bet is worth.
    pub stake: String,
    /// Hidden from everyone but the creator.
    pub is_hidden: bool,
}

/// Owns bet creation, listing and direct settlement.
pub struct BetLedger {
    store: Arc<dyn Store>,
}

impl BetLedger {
    /// Create the ledger over a store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Place a bet on an existing proposal. Any authenticated user may bet.
    #[instrument(
        skip(self, bet, creator),
        fields(proposal_id = %bet.proposal_id, creator = %creator.username)
    )]
    pub async fn create(&self, bet: NewBet, creator: &UserRecord) -> Result<Bet, GameError> {
        if self.store.proposal(&bet.proposal_id).await?.is_none() {
            return Err(GameError::NotFound("Proposal"));
        }

        let bet = Bet {
            id: new_id(),
            proposal_id: bet.proposal_id,
            bet_creator_id: creator.id.clone(),
            bet_creator_username: creator.username.clone(),
            bet_description: bet.bet_description,
            stake: bet.stake,
            is_hidden: bet.is_hidden,
            completed: false,
            won: None,
            created_at: Utc::now(),
        };

        self.store.insert_bet(bet.clone()).await?;
        debug!(bet_id = %bet.id, hidden = bet.is_hidden, "bet placed");
        Ok(bet)
    }

    /// Bets on a proposal that `requester` may see. Unknown proposals
    /// simply have no bets.
    pub async fn list(
        &self,
        proposal_id: &str,
        requester: &UserRecord,
    ) -> Result<Vec<Bet>, GameError> {
        let bets = self.store.bets_for_proposal(proposal_id).await?;
        Ok(bets.into_iter().filter(|b| b.visible_to(&requester.id)).collect())
    }

    /// Settle a single bet directly. No ownership check.
    #[instrument(skip(self))]
    pub async fn complete(&self, bet_id: &str, won: bool) -> Result<(), GameError> {
        if !self.store.settle_bet(bet_id, won).await? {
            return Err(GameError::NotFound("Bet"));
        }
        debug!("bet settled");
        Ok(())
    }
}
