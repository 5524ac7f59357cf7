//! Persistence Layer
//!
//! The `Store` trait is the only thing components know about persistence.
//! Each method is one independent read or write; the exception is
//! [`Store::apply_settlement`], which must apply all of its writes atomically.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::game::model::{Bet, BetResult, Dare, Outcome, Proposal, ProposalStatus, UserRecord};

pub use memory::MemoryStore;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique field already holds this value.
    #[error("duplicate {field}")]
    Duplicate {
        /// Name of the unique field.
        field: &'static str,
    },

    /// Backend could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Writes produced by recording an outcome.
#[derive(Debug, Clone)]
pub struct Settlement {
    /// Outcome to insert. Its `proposal_id` names the proposal to complete.
    pub outcome: Outcome,
    /// Bets to mark completed with the given result. Unknown IDs are skipped.
    pub bet_results: Vec<BetResult>,
}

/// What `apply_settlement` actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementReport {
    /// Bets that were found and settled.
    pub settled_bets: Vec<String>,
    /// Bet IDs that matched nothing.
    pub missing_bets: Vec<String>,
}

/// Persistence collaborator.
#[async_trait]
pub trait Store: Send + Sync {
    // --- users ---

    /// Insert a user. Fails with `Duplicate` if the username or email is taken.
    async fn insert_user(&self, user: UserRecord) -> Result<(), StoreError>;

    /// Look up a user by ID.
    async fn user(&self, id: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Look up a user by exact username.
    async fn user_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Users whose username contains `query` (case-insensitive), excluding
    /// `exclude_id`, at most `limit` of them.
    async fn search_users(
        &self,
        query: &str,
        exclude_id: &str,
        limit: usize,
    ) -> Result<Vec<UserRecord>, StoreError>;

    // --- proposals ---

    /// Insert a proposal.
    async fn insert_proposal(&self, proposal: Proposal) -> Result<(), StoreError>;

    /// Look up a proposal by ID.
    async fn proposal(&self, id: &str) -> Result<Option<Proposal>, StoreError>;

    /// Proposals where the user is proposer or target.
    async fn proposals_for_user(&self, user_id: &str) -> Result<Vec<Proposal>, StoreError>;

    /// Overwrite a proposal's status. Returns false if no such proposal.
    async fn set_proposal_status(
        &self,
        id: &str,
        status: ProposalStatus,
    ) -> Result<bool, StoreError>;

    // --- bets ---

    /// Insert a bet.
    async fn insert_bet(&self, bet: Bet) -> Result<(), StoreError>;

    /// Look up a bet by ID.
    async fn bet(&self, id: &str) -> Result<Option<Bet>, StoreError>;

    /// All bets for a proposal, hidden ones included.
    async fn bets_for_proposal(&self, proposal_id: &str) -> Result<Vec<Bet>, StoreError>;

    /// Mark a bet completed with the given result. Returns false if no such bet.
    async fn settle_bet(&self, id: &str, won: bool) -> Result<bool, StoreError>;

    // --- dares ---

    /// Insert a dare.
    async fn insert_dare(&self, dare: Dare) -> Result<(), StoreError>;

    /// All dares for a proposal.
    async fn dares_for_proposal(&self, proposal_id: &str) -> Result<Vec<Dare>, StoreError>;

    /// Mark a dare completed. Returns false if no such dare.
    async fn complete_dare(&self, id: &str) -> Result<bool, StoreError>;

    // --- outcomes ---

    /// The outcome recorded for a proposal, if any.
    async fn outcome_for_proposal(&self, proposal_id: &str) -> Result<Option<Outcome>, StoreError>;

    /// Atomically insert the outcome, complete its proposal and settle the
    /// listed bets. Fails with `Duplicate { field: "proposal_id" }` and writes
    /// nothing if the proposal already has an outcome.
    async fn apply_settlement(
        &self,
        settlement: Settlement,
    ) -> Result<SettlementReport, StoreError>;
}
