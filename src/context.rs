//! Application context.
//!
//! Built once at startup and handed to the HTTP layer. Holds the store handle
//! and auth configuration; every component is constructed from it.

use std::sync::Arc;

use crate::auth::{AuthConfig, IdentityService};
use crate::game::{BetLedger, DareRoller, OutcomeRecorder, ProposalManager};
use crate::store::Store;

/// Every component, wired to one store and one auth config.
pub struct AppContext {
    /// Accounts and tokens.
    pub identity: IdentityService,
    /// Proposal create/answer.
    pub proposals: ProposalManager,
    /// Side bets.
    pub bets: BetLedger,
    /// Dice dares.
    pub dares: DareRoller,
    /// Outcome reports.
    pub outcomes: OutcomeRecorder,
}

impl AppContext {
    /// Build every component over `store`.
    pub fn new(store: Arc<dyn Store>, auth: AuthConfig) -> Self {
        Self {
            identity: IdentityService::new(store.clone(), auth),
            proposals: ProposalManager::new(store.clone()),
            bets: BetLedger::new(store.clone()),
            dares: DareRoller::new(store.clone()),
            outcomes: OutcomeRecorder::new(store),
        }
    }
}

/// Context as shared by request handlers.
pub type SharedContext = Arc<AppContext>;
