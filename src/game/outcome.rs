//! Outcome Recorder
//!
//! The proposal's target reports how the date went. Recording an outcome
//! completes the proposal and settles every bet named in `bet_results`, all
//! in one store batch.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::error::GameError;
use super::model::{new_id, BetResult, Outcome, UserRecord};
use super::proposal::target_only;
use crate::store::{Settlement, Store, StoreError};

/// Fields supplied when recording an outcome.
#[derive(Debug, Clone)]
pub struct OutcomeReport {
    /// Proposal being reported on.
    pub proposal_id: String,
    /// Whether the date took place.
    pub happened: bool,
    /// Free-form notes.
    pub notes: String,
    /// IDs of completed dares.
    pub completed_dares: Vec<String>,
    /// Per-bet settlement.
    pub bet_results: Vec<BetResult>,
}

impl OutcomeReport {
    fn validate(&self) -> Result<(), GameError> {
        let mut seen = BTreeSet::new();
        for result in &self.bet_results {
            if result.bet_id.trim().is_empty() {
                return Err(GameError::InvalidInput("bet_results entry has an empty bet_id".into()));
            }
            if !seen.insert(result.bet_id.as_str()) {
                return Err(GameError::InvalidInput(format!(
                    "bet {} appears more than once in bet_results",
                    result.bet_id
                )));
            }
        }
        if self.completed_dares.iter().any(|id| id.trim().is_empty()) {
            return Err(GameError::InvalidInput("completed_dares contains an empty id".into()));
        }
        Ok(())
    }
}

/// Records outcomes and settles bets.
pub struct OutcomeRecorder {
    store: Arc<dyn Store>,
}

impl OutcomeRecorder {
    /// Create the recorder over a store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Record the outcome of a date and settle its bets.
    ///
    /// Only the proposal's target may report; anyone else gets `NotFound`.
    /// A second report for the same proposal is rejected and changes nothing.
    #[instrument(
        skip(self, report, caller),
        fields(proposal_id = %report.proposal_id, caller = %caller.username)
    )]
    pub async fn record(
        &self,
        report: OutcomeReport,
        caller: &UserRecord,
    ) -> Result<Outcome, GameError> {
        let proposal = target_only(self.store.as_ref(), &report.proposal_id, caller).await?;
        report.validate()?;

        let outcome = Outcome {
            id: new_id(),
            proposal_id: proposal.id,
            happened: report.happened,
            notes: report.notes,
            completed_dares: report.completed_dares,
            bet_results: report.bet_results.clone(),
            created_at: Utc::now(),
        };

        let settled = self
            .store
            .apply_settlement(Settlement {
                outcome: outcome.clone(),
                bet_results: report.bet_results,
            })
            .await
            .map_err(|e| match e {
                StoreError::Duplicate { .. } => GameError::DuplicateOutcome,
                other => GameError::Store(other),
            })?;

        if !settled.missing_bets.is_empty() {
            debug!(missing = ?settled.missing_bets, "bet results named unknown bets");
        }
        info!(
            outcome_id = %outcome.id,
            settled = settled.settled_bets.len(),
            "outcome recorded, proposal completed"
        );
        Ok(outcome)
    }

    /// The outcome recorded for a proposal.
    pub async fn get(&self, proposal_id: &str) -> Result<Outcome, GameError> {
        self.store
            .outcome_for_proposal(proposal_id)
            .await?
            .ok_or(GameError::NotFound("Outcome"))
    }
}
