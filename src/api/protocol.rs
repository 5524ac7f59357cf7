//! Protocol Messages
//!
//! JSON request and response bodies for the HTTP API. Domain records
//! (`Proposal`, `Bet`, `Dare`, `Outcome`, `UserProfile`) are returned as-is.

use serde::{Deserialize, Serialize};

use crate::game::model::BetResult;
use crate::game::{NewBet, OutcomeReport};

// =============================================================================
// CLIENT -> SERVER
// =============================================================================

/// `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Plaintext password, checked against the stored hash.
    pub password: String,
}

/// `POST /proposals`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProposalRequest {
    /// Username of the user being asked out.
    pub target_username: String,
    /// Who the date is with.
    pub proposed_match_name: String,
    /// What the loser owes.
    pub stakes: String,
}

/// `POST /bets`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBetRequest {
    /// Proposal the bet is on.
    pub proposal_id: String,
    /// What is being bet on.
    pub bet_description: String,
    /// What the bet is worth.
    pub stake: String,
    /// Hide the bet from everyone but its creator.
    #[serde(default)]
    pub is_hidden: bool,
}

impl From<CreateBetRequest> for NewBet {
    fn from(req: CreateBetRequest) -> Self {
        NewBet {
            proposal_id: req.proposal_id,
            bet_description: req.bet_description,
            stake: req.stake,
            is_hidden: req.is_hidden,
        }
    }
}

/// `PUT /bets/{bet_id}/complete?won=<bool>`
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteBetParams {
    /// Whether the bet was won.
    pub won: bool,
}

/// `POST /dares/roll`
#[derive(Debug, Clone, Deserialize)]
pub struct RollDareRequest {
    /// Proposal to roll against.
    pub proposal_id: String,
    /// Gender category selecting the dare pool.
    pub gender: String,
}

/// `POST /outcomes`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOutcomeRequest {
    /// Proposal being reported on.
    pub proposal_id: String,
    /// Whether the date took place.
    pub happened: bool,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// IDs of dares that were completed.
    #[serde(default)]
    pub completed_dares: Vec<String>,
    /// Per-bet settlement.
    #[serde(default)]
    pub bet_results: Vec<BetResult>,
}

impl From<CreateOutcomeRequest> for OutcomeReport {
    fn from(req: CreateOutcomeRequest) -> Self {
        OutcomeReport {
            proposal_id: req.proposal_id,
            happened: req.happened,
            notes: req.notes,
            completed_dares: req.completed_dares,
            bet_results: req.bet_results,
        }
    }
}

/// `GET /users/search?q=<substring>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Username substring.
    #[serde(default)]
    pub q: String,
}

// =============================================================================
// SERVER -> CLIENT
// =============================================================================

/// Acknowledgement for state changes without a body of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable acknowledgement.
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service name.
    pub message: String,
    /// Crate version.
    pub version: String,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short error message.
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_request_defaults() {
        let req: CreateOutcomeRequest =
            serde_json::from_str(r#"{"proposal_id":"p1","happened":false}"#).unwrap();
        assert!(req.notes.is_empty());
        assert!(req.completed_dares.is_empty());
        assert!(req.bet_results.is_empty());
    }

    #[test]
    fn test_outcome_request_rejects_untyped_bet_results() {
        let bad =
            r#"{"proposal_id":"p1","happened":true,"bet_results":[{"id":"b1","result":"win"}]}"#;
        assert!(serde_json::from_str::<CreateOutcomeRequest>(bad).is_err());

        let bad = r#"{"proposal_id":"p1","happened":true,"bet_results":["b1"]}"#;
        assert!(serde_json::from_str::<CreateOutcomeRequest>(bad).is_err());
    }

    #[test]
    fn test_bet_defaults_to_visible() {
        let req: CreateBetRequest =
            serde_json::from_str(r#"{"proposal_id":"p","bet_description":"d","stake":"s"}"#)
                .unwrap();
        assert!(!NewBet::from(req).is_hidden);
    }
}
