//! Domain records.
//!
//! Every record is keyed by an opaque UUID v4 string and stamps its creation
//! time at insert. `Proposal` is the aggregate root; bets, dares and outcomes
//! only point at it by `proposal_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generate a fresh record ID.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// USERS
// =============================================================================

/// Stored user record. Holds the password hash, so it is never serialized
/// to clients directly; see [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Record ID.
    pub id: String,
    /// Unique account name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Gender category, free text. Selects the dare pool.
    pub gender: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Unused by the core logic.
    pub friends: Vec<String>,
    /// Signup time.
    pub created_at: DateTime<Utc>,
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID.
    pub id: String,
    /// Account name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Gender category.
    pub gender: String,
}

impl From<&UserRecord> for UserProfile {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            gender: user.gender.clone(),
        }
    }
}

// =============================================================================
// PROPOSALS
// =============================================================================

/// Proposal lifecycle.
///
/// ```text
/// pending ──accept──> accepted ──outcome──> completed
///    └─────decline──> declined
/// ```
///
/// Accept/decline overwrite whatever status is stored; only the outcome path
/// sets `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Sent, not yet answered.
    Pending,
    /// Target said yes.
    Accepted,
    /// Target said no.
    Declined,
    /// Outcome recorded.
    Completed,
}

impl ProposalStatus {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Declined => "declined",
            ProposalStatus::Completed => "completed",
        }
    }
}

/// A date proposal from one user to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Record ID.
    pub id: String,
    /// User who proposed.
    pub proposer_id: String,
    /// Proposer's username at creation.
    pub proposer_username: String,
    /// User being asked.
    pub target_user_id: String,
    /// Target's username at creation.
    pub target_username: String,
    /// Who the date is with.
    pub proposed_match_name: String,
    /// What the loser owes.
    pub stakes: String,
    /// Lifecycle status.
    pub status: ProposalStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Proposal {
    /// Whether `user_id` is the proposer or the target.
    pub fn involves(&self, user_id: &str) -> bool {
        self.proposer_id == user_id || self.target_user_id == user_id
    }
}

// =============================================================================
// BETS
// =============================================================================

/// A side bet on how a date goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    /// Record ID.
    pub id: String,
    /// Proposal the bet is on.
    pub proposal_id: String,
    /// User who placed the bet.
    pub bet_creator_id: String,
    /// Creator's username at creation.
    pub bet_creator_username: String,
    /// What is being bet on.
    pub bet_description: String,
    /// What the bet is worth.
    pub stake: String,
    /// Hidden from everyone but the creator.
    pub is_hidden: bool,
    /// Settled.
    pub completed: bool,
    /// Unset until the bet is settled.
    pub won: Option<bool>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Bet {
    /// Hidden bets are visible only to their creator.
    pub fn visible_to(&self, user_id: &str) -> bool {
        !self.is_hidden || self.bet_creator_id == user_id
    }

    /// Mark settled with the given result.
    pub fn settle(&mut self, won: bool) {
        self.completed = true;
        self.won = Some(won);
    }
}

// =============================================================================
// DARES
// =============================================================================

/// A rolled dare prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dare {
    /// Record ID.
    pub id: String,
    /// Proposal the dare belongs to.
    pub proposal_id: String,
    /// Prompt text.
    pub dare_text: String,
    /// Always in 1..=6.
    pub roll_number: u8,
    /// Done.
    pub completed: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Settlement entry for one bet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BetResult {
    /// Bet being settled.
    pub bet_id: String,
    /// Whether it was won.
    pub won: bool,
}

/// Final report of a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Record ID.
    pub id: String,
    /// Proposal reported on.
    pub proposal_id: String,
    /// Whether the date took place.
    pub happened: bool,
    /// Free-form notes.
    pub notes: String,
    /// IDs of completed dares.
    pub completed_dares: Vec<String>,
    /// Per-bet settlement as reported.
    pub bet_results: Vec<BetResult>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}
