//! Game Logic Module
//!
//! The proposal → bet/dare → outcome state machine.
//!
//! ## Module Structure
//!
//! - `model`: Users, proposals, bets, dares, outcomes
//! - `proposal`: Proposal Manager (create, list, accept, decline)
//! - `bet`: Bet Ledger (create, visibility-filtered list, complete)
//! - `dare`: Dare Roller (roll, list, complete)
//! - `outcome`: Outcome Recorder (record with settlement, get)
//! - `error`: Component error type

pub mod bet;
pub mod dare;
pub mod error;
pub mod model;
pub mod outcome;
pub mod proposal;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types
pub use bet::{BetLedger, NewBet};
pub use dare::DareRoller;
pub use error::GameError;
pub use model::{Bet, BetResult, Dare, Outcome, Proposal, ProposalStatus, UserProfile, UserRecord};
pub use outcome::{OutcomeRecorder, OutcomeReport};
pub use proposal::ProposalManager;
