//! # Love Dice Server
//!
//! Backend for a social dating game: propose a date, bet on how it goes,
//! roll dice dares, then report the outcome and settle the bets.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    LOVE DICE SERVER                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  └── rng.rs      - Xorshift128+ dice generator               │
//! │                                                              │
//! │  store/          - Persistence                               │
//! │  ├── mod.rs      - Store trait, atomic settlement            │
//! │  └── memory.rs   - In-memory tables                          │
//! │                                                              │
//! │  auth/           - Identity                                  │
//! │  ├── identity.rs - Signup, login, search                     │
//! │  ├── password.rs - Argon2id hashing                          │
//! │  └── token.rs    - JWT issue and validation                  │
//! │                                                              │
//! │  game/           - Proposal state machine                    │
//! │  ├── proposal.rs - Create, accept, decline                   │
//! │  ├── bet.rs      - Side bets and visibility                  │
//! │  ├── dare.rs     - Dice dares                                │
//! │  └── outcome.rs  - Outcome report and settlement             │
//! │                                                              │
//! │  api/            - HTTP (axum)                               │
//! │  ├── server.rs   - Router, CORS, serve loop                  │
//! │  ├── routes.rs   - Handlers                                  │
//! │  └── protocol.rs - Request/response bodies                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Proposal Lifecycle
//!
//! `pending → accepted | declined`, and `→ completed` once the target
//! records an outcome. Only the target may respond or report; to anyone
//! else the proposal does not exist.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod context;
pub mod core;
pub mod game;
pub mod store;

// Re-export commonly used types
pub use api::{ApiServer, ServerConfig};
pub use auth::{AuthConfig, IdentityService};
pub use context::{AppContext, SharedContext};
pub use core::rng::DiceRng;
pub use game::{Bet, Dare, Outcome, Proposal, ProposalStatus};
pub use store::{MemoryStore, Store};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
