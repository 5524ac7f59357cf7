//! HTTP Layer
//!
//! axum router serving the JSON API under `/api`.
//! Handlers are thin; all rules live in `game/` and `auth/`.

pub mod error;
pub mod extract;
pub mod protocol;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use extract::{bearer_token, ApiJson, AuthUser};
pub use protocol::{ErrorBody, HealthResponse, MessageResponse};
pub use server::{build_router, ApiServer, ApiServerError, ServerConfig};
