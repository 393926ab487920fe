//! Request admission for the chat sessions API: a static API key check
//! followed by a per-client fixed-window rate limiter.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod rate_limit;
pub mod router;
pub mod state;

pub use auth::{AuthGate, check_auth};
pub use error::GateError;
pub use rate_limit::{AdmissionLimiter, client_identity};
pub use router::{build_router, guard};
pub use state::AppState;
