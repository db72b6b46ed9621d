//! HTTP layer for the health-query backend.
//!
//! The router is composable — `health_api_router()` returns a `Router`
//! that can be mounted on any axum server instance; `server.rs` owns the
//! bind/spawn/shutdown lifecycle.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::health_api_router;
pub use server::{start_server, ApiServer};
pub use types::ApiContext;
