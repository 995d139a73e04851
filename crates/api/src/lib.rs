//! Plantwatch API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes) so the
//! binary entrypoint and the integration tests assemble the same router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
