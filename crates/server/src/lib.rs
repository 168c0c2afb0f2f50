//! HTTP surface for vacstat.
//!
//! Routes, shared state, and the error-to-response mapping live here; the
//! binary in `main.rs` only wires configuration, store, and fetcher together.

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{AppState, router};
