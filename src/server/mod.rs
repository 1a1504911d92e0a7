//! Axum-based HTTP server for the first-aid relay.
//!
//! # Components
//!
//! - `handlers`: The `/ask` pipeline plus the UI, health and metrics endpoints.
//! - `middleware`: Request ID tracking and panic-to-JSON conversion.
//! - `routes`: The router and the shared application state.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
