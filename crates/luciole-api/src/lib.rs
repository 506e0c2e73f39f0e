//! # luciole-api
//!
//! HTTP API layer for Luciole built on Axum.
//!
//! Provides the dispatch trigger endpoint, subscription management,
//! middleware (CORS, request tracing), DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
