//! # luciole-core
//!
//! Core crate for the Luciole push dispatch service. Contains configuration
//! schemas, typed identifiers, domain types, the subscription store trait,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Luciole crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
