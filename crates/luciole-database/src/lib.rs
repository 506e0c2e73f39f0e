//! # luciole-database
//!
//! PostgreSQL connection management and concrete [`SubscriptionStore`]
//! implementations: the durable Postgres repository used in production and
//! an in-memory store for development and tests.
//!
//! [`SubscriptionStore`]: luciole_core::traits::SubscriptionStore

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::connect_pool;
pub use memory::MemorySubscriptionStore;
pub use repositories::subscription::SubscriptionRepository;
