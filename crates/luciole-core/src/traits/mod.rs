//! Trait seams implemented by the infrastructure crates.

pub mod store;

pub use store::SubscriptionStore;
