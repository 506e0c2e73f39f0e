//! # luciole-push
//!
//! Web Push delivery for Luciole. Three layers:
//!
//! - [`transport`] — the wire: VAPID-authenticated, aes128gcm-encrypted
//!   HTTP POST to the subscription endpoint, behind the [`PushTransport`]
//!   trait so everything above it is testable without a network.
//! - [`client`] — per-attempt outcome classification: one transport call
//!   becomes a [`DeliveryOutcome`], never an error. Carries the per-attempt
//!   timeout.
//! - [`dispatcher`] — fan-out/fan-in: one status change becomes N
//!   concurrent delivery attempts, one batched prune of permanently dead
//!   endpoints, and one aggregate [`DispatchResult`].
//!
//! [`PushTransport`]: transport::PushTransport
//! [`DeliveryOutcome`]: luciole_core::types::DeliveryOutcome
//! [`DispatchResult`]: luciole_core::types::DispatchResult

pub mod client;
pub mod content;
pub mod dispatcher;
pub mod transport;

pub use client::DeliveryClient;
pub use dispatcher::DispatchCoordinator;
pub use transport::PushTransport;
pub use transport::http::VapidHttpTransport;
