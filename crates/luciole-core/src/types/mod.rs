//! Domain types shared across all Luciole crates.

pub mod dispatch;
pub mod id;
pub mod notification;
pub mod subscription;

pub use dispatch::{DeliveryOutcome, DeliveryStatus, DispatchResult};
pub use id::{SignalementId, UserId};
pub use notification::{NotificationPayload, SignalementStatus};
pub use subscription::{NewSubscription, Subscription};
