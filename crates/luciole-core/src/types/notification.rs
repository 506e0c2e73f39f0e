//! Signalement status values and the notification payload sent to browsers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::SignalementId;
use crate::error::AppError;

/// Status a signalement can transition to.
///
/// This is a closed enum: the wire value is an arbitrary string, but an
/// unknown value is rejected at the request boundary rather than silently
/// producing a notification with blank content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalementStatus {
    /// The report was reviewed and accepted.
    Approved,
    /// The report was reviewed and declined.
    Rejected,
    /// The reported outage has been fixed.
    Resolved,
}

impl SignalementStatus {
    /// The canonical wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for SignalementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalementStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "resolved" => Ok(Self::Resolved),
            other => Err(AppError::validation(format!(
                "Unknown status value: '{other}'"
            ))),
        }
    }
}

/// The notification content delivered to the browser.
///
/// Opaque to the push transport; interpreted by the service worker on the
/// receiving side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
    /// Icon path.
    pub icon: String,
    /// Badge path.
    pub badge: String,
    /// Collapsing key: repeated status changes on the same signalement
    /// replace the visible notification instead of stacking.
    pub tag: String,
    /// Structured data for the receiving client.
    pub data: NotificationData,
}

/// Structured data block of a [`NotificationPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    /// The signalement whose status changed.
    pub signalement_id: SignalementId,
    /// The new status value.
    pub status: SignalementStatus,
}
