//! Push delivery configuration.

use serde::{Deserialize, Serialize};

/// Web Push delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// VAPID application server public key (base64url, uncompressed P-256 point).
    #[serde(default)]
    pub vapid_public_key: String,
    /// VAPID application server private key (base64url, 32-byte scalar).
    #[serde(default)]
    pub vapid_private_key: String,
    /// VAPID subject (`mailto:` or `https:` URI identifying the sender).
    #[serde(default = "default_vapid_subject")]
    pub vapid_subject: String,
    /// TTL header value sent to the push service, in seconds.
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u32,
    /// Timeout for one delivery attempt, in seconds.
    #[serde(default = "default_delivery_timeout")]
    pub delivery_timeout_seconds: u64,
    /// Maximum number of concurrent delivery attempts per dispatch.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// Icon path embedded in notification payloads.
    #[serde(default = "default_icon_path")]
    pub icon_path: String,
    /// Badge path embedded in notification payloads.
    #[serde(default = "default_badge_path")]
    pub badge_path: String,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            vapid_public_key: String::new(),
            vapid_private_key: String::new(),
            vapid_subject: default_vapid_subject(),
            ttl_seconds: default_ttl(),
            delivery_timeout_seconds: default_delivery_timeout(),
            max_concurrent: default_max_concurrent(),
            icon_path: default_icon_path(),
            badge_path: default_badge_path(),
        }
    }
}

fn default_vapid_subject() -> String {
    "mailto:admin@localhost".to_string()
}

fn default_ttl() -> u32 {
    3600
}

fn default_delivery_timeout() -> u64 {
    15
}

fn default_max_concurrent() -> usize {
    16
}

fn default_icon_path() -> String {
    "/icons/icon-192.png".to_string()
}

fn default_badge_path() -> String {
    "/icons/badge-72.png".to_string()
}
