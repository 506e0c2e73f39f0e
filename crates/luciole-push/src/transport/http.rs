//! Production push transport: VAPID-authenticated HTTP POST.

use std::time::Duration;

use luciole_core::config::push::PushConfig;
use luciole_core::error::AppError;
use luciole_core::result::AppResult;
use luciole_core::types::subscription::Subscription;

use async_trait::async_trait;

use super::vapid::{VapidKeys, VapidSigner, push_service_audience};
use super::{PushTransport, TransportResponse, crypto};

const MAX_DETAIL_CHARS: usize = 500;

/// [`PushTransport`] that encrypts the payload per subscription and POSTs
/// it to the endpoint with VAPID authorization headers.
#[derive(Debug)]
pub struct VapidHttpTransport {
    client: reqwest::Client,
    signer: VapidSigner,
    ttl_seconds: u32,
}

impl VapidHttpTransport {
    /// Build the transport from configuration.
    ///
    /// Fails with a configuration error if the VAPID key material is
    /// absent or malformed, so a misconfigured server is caught at
    /// startup rather than per request.
    pub fn from_config(config: &PushConfig) -> AppResult<Self> {
        let keys = VapidKeys::from_config(config)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.delivery_timeout_seconds))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            signer: VapidSigner::new(keys),
            ttl_seconds: config.ttl_seconds,
        })
    }

    /// The application server public key browsers subscribe with.
    pub fn vapid_public_key(&self) -> &str {
        self.signer.public_key_b64()
    }
}

#[async_trait]
impl PushTransport for VapidHttpTransport {
    async fn push(
        &self,
        subscription: &Subscription,
        payload: &[u8],
    ) -> AppResult<TransportResponse> {
        let aud = push_service_audience(&subscription.endpoint)?;
        let jwt = self.signer.jwt_for_audience(&aud)?;

        let message = crypto::encrypt(payload, &subscription.p256dh_key, &subscription.auth_key)?;

        let crypto_key = format!(
            "dh={}; p256ecdsa={}",
            message.sender_key_b64,
            self.signer.public_key_b64()
        );
        let authorization = format!("vapid t={}, k={}", jwt, self.signer.public_key_b64());

        let response = self
            .client
            .post(&subscription.endpoint)
            .header("TTL", self.ttl_seconds.to_string())
            .header("Content-Encoding", "aes128gcm")
            .header("Content-Type", "application/octet-stream")
            .header("Encryption", format!("salt={}", message.salt_b64))
            .header("Crypto-Key", crypto_key)
            .header("Authorization", authorization)
            .header("Urgency", "normal")
            .body(message.body)
            .send()
            .await
            .map_err(|e| AppError::delivery(format!("Push request failed: {e}")))?;

        let status = response.status().as_u16();
        let detail = if response.status().is_success() {
            None
        } else {
            let body = response.text().await.unwrap_or_default();
            Some(truncate_chars(&body, MAX_DETAIL_CHARS))
        };

        Ok(TransportResponse { status, detail })
    }
}

fn truncate_chars(input: &str, max_chars: usize) -> String {
    let mut out: String = input.chars().take(max_chars).collect();
    if input.chars().count() > max_chars {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc…");
    }

    #[test]
    fn test_from_config_requires_keys() {
        let err = VapidHttpTransport::from_config(&PushConfig::default()).unwrap_err();
        assert_eq!(err.kind, luciole_core::error::ErrorKind::Configuration);
    }
}
