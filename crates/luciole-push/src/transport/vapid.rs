//! VAPID (RFC 8292) application server identity.
//!
//! Each push service origin receives a short-lived ES256 JWT asserting who
//! the application server is. Tokens are cached per audience and reissued
//! shortly before expiry.

use chrono::Utc;
use dashmap::DashMap;
use p256::ecdsa::SigningKey;
use p256::ecdsa::signature::Signer;
use serde::Serialize;
use url::Url;

use luciole_core::config::push::PushConfig;
use luciole_core::error::AppError;
use luciole_core::result::AppResult;

use super::crypto::{PUBLIC_KEY_LEN, decode_b64url, encode_b64url};

const JWT_EXP_SECS: i64 = 12 * 60 * 60;
const JWT_SKEW_SECS: i64 = 60;

/// Validated VAPID key pair.
#[derive(Debug, Clone)]
pub struct VapidKeys {
    /// Public key, base64url, as sent in the `Crypto-Key` header.
    public_key_b64: String,
    /// Raw 32-byte private scalar.
    private_key: [u8; 32],
    /// `mailto:` or `https:` contact URI placed in the JWT `sub` claim.
    subject: String,
}

impl VapidKeys {
    /// Parse and validate the configured key material.
    ///
    /// Absent or malformed keys are a configuration error: fatal for the
    /// whole service, not per subscription.
    pub fn from_config(config: &PushConfig) -> AppResult<Self> {
        if config.vapid_public_key.is_empty() || config.vapid_private_key.is_empty() {
            return Err(AppError::configuration(
                "VAPID keys are not configured (push.vapid_public_key / push.vapid_private_key)",
            ));
        }

        let public_raw = decode_b64url(&config.vapid_public_key)
            .map_err(|e| AppError::configuration(format!("Invalid VAPID public key: {e}")))?;
        if public_raw.len() != PUBLIC_KEY_LEN {
            return Err(AppError::configuration(format!(
                "VAPID public key must decode to {PUBLIC_KEY_LEN} bytes"
            )));
        }

        let private_raw = decode_b64url(&config.vapid_private_key)
            .map_err(|e| AppError::configuration(format!("Invalid VAPID private key: {e}")))?;
        let private_key: [u8; 32] = private_raw
            .try_into()
            .map_err(|_| AppError::configuration("VAPID private key must decode to 32 bytes"))?;

        Ok(Self {
            public_key_b64: config.vapid_public_key.clone(),
            private_key,
            subject: config.vapid_subject.clone(),
        })
    }

    /// The base64url public key.
    pub fn public_key_b64(&self) -> &str {
        &self.public_key_b64
    }
}

#[derive(Debug, Clone)]
struct CachedJwt {
    jwt: String,
    exp_unix: i64,
}

/// Issues and caches VAPID JWTs keyed by push service audience.
#[derive(Debug)]
pub struct VapidSigner {
    keys: VapidKeys,
    cache: DashMap<String, CachedJwt>,
}

impl VapidSigner {
    /// Create a signer from validated keys.
    pub fn new(keys: VapidKeys) -> Self {
        Self {
            keys,
            cache: DashMap::new(),
        }
    }

    /// The base64url public key, as the browser and the `Crypto-Key`
    /// header need it.
    pub fn public_key_b64(&self) -> &str {
        self.keys.public_key_b64()
    }

    /// Return a JWT valid for the given audience, reusing a cached token
    /// while it has more than the skew window left.
    pub fn jwt_for_audience(&self, aud: &str) -> AppResult<String> {
        let now = Utc::now().timestamp();
        if let Some(entry) = self.cache.get(aud) {
            if entry.exp_unix - JWT_SKEW_SECS > now {
                return Ok(entry.jwt.clone());
            }
        }

        let (jwt, exp_unix) = self.build_jwt(aud)?;
        self.cache.insert(
            aud.to_string(),
            CachedJwt {
                jwt: jwt.clone(),
                exp_unix,
            },
        );
        Ok(jwt)
    }

    fn build_jwt(&self, aud: &str) -> AppResult<(String, i64)> {
        #[derive(Serialize)]
        struct Claims<'a> {
            aud: &'a str,
            exp: u64,
            sub: &'a str,
        }

        let header = serde_json::json!({ "typ": "JWT", "alg": "ES256" });
        let exp_unix = (Utc::now() + chrono::Duration::seconds(JWT_EXP_SECS)).timestamp();
        let claims = Claims {
            aud,
            exp: exp_unix as u64,
            sub: &self.keys.subject,
        };

        let header_b64 = encode_b64url(serde_json::to_string(&header)?.as_bytes());
        let claims_b64 = encode_b64url(serde_json::to_string(&claims)?.as_bytes());
        let signing_input = format!("{header_b64}.{claims_b64}");

        let signing_key = SigningKey::from_bytes((&self.keys.private_key).into())
            .map_err(|_| AppError::configuration("Invalid VAPID private key"))?;
        let signature: p256::ecdsa::Signature = signing_key.sign(signing_input.as_bytes());
        let signature_b64 = encode_b64url(signature.to_bytes().as_ref());

        Ok((format!("{signing_input}.{signature_b64}"), exp_unix))
    }
}

/// Derive the push service audience (`scheme://host[:port]`) from a
/// subscription endpoint URL.
pub fn push_service_audience(endpoint: &str) -> AppResult<String> {
    let url = Url::parse(endpoint)
        .map_err(|e| AppError::delivery(format!("Invalid push endpoint URL: {e}")))?;
    let host = url
        .host()
        .ok_or_else(|| AppError::delivery("Push endpoint missing host"))?;

    let host = match host {
        url::Host::Domain(d) => d.to_string(),
        url::Host::Ipv4(ip) => ip.to_string(),
        url::Host::Ipv6(ip) => format!("[{ip}]"),
    };

    let aud = match (url.scheme(), url.port()) {
        (scheme, Some(port)) => format!("{scheme}://{host}:{port}"),
        (scheme, None) => format!("{scheme}://{host}"),
    };
    Ok(aud)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audience_strips_path() {
        assert_eq!(
            push_service_audience("https://fcm.googleapis.com/fcm/send/abc123").unwrap(),
            "https://fcm.googleapis.com"
        );
        assert_eq!(
            push_service_audience("https://push.example:8443/ch/1").unwrap(),
            "https://push.example:8443"
        );
    }

    #[test]
    fn test_audience_rejects_garbage() {
        assert!(push_service_audience("not a url").is_err());
    }

    #[test]
    fn test_missing_keys_are_a_configuration_error() {
        let err = VapidKeys::from_config(&PushConfig::default()).unwrap_err();
        assert_eq!(err.kind, luciole_core::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_jwt_issued_and_cached() {
        use p256::elliptic_curve::rand_core::OsRng;
        use p256::elliptic_curve::sec1::ToEncodedPoint;

        let secret = p256::SecretKey::random(&mut OsRng);
        let public = secret.public_key().to_encoded_point(false);

        let config = PushConfig {
            vapid_public_key: encode_b64url(public.as_bytes()),
            vapid_private_key: encode_b64url(&secret.to_bytes()),
            ..PushConfig::default()
        };

        let signer = VapidSigner::new(VapidKeys::from_config(&config).unwrap());
        let a = signer.jwt_for_audience("https://push.example").unwrap();
        let b = signer.jwt_for_audience("https://push.example").unwrap();

        assert_eq!(a, b);
        assert_eq!(a.split('.').count(), 3);
    }
}
