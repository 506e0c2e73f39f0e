//! Message encryption for Web Push (RFC 8291, aes128gcm content coding).
//!
//! The payload is encrypted for one subscription at a time: an ephemeral
//! P-256 ECDH agreement against the client's `p256dh` key, HKDF-SHA256 key
//! derivation salted with the client's `auth` secret, and a single
//! AES-128-GCM record framed with the RFC 8188 header.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes128Gcm, KeyInit};
use base64::Engine as _;
use hkdf::Hkdf;
use p256::ecdh::EphemeralSecret;
use p256::elliptic_curve::rand_core::{OsRng, RngCore};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use sha2::Sha256;

use luciole_core::error::AppError;
use luciole_core::result::AppResult;

/// SEC1 uncompressed P-256 point length.
pub const PUBLIC_KEY_LEN: usize = 65;
/// Client auth secret length.
pub const AUTH_SECRET_LEN: usize = 16;

const SALT_LEN: usize = 16;
const RECORD_SIZE: u32 = 4096;
const IKM_INFO_PREFIX: &str = "WebPush: info\0";
const KEY_INFO: &str = "Content-Encoding: aes128gcm\0";
const NONCE_INFO: &str = "Content-Encoding: nonce\0";

/// One encrypted push message body plus the header values that describe it.
#[derive(Debug, Clone)]
pub struct EncryptedMessage {
    /// RFC 8188 body: salt, record size, sender public key, ciphertext.
    pub body: Vec<u8>,
    /// Salt, base64url, for the `Encryption` header.
    pub salt_b64: String,
    /// Ephemeral sender public key, base64url, for the `Crypto-Key` header.
    pub sender_key_b64: String,
}

/// Encrypt a payload for one subscription's key material.
pub fn encrypt(plaintext: &[u8], p256dh_b64: &str, auth_b64: &str) -> AppResult<EncryptedMessage> {
    if plaintext.is_empty() {
        return Err(AppError::delivery("Push payload cannot be empty"));
    }

    let client_pub_raw = decode_b64url(p256dh_b64)
        .map_err(|e| AppError::delivery(format!("Invalid p256dh key: {e}")))?;
    let client_pub_raw: [u8; PUBLIC_KEY_LEN] = client_pub_raw
        .try_into()
        .map_err(|_| AppError::delivery("Invalid p256dh key length"))?;
    let auth_secret = decode_b64url(auth_b64)
        .map_err(|e| AppError::delivery(format!("Invalid auth key: {e}")))?;
    let auth_secret: [u8; AUTH_SECRET_LEN] = auth_secret
        .try_into()
        .map_err(|_| AppError::delivery("Invalid auth secret length"))?;

    let client_pub = p256::PublicKey::from_sec1_bytes(&client_pub_raw)
        .map_err(|_| AppError::delivery("Invalid client public key"))?;

    let mut rng = OsRng;
    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);

    let sender_secret = EphemeralSecret::random(&mut rng);
    let sender_pub = p256::PublicKey::from(&sender_secret);
    let sender_pub_point = sender_pub.to_encoded_point(false);
    let sender_pub_raw: [u8; PUBLIC_KEY_LEN] = sender_pub_point
        .as_bytes()
        .try_into()
        .map_err(|_| AppError::delivery("Invalid sender public key length"))?;

    let shared_secret = sender_secret.diffie_hellman(&client_pub);

    // key_info = "WebPush: info" || 0x00 || ua_public || as_public
    let mut ikm_info = Vec::with_capacity(IKM_INFO_PREFIX.len() + PUBLIC_KEY_LEN * 2);
    ikm_info.extend_from_slice(IKM_INFO_PREFIX.as_bytes());
    ikm_info.extend_from_slice(&client_pub_raw);
    ikm_info.extend_from_slice(&sender_pub_raw);

    let ikm = hkdf_sha256(
        &auth_secret,
        shared_secret.raw_secret_bytes().as_ref(),
        &ikm_info,
        32,
    )?;
    let cek = hkdf_sha256(&salt, &ikm, KEY_INFO.as_bytes(), 16)?;
    let nonce = hkdf_sha256(&salt, &ikm, NONCE_INFO.as_bytes(), 12)?;

    let cipher =
        Aes128Gcm::new_from_slice(&cek).map_err(|_| AppError::delivery("Invalid CEK length"))?;
    let iv = record_iv(&nonce, 0);

    // Single record: plaintext followed by the final-record delimiter.
    let mut padded = Vec::with_capacity(plaintext.len() + 1);
    padded.extend_from_slice(plaintext);
    padded.push(2);

    let ciphertext = cipher
        .encrypt((&iv).into(), padded.as_slice())
        .map_err(|_| AppError::delivery("AES-GCM encryption failed"))?;

    let mut body = Vec::with_capacity(SALT_LEN + 4 + 1 + PUBLIC_KEY_LEN + ciphertext.len());
    body.extend_from_slice(&salt);
    body.extend_from_slice(&RECORD_SIZE.to_be_bytes());
    body.push(PUBLIC_KEY_LEN as u8);
    body.extend_from_slice(&sender_pub_raw);
    body.extend_from_slice(&ciphertext);

    Ok(EncryptedMessage {
        body,
        salt_b64: encode_b64url(&salt),
        sender_key_b64: encode_b64url(&sender_pub_raw),
    })
}

fn hkdf_sha256(salt: &[u8], ikm: &[u8], info: &[u8], len: usize) -> AppResult<Vec<u8>> {
    let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
    let mut okm = vec![0u8; len];
    hk.expand(info, &mut okm)
        .map_err(|_| AppError::delivery("HKDF expand failed"))?;
    Ok(okm)
}

fn record_iv(nonce: &[u8], counter: u64) -> [u8; 12] {
    let mut iv = [0u8; 12];
    let offset = 12 - 8;
    iv[0..offset].copy_from_slice(&nonce[0..offset]);
    let mask = u64::from_be_bytes(nonce[offset..].try_into().unwrap());
    iv[offset..].copy_from_slice(&(mask ^ counter).to_be_bytes());
    iv
}

/// Decode base64url without padding.
pub fn decode_b64url(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(input.as_bytes())
}

/// Encode base64url without padding.
pub fn encode_b64url(input: &[u8]) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(input)
}
