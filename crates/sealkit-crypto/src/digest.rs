//! SHA-256 digests and HMAC-SHA-256 message authentication
//!
//! MAC output is standard base64 (padded), 44 characters for the 32-byte
//! code. It is meant for tamper-evident tokens, not secrecy.

use base64::{engine::general_purpose::STANDARD as B64, Engine};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 of `data`.
pub fn hash(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// HMAC-SHA-256 of `message` keyed by `secret`, base64 encoded.
///
/// Empty messages and empty secrets are valid inputs.
pub fn mac(message: &[u8], secret: &[u8]) -> String {
    B64.encode(hmac_sha256(message, secret).finalize().into_bytes())
}

/// Check a base64 tag produced by [`mac`] in constant time.
///
/// A tag that is not valid base64 fails verification like any other
/// wrong tag.
pub fn verify_mac(message: &[u8], secret: &[u8], tag: &str) -> bool {
    let Ok(expected) = B64.decode(tag) else {
        return false;
    };
    hmac_sha256(message, secret).verify_slice(&expected).is_ok()
}

fn hmac_sha256(message: &[u8], secret: &[u8]) -> HmacSha256 {
    let mut mac = match HmacSha256::new_from_slice(secret) {
        Ok(mac) => mac,
        // infallible: HMAC hashes or pads keys of any length
        Err(_) => unreachable!("HMAC rejected a {}-byte key", secret.len()),
    };
    mac.update(message);
    mac
}
