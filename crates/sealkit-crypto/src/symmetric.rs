//! Passphrase-keyed AES-256-GCM
//!
//! Sealed format (binary):
//! ```text
//! [12 bytes: random nonce][N bytes: ciphertext][16 bytes: GCM tag]
//! ```
//!
//! The key is [`crate::kdf::derive_key`] of the passphrase. A fresh nonce
//! is drawn for every call and is never taken from the caller, so one
//! passphrase never reuses a nonce short of a 96-bit random collision.
//! No associated data is bound.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{CryptoRng, RngCore};

use crate::error::{CryptoError, Result};
use crate::kdf::derive_key;
use crate::NONCE_SIZE;

/// Encrypt `plaintext` under `passphrase` with a nonce from the thread-local CSPRNG.
///
/// Returns: `[12-byte nonce][ciphertext][16-byte tag]`
pub fn encrypt(plaintext: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    encrypt_with_rng(&mut rand::thread_rng(), plaintext, passphrase)
}

/// Encrypt `plaintext` under `passphrase` with a nonce drawn from `rng`.
pub fn encrypt_with_rng<R: CryptoRng + RngCore>(
    rng: &mut R,
    plaintext: &[u8],
    passphrase: &str,
) -> Result<Vec<u8>> {
    let key = derive_key(passphrase);
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(format!("AES-256-GCM: {e}")))?;

    let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    result.extend_from_slice(&nonce_bytes);
    result.extend_from_slice(&ciphertext);
    Ok(result)
}

/// Decrypt the output of [`encrypt`].
///
/// A wrong passphrase and a tampered input both fail with
/// [`CryptoError::AuthenticationFailed`].
pub fn decrypt(sealed: &[u8], passphrase: &str) -> Result<Vec<u8>> {
    if sealed.len() < NONCE_SIZE {
        return Err(CryptoError::InputTooShort {
            len: sealed.len(),
            min: NONCE_SIZE,
        });
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_SIZE);
    let nonce = Nonce::from_slice(nonce_bytes);
    let key = derive_key(passphrase);
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| CryptoError::AuthenticationFailed)
}
