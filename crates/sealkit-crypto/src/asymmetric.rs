//! RSA-OAEP public-key encryption (SHA-512, empty label)
//!
//! Handles one block at a time: the message must fit in
//! `modulus_bytes - 2 * 64 - 2` bytes, i.e. 126 bytes for a 2048-bit key.
//! Larger payloads are the caller's to split, or better, to encrypt with
//! [`crate::symmetric`] under a key sent this way.

use rand::{CryptoRng, RngCore};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha512;

use crate::error::{CryptoError, Result};

/// SHA-512 output size; OAEP overhead is twice this plus two bytes.
const HASH_LEN: usize = 64;

/// Largest message `encrypt` accepts for `key`.
pub fn max_message_len(key: &RsaPublicKey) -> usize {
    key.size().saturating_sub(2 * HASH_LEN + 2)
}

/// Encrypt `message` to `key` using the thread-local CSPRNG.
pub fn encrypt(message: &[u8], key: &RsaPublicKey) -> Result<Vec<u8>> {
    encrypt_with_rng(&mut rand::thread_rng(), message, key)
}

pub fn encrypt_with_rng<R: CryptoRng + RngCore>(
    rng: &mut R,
    message: &[u8],
    key: &RsaPublicKey,
) -> Result<Vec<u8>> {
    let max = max_message_len(key);
    if message.len() > max {
        return Err(CryptoError::PayloadTooLarge {
            len: message.len(),
            max,
        });
    }

    key.encrypt(rng, Oaep::new::<Sha512>(), message)
        .map_err(|e| CryptoError::EncryptionFailed(format!("RSA-OAEP: {e}")))
}

/// Decrypt `ciphertext` with `key`.
///
/// Every failure, whether wrong key, bad padding or wrong length, comes
/// back as the same [`CryptoError::DecryptionFailed`].
pub fn decrypt(ciphertext: &[u8], key: &RsaPrivateKey) -> Result<Vec<u8>> {
    decrypt_with_rng(&mut rand::thread_rng(), ciphertext, key)
}

/// Decrypt with RSA blinding randomness drawn from `rng`.
pub fn decrypt_with_rng<R: CryptoRng + RngCore>(
    rng: &mut R,
    ciphertext: &[u8],
    key: &RsaPrivateKey,
) -> Result<Vec<u8>> {
    key.decrypt_blinded(rng, Oaep::new::<Sha512>(), ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)
}
