//! Key derivation: passphrase → 256-bit symmetric key
//!
//! The derivation is a single unsalted SHA-256 of the passphrase. It is
//! fast on purpose and gives no protection against brute force of
//! low-entropy passphrases. Never use it to store passwords; that is what
//! [`crate::password`] is for. Its only job is keying
//! [`crate::symmetric`] from a caller-managed secret.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::digest::hash;
use crate::KEY_SIZE;

/// A 256-bit key derived from a passphrase. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive the symmetric key for `passphrase`.
pub fn derive_key(passphrase: &str) -> DerivedKey {
    DerivedKey::from_bytes(hash(passphrase.as_bytes()))
}
