//! sealkit-crypto: small cryptographic toolkit
//!
//! Building blocks, leaf-first:
//! ```text
//! digest     SHA-256 hash, HMAC-SHA-256 (base64 text)
//! kdf        passphrase → 256-bit key (SHA-256, fast, unsalted)
//! password   Argon2id PHC strings for credential storage
//! keys       RSA generation + PEM codec (PKCS#1, PKCS#8, SPKI)
//! asymmetric RSA-OAEP (SHA-512)
//! symmetric  AES-256-GCM keyed by passphrase: [12-byte nonce][ciphertext][16-byte tag]
//! signature  RSA PKCS#1 v1.5 over SHA-256
//! ```
//!
//! Every operation is a pure function of its inputs plus a secure random
//! source. The `*_with_rng` variants take that source explicitly.

pub mod asymmetric;
pub mod digest;
pub mod error;
pub mod kdf;
pub mod keys;
pub mod password;
pub mod signature;
pub mod symmetric;

pub use digest::{hash, mac, verify_mac};
pub use error::{CryptoError, Result};
pub use kdf::{derive_key, DerivedKey};
pub use keys::{
    decode_private, decode_public, encode_private, encode_private_pkcs8, encode_public,
    generate_key_pair, generate_key_pair_with_rng, KeyGenerator,
};
pub use password::{hash_password, verify_password, PasswordHasher, PasswordVerdict};
pub use rsa::{RsaPrivateKey, RsaPublicKey};

/// Size of a derived symmetric key in bytes (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of an AES-GCM nonce (96-bit)
pub const NONCE_SIZE: usize = 12;

/// Size of a GCM authentication tag
pub const TAG_SIZE: usize = 16;

/// Smallest RSA modulus, in bits, that key generation will produce
pub const MIN_KEY_BITS: usize = 2048;

/// Largest RSA modulus, in bits, the codec can read back
pub const MAX_KEY_BITS: usize = 4096;
