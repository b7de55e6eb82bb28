//! RSA signatures: PKCS#1 v1.5 over a SHA-256 digest of the message

use rand::{CryptoRng, RngCore};
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::digest::hash;
use crate::error::{CryptoError, Result};

/// Sign `data` with `key` using the thread-local CSPRNG for blinding.
pub fn sign(key: &RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>> {
    sign_with_rng(&mut rand::thread_rng(), key, data)
}

pub fn sign_with_rng<R: CryptoRng + RngCore>(
    rng: &mut R,
    key: &RsaPrivateKey,
    data: &[u8],
) -> Result<Vec<u8>> {
    let digest = hash(data);
    key.sign_with_rng(rng, Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(|e| CryptoError::SigningFailed(format!("PKCS#1 v1.5: {e}")))
}

/// Check `signature` over `data` against `key`.
///
/// `Ok(false)` means the signature does not match. A signature whose
/// length differs from the modulus size is malformed and fails with
/// [`CryptoError::MalformedSignature`].
pub fn verify(key: &RsaPublicKey, data: &[u8], signature: &[u8]) -> Result<bool> {
    if signature.len() != key.size() {
        return Err(CryptoError::MalformedSignature {
            expected: key.size(),
            actual: signature.len(),
        });
    }

    let digest = hash(data);
    Ok(key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .is_ok())
}
