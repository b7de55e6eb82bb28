//! RSA key generation and PEM serialization
//!
//! Containers written:
//! ```text
//! RSA PRIVATE KEY   PKCS#1 RSAPrivateKey DER        (encode_private)
//! PRIVATE KEY       PKCS#8 PrivateKeyInfo DER       (encode_private_pkcs8)
//! RSA PUBLIC KEY    X.509 SubjectPublicKeyInfo DER  (encode_public)
//! ```
//!
//! Decoding picks the parser from the PEM label, never by trying parsers in
//! turn. `RSA PUBLIC KEY` carries SubjectPublicKeyInfo here, not the PKCS#1
//! RSAPublicKey structure other tools put under that label. Plain
//! `PUBLIC KEY` is read the same way.
//!
//! Private-key DER copies made while encoding or decoding are wiped before
//! returning. The PEM text handed back by `encode_private*` is a plain
//! `Vec<u8>` and is the caller's to wipe.

use rand::{CryptoRng, RngCore};
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::spki::SubjectPublicKeyInfoRef;
use rsa::pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, ObjectIdentifier,
    PrivateKeyInfo,
};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sealkit_core::config::KeyConfig;
use zeroize::Zeroize;

use crate::error::{CryptoError, Result};
use crate::{MAX_KEY_BITS, MIN_KEY_BITS};

/// rsaEncryption (PKCS#1)
const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

const PKCS1_PRIVATE_LABEL: &str = "RSA PRIVATE KEY";
const PKCS8_PRIVATE_LABEL: &str = "PRIVATE KEY";
const ENCRYPTED_PKCS8_LABEL: &str = "ENCRYPTED PRIVATE KEY";
const RSA_PUBLIC_LABEL: &str = "RSA PUBLIC KEY";
const SPKI_PUBLIC_LABEL: &str = "PUBLIC KEY";
const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// What a PEM block claims to hold, according to its label.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Container {
    Pkcs1Private,
    Pkcs8Private,
    EncryptedPkcs8Private,
    SpkiPublic,
    Certificate,
    Unknown(String),
}

impl Container {
    fn from_label(label: &str) -> Self {
        match label {
            PKCS1_PRIVATE_LABEL => Container::Pkcs1Private,
            PKCS8_PRIVATE_LABEL => Container::Pkcs8Private,
            ENCRYPTED_PKCS8_LABEL => Container::EncryptedPkcs8Private,
            RSA_PUBLIC_LABEL | SPKI_PUBLIC_LABEL => Container::SpkiPublic,
            CERTIFICATE_LABEL => Container::Certificate,
            other => Container::Unknown(other.to_string()),
        }
    }
}

/// Parse the PEM envelope and reject legacy `Proc-Type: 4,ENCRYPTED` blocks.
///
/// The passphrase such blocks need is never available here, so they are
/// reported as unsupported instead of failing later as malformed DER.
fn open_envelope(data: &[u8]) -> Result<(Container, pem::Pem)> {
    let block = pem::parse(data).map_err(|e| CryptoError::MalformedKey(format!("PEM: {e}")))?;

    let encrypted = block
        .headers()
        .get("Proc-Type")
        .is_some_and(|v| v.contains("ENCRYPTED"));
    if encrypted {
        tracing::warn!(label = block.tag(), "rejecting password-encrypted PEM block");
        return Err(CryptoError::EncryptedContainerUnsupported);
    }

    let container = Container::from_label(block.tag());
    tracing::debug!(label = block.tag(), ?container, "opened PEM envelope");
    Ok((container, block))
}

fn encode_pem(label: &str, der: &[u8]) -> Vec<u8> {
    let config = pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF);
    let block = pem::Pem::new(label, der.to_vec());
    let encoded = pem::encode_config(&block, config);
    block.into_contents().zeroize();
    encoded.into_bytes()
}

/// RSA key generator enforcing a minimum modulus size.
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    min_bits: usize,
    default_bits: usize,
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self {
            min_bits: MIN_KEY_BITS,
            default_bits: MIN_KEY_BITS,
        }
    }
}

impl KeyGenerator {
    /// Build from config. A `min_bits` below 2048 is raised to 2048.
    pub fn from_config(config: &KeyConfig) -> Self {
        Self {
            min_bits: config.min_bits.max(MIN_KEY_BITS),
            default_bits: config.default_bits,
        }
    }

    pub fn min_bits(&self) -> usize {
        self.min_bits
    }

    pub fn default_bits(&self) -> usize {
        self.default_bits
    }

    /// Generate a key pair of `bits` using the thread-local CSPRNG.
    pub fn generate(&self, bits: usize) -> Result<(RsaPrivateKey, RsaPublicKey)> {
        self.generate_with_rng(&mut rand::thread_rng(), bits)
    }

    /// Generate a key pair of the configured default size.
    pub fn generate_default(&self) -> Result<(RsaPrivateKey, RsaPublicKey)> {
        self.generate(self.default_bits)
    }

    pub fn generate_with_rng<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        bits: usize,
    ) -> Result<(RsaPrivateKey, RsaPublicKey)> {
        if bits < self.min_bits {
            return Err(CryptoError::KeyGen(format!(
                "{bits}-bit modulus is below the {}-bit minimum",
                self.min_bits
            )));
        }
        if bits > MAX_KEY_BITS {
            return Err(CryptoError::KeyGen(format!(
                "{bits}-bit modulus exceeds the {MAX_KEY_BITS}-bit maximum"
            )));
        }

        let private = RsaPrivateKey::new(rng, bits).map_err(|e| CryptoError::KeyGen(e.to_string()))?;
        let public = private.to_public_key();

        tracing::debug!(bits, "generated RSA key pair");
        Ok((private, public))
    }
}

/// Generate an RSA key pair of `bits` (at least 2048).
pub fn generate_key_pair(bits: usize) -> Result<(RsaPrivateKey, RsaPublicKey)> {
    KeyGenerator::default().generate(bits)
}

/// Generate an RSA key pair of `bits` drawing randomness from `rng`.
pub fn generate_key_pair_with_rng<R: CryptoRng + RngCore>(
    rng: &mut R,
    bits: usize,
) -> Result<(RsaPrivateKey, RsaPublicKey)> {
    KeyGenerator::default().generate_with_rng(rng, bits)
}

/// Serialize a private key as PEM `RSA PRIVATE KEY` (PKCS#1).
pub fn encode_private(key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let der = key
        .to_pkcs1_der()
        .map_err(|e| CryptoError::EncodingError(format!("PKCS#1 private key: {e}")))?;
    Ok(encode_pem(PKCS1_PRIVATE_LABEL, der.as_bytes()))
}

/// Serialize a private key as PEM `PRIVATE KEY` (PKCS#8).
pub fn encode_private_pkcs8(key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let der = key
        .to_pkcs8_der()
        .map_err(|e| CryptoError::EncodingError(format!("PKCS#8 private key: {e}")))?;
    Ok(encode_pem(PKCS8_PRIVATE_LABEL, der.as_bytes()))
}

/// Serialize a public key as PEM `RSA PUBLIC KEY` (SubjectPublicKeyInfo).
pub fn encode_public(key: &RsaPublicKey) -> Result<Vec<u8>> {
    let der = key
        .to_public_key_der()
        .map_err(|e| CryptoError::EncodingError(format!("SubjectPublicKeyInfo: {e}")))?;
    Ok(encode_pem(RSA_PUBLIC_LABEL, der.as_bytes()))
}

/// Parse a PEM private key in either PKCS#1 or PKCS#8 form.
pub fn decode_private(data: &[u8]) -> Result<RsaPrivateKey> {
    let (container, block) = open_envelope(data)?;
    let key = parse_private(container, &block);
    block.into_contents().zeroize();
    key
}

fn parse_private(container: Container, block: &pem::Pem) -> Result<RsaPrivateKey> {
    let der = block.contents();

    match container {
        Container::Pkcs1Private => RsaPrivateKey::from_pkcs1_der(der)
            .map_err(|e| CryptoError::MalformedKey(format!("PKCS#1 private key: {e}"))),
        Container::Pkcs8Private => {
            let info = PrivateKeyInfo::try_from(der)
                .map_err(|e| CryptoError::MalformedKey(format!("PKCS#8 private key: {e}")))?;
            if info.algorithm.oid != RSA_ENCRYPTION_OID {
                return Err(CryptoError::UnsupportedKeyType(format!(
                    "PKCS#8 algorithm {}",
                    info.algorithm.oid
                )));
            }
            RsaPrivateKey::from_pkcs8_der(der)
                .map_err(|e| CryptoError::MalformedKey(format!("PKCS#8 RSA private key: {e}")))
        }
        Container::EncryptedPkcs8Private => {
            tracing::warn!("rejecting encrypted PKCS#8 private key");
            Err(CryptoError::EncryptedContainerUnsupported)
        }
        Container::SpkiPublic | Container::Certificate => Err(CryptoError::UnknownContainerType(
            format!("{} is not a private key container", block.tag()),
        )),
        Container::Unknown(label) => Err(CryptoError::UnknownContainerType(label)),
    }
}

/// Parse a PEM public key (`RSA PUBLIC KEY` or `PUBLIC KEY`, SubjectPublicKeyInfo).
pub fn decode_public(data: &[u8]) -> Result<RsaPublicKey> {
    let (container, block) = open_envelope(data)?;
    let der = block.contents();

    match container {
        Container::SpkiPublic => {
            let spki = SubjectPublicKeyInfoRef::try_from(der)
                .map_err(|e| CryptoError::MalformedKey(format!("SubjectPublicKeyInfo: {e}")))?;
            if spki.algorithm.oid != RSA_ENCRYPTION_OID {
                return Err(CryptoError::UnsupportedKeyType(format!(
                    "public key algorithm {}",
                    spki.algorithm.oid
                )));
            }
            let key = RsaPublicKey::from_public_key_der(der)
                .map_err(|e| CryptoError::MalformedKey(format!("RSA public key: {e}")))?;
            tracing::debug!(bits = key.n().bits(), "decoded RSA public key");
            Ok(key)
        }
        Container::Pkcs1Private
        | Container::Pkcs8Private
        | Container::EncryptedPkcs8Private
        | Container::Certificate => Err(CryptoError::TypeMismatch {
            expected: "public key",
            found: block.tag().to_string(),
        }),
        Container::Unknown(label) => Err(CryptoError::UnknownContainerType(label)),
    }
}
