use thiserror::Error;

pub type Result<T> = std::result::Result<T, CryptoError>;

/// Failures reported by sealkit operations.
///
/// Decryption and authentication failures carry no cause so that callers
/// cannot tell a wrong key from tampered or corrupted input.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key generation failed: {0}")]
    KeyGen(String),

    #[error("malformed key: {0}")]
    MalformedKey(String),

    #[error("malformed signature: expected {expected} bytes, got {actual}")]
    MalformedSignature { expected: usize, actual: usize },

    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),

    #[error("unknown container type: {0}")]
    UnknownContainerType(String),

    #[error("password-encrypted key containers are not supported")]
    EncryptedContainerUnsupported,

    #[error("container holds {found}, expected {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("payload too large: {len} bytes (maximum {max})")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("decryption failed")]
    DecryptionFailed,

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("input too short: {len} bytes (minimum {min})")]
    InputTooShort { len: usize, min: usize },

    #[error("malformed password hash")]
    MalformedBlob,

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}
