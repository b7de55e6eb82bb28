//! Password hashing for credential storage (Argon2id)
//!
//! Hashes are PHC strings, e.g.
//! `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`, so the algorithm, cost
//! parameters and the random salt travel with the hash. Verification reads
//! them back from the string, which means cost parameters can be raised
//! without invalidating stored hashes. Stored costs above the hasher's
//! ceiling are refused before any memory is allocated for them.

use argon2::password_hash::{
    Error as PhcError, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version, ARGON2ID_IDENT};
use rand::{CryptoRng, RngCore};
use sealkit_core::config::PasswordConfig;

use crate::error::{CryptoError, Result};

/// Outcome of checking a password against a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerdict {
    Match,
    Mismatch,
}

impl PasswordVerdict {
    pub fn is_match(self) -> bool {
        self == PasswordVerdict::Match
    }
}

/// Highest Argon2 costs a stored hash may carry.
#[derive(Debug, Clone, Copy)]
struct CostCeiling {
    m_cost: u32,
    t_cost: u32,
    p_cost: u32,
}

impl CostCeiling {
    /// Configured ceiling, raised where needed so the hasher's own output
    /// always verifies.
    fn new(config: &PasswordConfig, own: &Params) -> Self {
        Self {
            m_cost: config.max_mem_cost_kib.max(own.m_cost()),
            t_cost: config.max_time_cost.max(own.t_cost()),
            p_cost: config.max_parallelism.max(own.p_cost()),
        }
    }

    fn admits(&self, params: &Params) -> bool {
        params.m_cost() <= self.m_cost
            && params.t_cost() <= self.t_cost
            && params.p_cost() <= self.p_cost
    }
}

/// Argon2id hasher with fixed cost parameters.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    ceiling: CostCeiling,
    max_input_len: usize,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        let config = PasswordConfig::default();
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT),
            ceiling: CostCeiling::new(&config, &Params::DEFAULT),
            max_input_len: config.max_input_len,
        }
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self.argon2.params();
        f.debug_struct("PasswordHasher")
            .field("m_cost", &params.m_cost())
            .field("t_cost", &params.t_cost())
            .field("p_cost", &params.p_cost())
            .field("ceiling", &self.ceiling)
            .field("max_input_len", &self.max_input_len)
            .finish()
    }
}

impl PasswordHasher {
    pub fn from_config(config: &PasswordConfig) -> Result<Self> {
        let params = Params::new(
            config.mem_cost_kib,
            config.time_cost,
            config.parallelism,
            None,
        )
        .map_err(|e| CryptoError::InvalidParameters(format!("Argon2id params: {e}")))?;

        if config.max_input_len == 0 {
            return Err(CryptoError::InvalidParameters(
                "max_input_len must be at least 1".into(),
            ));
        }

        Ok(Self {
            ceiling: CostCeiling::new(config, &params),
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            max_input_len: config.max_input_len,
        })
    }

    /// Hash `password` with a fresh salt from the thread-local CSPRNG.
    pub fn hash(&self, password: &str) -> Result<String> {
        self.hash_with_rng(&mut rand::thread_rng(), password)
    }

    /// Hash `password` with a salt drawn from `rng`.
    pub fn hash_with_rng<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        password: &str,
    ) -> Result<String> {
        if password.len() > self.max_input_len {
            return Err(CryptoError::EncodingError(format!(
                "password is {} bytes (maximum {})",
                password.len(),
                self.max_input_len
            )));
        }

        let salt = SaltString::generate(rng);
        let phc = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CryptoError::EncodingError(format!("Argon2id hashing failed: {e}")))?;

        tracing::debug!(
            m_cost = self.argon2.params().m_cost(),
            t_cost = self.argon2.params().t_cost(),
            "hashed password"
        );
        Ok(phc.to_string())
    }

    /// Check `password` against a PHC string produced by [`PasswordHasher::hash`].
    ///
    /// The cost parameters embedded in `blob` are used, not this hasher's.
    /// Blobs that are not Argon2id, or whose costs exceed the configured
    /// ceiling, are [`CryptoError::MalformedBlob`]. The input length limit
    /// applies to hashing only.
    pub fn verify(&self, blob: &str, password: &str) -> Result<PasswordVerdict> {
        let parsed = PasswordHash::new(blob).map_err(|_| CryptoError::MalformedBlob)?;
        if parsed.algorithm != ARGON2ID_IDENT || parsed.salt.is_none() || parsed.hash.is_none() {
            return Err(CryptoError::MalformedBlob);
        }

        let params = Params::try_from(&parsed).map_err(|_| CryptoError::MalformedBlob)?;
        if !self.ceiling.admits(&params) {
            tracing::warn!(
                m_cost = params.m_cost(),
                t_cost = params.t_cost(),
                p_cost = params.p_cost(),
                "stored password hash exceeds cost ceiling"
            );
            return Err(CryptoError::MalformedBlob);
        }

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(PasswordVerdict::Match),
            Err(PhcError::Password) => Ok(PasswordVerdict::Mismatch),
            Err(_) => Err(CryptoError::MalformedBlob),
        }
    }
}

/// Hash a password with the default Argon2id cost parameters.
pub fn hash_password(password: &str) -> Result<String> {
    PasswordHasher::default().hash(password)
}

/// Verify a password against a stored hash.
pub fn verify_password(blob: &str, password: &str) -> Result<PasswordVerdict> {
    PasswordHasher::default().verify(blob, password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::from_config(&PasswordConfig {
            mem_cost_kib: 1024,
            time_cost: 1,
            parallelism: 1,
            max_input_len: 64,
            ..PasswordConfig::default()
        })
        .unwrap()
    }

    // 32-byte zero hash, 16-byte salt
    const ZERO_HASH: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
    const SALT: &str = "c2FsdHNhbHRzYWx0c2FsdA";

    #[test]
    fn test_hash_verify_roundtrip() {
        let hasher = fast_hasher();
        let blob = hasher.hash("hunter2").unwrap();

        assert!(blob.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
        assert_eq!(hasher.verify(&blob, "hunter2").unwrap(), PasswordVerdict::Match);
        assert_eq!(hasher.verify(&blob, "hunter3").unwrap(), PasswordVerdict::Mismatch);
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = fast_hasher();
        let a = hasher.hash("same password").unwrap();
        let b = hasher.hash("same password").unwrap();

        assert_ne!(a, b, "fresh salt must make hashes differ");
        assert!(hasher.verify(&a, "same password").unwrap().is_match());
        assert!(hasher.verify(&b, "same password").unwrap().is_match());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let hasher = fast_hasher();
        let a = hasher
            .hash_with_rng(&mut StdRng::seed_from_u64(7), "pw")
            .unwrap();
        let b = hasher
            .hash_with_rng(&mut StdRng::seed_from_u64(7), "pw")
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_verify_uses_embedded_params() {
        let blob = fast_hasher().hash("pw").unwrap();
        // Default hasher has different costs but must still accept it
        assert!(verify_password(&blob, "pw").unwrap().is_match());
    }

    #[test]
    fn test_default_free_functions() {
        let blob = hash_password("correct horse battery staple").unwrap();
        assert!(blob.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
        assert!(verify_password(&blob, "correct horse battery staple")
            .unwrap()
            .is_match());
        assert_eq!(
            verify_password(&blob, "Correct horse battery staple").unwrap(),
            PasswordVerdict::Mismatch
        );
    }

    #[test]
    fn test_empty_password() {
        let hasher = fast_hasher();
        let blob = hasher.hash("").unwrap();
        assert!(hasher.verify(&blob, "").unwrap().is_match());
        assert!(!hasher.verify(&blob, " ").unwrap().is_match());
    }

    #[test]
    fn test_too_long_password() {
        let hasher = fast_hasher();
        let long = "x".repeat(65);

        assert!(matches!(
            hasher.hash(&long),
            Err(CryptoError::EncodingError(_))
        ));

        let blob = hasher.hash("x").unwrap();
        assert_eq!(hasher.verify(&blob, &long).unwrap(), PasswordVerdict::Mismatch);
    }

    #[test]
    fn test_long_password_verifies_under_default_limit() {
        let hasher = PasswordHasher::from_config(&PasswordConfig {
            mem_cost_kib: 1024,
            time_cost: 1,
            parallelism: 1,
            max_input_len: 8192,
            ..PasswordConfig::default()
        })
        .unwrap();
        let long = "p".repeat(5000);
        let blob = hasher.hash(&long).unwrap();

        assert!(hasher.verify(&blob, &long).unwrap().is_match());
        // Default limit is 4096, but the limit only gates hashing
        assert_eq!(verify_password(&blob, &long).unwrap(), PasswordVerdict::Match);
        assert_eq!(
            verify_password(&blob, &long[..4999]).unwrap(),
            PasswordVerdict::Mismatch
        );
    }

    #[test]
    fn test_hostile_cost_params_rejected() {
        let hostile = [
            format!("$argon2id$v=19$m=4294967295,t=1,p=1${SALT}${ZERO_HASH}"),
            format!("$argon2id$v=19$m=1024,t=4294967295,p=1${SALT}${ZERO_HASH}"),
            format!("$argon2id$v=19$m=8192,t=1,p=1024${SALT}${ZERO_HASH}"),
        ];
        for blob in &hostile {
            assert!(
                matches!(verify_password(blob, "pw"), Err(CryptoError::MalformedBlob)),
                "expected MalformedBlob for {blob}"
            );
        }
    }

    #[test]
    fn test_ceiling_follows_config() {
        let blob = fast_hasher().hash("pw").unwrap();
        let strict = PasswordHasher::from_config(&PasswordConfig {
            mem_cost_kib: 8,
            time_cost: 1,
            parallelism: 1,
            max_mem_cost_kib: 512,
            ..PasswordConfig::default()
        })
        .unwrap();

        // m=1024 is above a 512 KiB ceiling
        assert!(matches!(strict.verify(&blob, "pw"), Err(CryptoError::MalformedBlob)));
        // Own hashes always verify, whatever the configured ceiling
        let own = strict.hash("pw").unwrap();
        assert!(strict.verify(&own, "pw").unwrap().is_match());
    }

    #[test]
    fn test_other_argon2_variants_rejected() {
        for alg in ["argon2i", "argon2d"] {
            let blob = format!("${alg}$v=19$m=1024,t=1,p=1${SALT}${ZERO_HASH}");
            assert!(
                matches!(verify_password(&blob, "pw"), Err(CryptoError::MalformedBlob)),
                "expected MalformedBlob for {blob}"
            );
        }
    }

    #[test]
    fn test_malformed_blob() {
        let hasher = fast_hasher();
        for blob in ["", "not a hash", "$argon2id$v=19$m=1024", "$2a$10$abcdefghijklmnopqrstuv"] {
            assert!(
                matches!(hasher.verify(blob, "pw"), Err(CryptoError::MalformedBlob)),
                "expected MalformedBlob for {blob:?}"
            );
        }
    }

    #[test]
    fn test_invalid_params() {
        let result = PasswordHasher::from_config(&PasswordConfig {
            mem_cost_kib: 1,
            ..PasswordConfig::default()
        });
        assert!(matches!(result, Err(CryptoError::InvalidParameters(_))));

        let result = PasswordHasher::from_config(&PasswordConfig {
            max_input_len: 0,
            ..PasswordConfig::default()
        });
        assert!(matches!(result, Err(CryptoError::InvalidParameters(_))));
    }
}
