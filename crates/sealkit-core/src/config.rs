use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level toolkit configuration (loaded from sealkit.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SealkitConfig {
    pub keys: KeyConfig,
    pub password: PasswordConfig,
    pub log: LogConfig,
}

/// RSA key generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Modulus size used when the caller does not ask for one (default: 2048)
    pub default_bits: usize,
    /// Smallest modulus accepted by key generation (never below 2048)
    pub min_bits: usize,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            default_bits: 2048,
            min_bits: 2048,
        }
    }
}

/// Password hashing cost parameters (Argon2id)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// Memory cost in KiB (default: 19456 = 19 MiB)
    pub mem_cost_kib: u32,
    /// Time cost / iterations (default: 2)
    pub time_cost: u32,
    /// Parallelism (default: 1)
    pub parallelism: u32,
    /// Longest password accepted, in bytes (default: 4096)
    pub max_input_len: usize,
    /// Highest memory cost a stored hash may ask for at verification,
    /// in KiB (default: 262144 = 256 MiB)
    pub max_mem_cost_kib: u32,
    /// Highest time cost a stored hash may ask for (default: 16)
    pub max_time_cost: u32,
    /// Highest parallelism a stored hash may ask for (default: 16)
    pub max_parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            mem_cost_kib: 19456,
            time_cost: 2,
            parallelism: 1,
            max_input_len: 4096,
            max_mem_cost_kib: 262144,
            max_time_cost: 16,
            max_parallelism: 16,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level or EnvFilter directive (default: info)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

/// Load configuration from a TOML file.
///
/// A missing file is not an error: defaults are returned and a warning is
/// logged. Unreadable or unparseable files are.
pub fn load_config(path: &Path) -> anyhow::Result<SealkitConfig> {
    if !path.exists() {
        tracing::warn!("config file not found: {}  (using defaults)", path.display());
        return Ok(SealkitConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}
