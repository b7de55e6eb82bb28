//! sealkit-core: configuration schema and logging setup shared by the
//! sealkit crates.

pub mod config;
pub mod logging;

pub use config::{load_config, KeyConfig, LogConfig, PasswordConfig, SealkitConfig};
pub use logging::init_logging;
