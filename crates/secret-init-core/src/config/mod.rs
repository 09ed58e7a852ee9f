//! Configuration for secret-init
//!
//! `SecretInitConfig` is read from a YAML file and overlaid with
//! environment variables taken from an explicit snapshot.

mod error;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use settings::{
    SecretInitConfig, ENV_DAEMON, ENV_DELAY, ENV_JSON_LOG, ENV_LOG_LEVEL, ENV_PROVIDER,
    ENV_SECRETS_FILE_PATH,
};
