//! secret-init core
//!
//! Runtime-agnostic secret resolution for process wrappers.
//! A provider takes an explicit environment snapshot, replaces values that
//! reference its backing store (e.g. `DB_PASSWORD=file:DB_PASSWORD`) and
//! returns the resolved `NAME=VALUE` entries. Applying them to a process is
//! left to the caller.
//!
//! ```rust,no_run
//! use secret_init_core::{CancellationToken, FileProvider, Provider};
//! use secret_init_core::resolver::snapshot_from_pairs;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = FileProvider::new("/run/secrets/app.env")?;
//! let environ = snapshot_from_pairs(std::env::vars());
//!
//! let entries = provider.load_secrets(&CancellationToken::new(), &environ).await?;
//! # Ok(())
//! # }
//! ```

pub mod types;
pub mod secrets;
pub mod resolver;
pub mod providers;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use types::CancellationToken;

pub use secrets::{parse_secrets, ParseError, SecretMapping};

pub use resolver::{is_reference, parse_reference, SecretReference, EnvironError};

pub use providers::{
    Provider, ProviderError, ProviderResult,
    FileProvider, MemoryProvider, FILE_MARKER, MEMORY_MARKER,
    create_provider, register_provider, list_providers,
};

pub use config::{SecretInitConfig, ConfigError, ConfigResult};

pub use logging::{Logger, NoOpLogger, TracingLogger, SharedLogger};
