//! Provider error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while constructing a provider or resolving secrets
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The secrets file could not be opened or read
    #[error("Failed to read secrets file {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The secrets file contains a malformed line
    #[error("Malformed secrets file {} at line {line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A referenced secret is not present in the backing store
    #[error("Secret '{key}' referenced by {variable} not found")]
    SecretNotFound { key: String, variable: String },

    /// Resolution was cancelled before it started
    #[error("Secret resolution cancelled")]
    Cancelled,

    /// No provider is registered under this name
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// The provider is missing required configuration
    #[error("Provider configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    /// Create a file access error
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Create a secret not found error
    pub fn secret_not_found(key: impl Into<String>, variable: impl Into<String>) -> Self {
        Self::SecretNotFound {
            key: key.into(),
            variable: variable.into(),
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
