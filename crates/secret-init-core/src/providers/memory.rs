//! In-memory secret provider

use std::collections::HashMap;

use async_trait::async_trait;

use super::error::{ProviderError, ProviderResult};
use super::substitute::substitute;
use super::traits::Provider;
use crate::secrets::SecretMapping;
use crate::types::CancellationToken;

/// Default marker for the in-memory provider
pub const MEMORY_MARKER: &str = "memory";

/// Provider holding its secrets in memory
///
/// Useful for tests, dry runs and for embedding secret-init in a host that
/// already has the secret material. Resolution follows the same rules as
/// the file provider.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use secret_init_core::MemoryProvider;
///
/// let mut secrets = HashMap::new();
/// secrets.insert("TOKEN".to_string(), "t0k3n".to_string());
///
/// let provider = MemoryProvider::with_secrets(secrets);
/// assert_eq!(provider.mapping().get("TOKEN"), Some("t0k3n"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryProvider {
    marker: String,
    mapping: SecretMapping,
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProvider {
    /// Create an empty memory provider
    pub fn new() -> Self {
        Self::with_mapping(SecretMapping::new())
    }

    /// Create a memory provider with initial values
    pub fn with_secrets(secrets: HashMap<String, String>) -> Self {
        Self::with_mapping(SecretMapping::from(secrets))
    }

    /// Create a memory provider around an existing mapping
    pub fn with_mapping(mapping: SecretMapping) -> Self {
        Self {
            marker: MEMORY_MARKER.to_string(),
            mapping,
        }
    }

    /// Use a different marker, e.g. to stand in for another backend in tests
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// The held secrets
    pub fn mapping(&self) -> &SecretMapping {
        &self.mapping
    }
}

#[async_trait]
impl Provider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn marker(&self) -> &str {
        &self.marker
    }

    fn duplicates(&self) -> &[String] {
        self.mapping.duplicates()
    }

    async fn load_secrets(
        &self,
        cancel: &CancellationToken,
        environ: &HashMap<String, String>,
    ) -> ProviderResult<Vec<String>> {
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }
        substitute(&self.marker, &self.mapping, environ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::snapshot_from_pairs;

    #[tokio::test]
    async fn test_memory_provider_resolves() {
        let mut secrets = HashMap::new();
        secrets.insert("TOKEN".to_string(), "t0k3n".to_string());
        let provider = MemoryProvider::with_secrets(secrets);

        let environ = snapshot_from_pairs(vec![("API_TOKEN", "memory:TOKEN"), ("LANG", "C")]);
        let entries = provider
            .load_secrets(&CancellationToken::new(), &environ)
            .await
            .unwrap();

        assert_eq!(entries, vec!["API_TOKEN=t0k3n", "LANG=C"]);
    }

    #[tokio::test]
    async fn test_memory_provider_custom_marker() {
        let mut secrets = HashMap::new();
        secrets.insert("db".to_string(), "pw".to_string());
        let provider = MemoryProvider::with_secrets(secrets).with_marker("vault");

        assert_eq!(provider.marker(), "vault");

        let environ = snapshot_from_pairs(vec![("DB", "vault:db"), ("X", "memory:db")]);
        let entries = provider
            .load_secrets(&CancellationToken::new(), &environ)
            .await
            .unwrap();

        assert_eq!(entries, vec!["DB=pw", "X=memory:db"]);
    }

    #[tokio::test]
    async fn test_empty_memory_provider_passes_through() {
        let provider = MemoryProvider::new();
        let environ = snapshot_from_pairs(vec![("PATH", "/usr/bin")]);

        let entries = provider
            .load_secrets(&CancellationToken::new(), &environ)
            .await
            .unwrap();
        assert_eq!(entries, vec!["PATH=/usr/bin"]);
    }
}
