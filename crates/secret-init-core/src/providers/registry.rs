//! Provider registry for creating providers by name

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::error::{ProviderError, ProviderResult};
use super::file::FileProvider;
use super::memory::MemoryProvider;
use super::traits::Provider;
use crate::config::SecretInitConfig;

/// Factory function type for creating providers from settings
pub type ProviderFactory =
    Box<dyn Fn(&SecretInitConfig) -> ProviderResult<Arc<dyn Provider>> + Send + Sync>;

/// Definition of a registered provider
pub struct ProviderDefinition {
    /// Unique name for this provider
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function to create instances
    pub factory: ProviderFactory,
}

impl std::fmt::Debug for ProviderDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

fn create_file_provider(config: &SecretInitConfig) -> ProviderResult<Arc<dyn Provider>> {
    let path = config.secrets_file_path.as_ref().ok_or_else(|| {
        ProviderError::Config("the file provider requires a secrets file path".to_string())
    })?;
    Ok(Arc::new(FileProvider::new(path)?))
}

fn create_memory_provider(_config: &SecretInitConfig) -> ProviderResult<Arc<dyn Provider>> {
    Ok(Arc::new(MemoryProvider::new()))
}

/// Global registry of providers
static REGISTRY: Lazy<RwLock<HashMap<String, ProviderDefinition>>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert(
        "file".to_string(),
        ProviderDefinition {
            name: "file".to_string(),
            description: "Resolve file: references from a local NAME=VALUE secrets file".to_string(),
            factory: Box::new(create_file_provider),
        },
    );

    map.insert(
        "memory".to_string(),
        ProviderDefinition {
            name: "memory".to_string(),
            description: "Empty in-memory store, passes the environment through".to_string(),
            factory: Box::new(create_memory_provider),
        },
    );

    RwLock::new(map)
});

/// Register a provider type, replacing any previous one with the same name
///
/// Names are case-insensitive: `"Vault"` and `"vault"` refer to the same
/// entry. The name as given is kept for `list_providers`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use secret_init_core::providers::{register_provider, MemoryProvider, Provider, ProviderResult};
/// use secret_init_core::SecretInitConfig;
///
/// register_provider(
///     "vault",
///     "Stand-in vault backend",
///     Box::new(|_: &SecretInitConfig| -> ProviderResult<Arc<dyn Provider>> {
///         Ok(Arc::new(MemoryProvider::new().with_marker("vault")))
///     }),
/// );
/// ```
pub fn register_provider(name: &str, description: &str, factory: ProviderFactory) {
    let mut registry = REGISTRY.write();
    registry.insert(
        name.to_lowercase(),
        ProviderDefinition {
            name: name.to_string(),
            description: description.to_string(),
            factory,
        },
    );
}

/// Create a provider by name
///
/// Names are matched case-insensitively. Fails with
/// `ProviderError::UnknownProvider` if nothing is registered under `name`,
/// or with the factory's own error (e.g. `FileAccess`).
pub fn create_provider(name: &str, config: &SecretInitConfig) -> ProviderResult<Arc<dyn Provider>> {
    let registry = REGISTRY.read();
    let definition = registry
        .get(&name.to_lowercase())
        .ok_or_else(|| ProviderError::UnknownProvider(name.to_string()))?;
    (definition.factory)(config)
}

/// List all registered providers as (name, description) pairs, sorted by name
pub fn list_providers() -> Vec<(String, String)> {
    let registry = REGISTRY.read();
    let mut providers: Vec<_> = registry
        .values()
        .map(|def| (def.name.clone(), def.description.clone()))
        .collect();
    providers.sort();
    providers
}

/// Check if a provider is registered
pub fn has_provider(name: &str) -> bool {
    REGISTRY.read().contains_key(&name.to_lowercase())
}

/// Unregister a provider (mainly for testing)
pub fn unregister_provider(name: &str) -> bool {
    REGISTRY.write().remove(&name.to_lowercase()).is_some()
}
