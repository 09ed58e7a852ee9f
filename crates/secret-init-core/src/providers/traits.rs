//! Provider trait definition

use std::collections::HashMap;

use async_trait::async_trait;

use super::error::ProviderResult;
use crate::types::CancellationToken;

/// A backend that resolves secret references in an environment snapshot
///
/// Each backend recognises values carrying its own marker (for example
/// `file:DB_PASSWORD`) and replaces them with the secret from its store.
/// Values that are not references to this backend pass through unchanged.
///
/// Implementations must not touch the process environment: the caller
/// decides how to apply the returned entries.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Registry name of the provider (e.g. "file")
    fn name(&self) -> &str;

    /// Marker that introduces a reference to this provider (e.g. "file")
    fn marker(&self) -> &str;

    /// Secret names defined more than once in the backing store
    ///
    /// The last definition wins; callers use this to warn at startup.
    fn duplicates(&self) -> &[String] {
        &[]
    }

    /// Resolve every reference in `environ`
    ///
    /// Returns one `NAME=VALUE` entry per input variable, sorted by name.
    /// Fails as a whole if any referenced secret is missing, or if `cancel`
    /// has already been triggered.
    async fn load_secrets(
        &self,
        cancel: &CancellationToken,
        environ: &HashMap<String, String>,
    ) -> ProviderResult<Vec<String>>;
}
