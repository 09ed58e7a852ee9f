//! Secret provider implementations
//!
//! A provider resolves `<marker>:<key>` references in an environment
//! snapshot against its backing store.
//!
//! - `FileProvider`: flat `NAME=VALUE` secrets file (`file:` marker)
//! - `MemoryProvider`: in-memory store for tests and embedding
//!
//! Providers are created by name through the registry, so new backends
//! plug in with `register_provider`.

mod traits;
mod error;
mod substitute;
mod file;
mod memory;
mod registry;

pub use traits::Provider;
pub use error::{ProviderError, ProviderResult};
pub use file::{FileProvider, FILE_MARKER};
pub use memory::{MemoryProvider, MEMORY_MARKER};
pub use registry::{
    create_provider, has_provider, list_providers, register_provider, unregister_provider,
    ProviderDefinition, ProviderFactory,
};
