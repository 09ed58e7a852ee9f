//! Reference substitution shared by mapping-backed providers

use std::collections::HashMap;

use super::error::{ProviderError, ProviderResult};
use crate::resolver::parse_reference;
use crate::secrets::SecretMapping;

/// Replace every `<marker>:<key>` value in `environ` with its secret
///
/// Variables are visited in name order so the first missing key reported
/// is deterministic.
pub(crate) fn substitute(
    marker: &str,
    mapping: &SecretMapping,
    environ: &HashMap<String, String>,
) -> ProviderResult<Vec<String>> {
    let mut names: Vec<&String> = environ.keys().collect();
    names.sort_unstable();

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        let value = &environ[name];
        let resolved = match parse_reference(marker, value) {
            Some(reference) => {
                let key = reference.resolve_key(name);
                mapping
                    .get(key)
                    .ok_or_else(|| ProviderError::secret_not_found(key, name.as_str()))?
            }
            None => value.as_str(),
        };
        entries.push(format!("{}={}", name, resolved));
    }

    Ok(entries)
}
