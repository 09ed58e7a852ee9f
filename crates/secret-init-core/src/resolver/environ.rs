//! Environment snapshots and `NAME=VALUE` entries

use std::collections::HashMap;

use thiserror::Error;

/// A malformed `NAME=VALUE` entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvironError {
    #[error("Environment entry has no '=': {0}")]
    MissingDelimiter(String),

    #[error("Environment entry has an empty name")]
    EmptyName,
}

/// Build a snapshot from `(name, value)` pairs, e.g. `std::env::vars()`
pub fn snapshot_from_pairs<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}

/// Parse `NAME=VALUE` entries into a snapshot, splitting at the first `=`
///
/// Later entries override earlier ones with the same name.
pub fn snapshot_from_entries<S: AsRef<str>>(
    entries: &[S],
) -> Result<HashMap<String, String>, EnvironError> {
    let mut snapshot = HashMap::with_capacity(entries.len());
    for entry in entries {
        let entry = entry.as_ref();
        let (name, value) = entry
            .split_once('=')
            .ok_or_else(|| EnvironError::MissingDelimiter(entry.to_string()))?;
        if name.is_empty() {
            return Err(EnvironError::EmptyName);
        }
        snapshot.insert(name.to_string(), value.to_string());
    }
    Ok(snapshot)
}

/// Render a snapshot as `NAME=VALUE` entries sorted by name
pub fn render_entries(snapshot: &HashMap<String, String>) -> Vec<String> {
    let mut names: Vec<&String> = snapshot.keys().collect();
    names.sort_unstable();
    names
        .into_iter()
        .map(|name| format!("{}={}", name, snapshot[name]))
        .collect()
}

/// Overlay resolved entries on top of a base snapshot
///
/// Names present in `resolved` replace the base value; everything else in
/// `base` is kept.
pub fn merge_entries<S: AsRef<str>>(
    base: &HashMap<String, String>,
    resolved: &[S],
) -> Result<HashMap<String, String>, EnvironError> {
    let mut merged = base.clone();
    merged.extend(snapshot_from_entries(resolved)?);
    Ok(merged)
}
