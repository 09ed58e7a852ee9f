//! Immutable name → value mapping of secrets

use std::collections::HashMap;

/// Secrets loaded from a backing store
///
/// Built once and never mutated afterwards. When the same name is inserted
/// more than once the last value wins and the name is recorded in
/// [`SecretMapping::duplicates`] so callers can warn about it.
///
/// The `Debug` output lists names only, never values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretMapping {
    secrets: HashMap<String, String>,
    duplicates: Vec<String>,
}

impl SecretMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: String, value: String) {
        if self.secrets.insert(name.clone(), value).is_some() && !self.duplicates.contains(&name) {
            self.duplicates.push(name);
        }
    }

    /// Look up a secret by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.secrets.get(name).map(String::as_str)
    }

    /// Check if a secret exists
    pub fn contains(&self, name: &str) -> bool {
        self.secrets.contains_key(name)
    }

    /// Number of distinct secret names
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// Check if the mapping holds no secrets
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Secret names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.secrets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names that were defined more than once, in first-seen order
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}

impl FromIterator<(String, String)> for SecretMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (name, value) in iter {
            mapping.insert(name, value);
        }
        mapping
    }
}

impl From<HashMap<String, String>> for SecretMapping {
    fn from(secrets: HashMap<String, String>) -> Self {
        Self {
            secrets,
            duplicates: Vec::new(),
        }
    }
}

impl std::fmt::Debug for SecretMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretMapping")
            .field("names", &self.names())
            .field("duplicates", &self.duplicates)
            .finish()
    }
}
