//! Secret reference grammar
//!
//! A candidate value has the form `<marker>:<key>`, for example
//! `file:MYSQL_PASSWORD`. The marker names the provider and must match
//! exactly. An empty key (`file:`) refers to the variable's own name.

/// A parsed `<marker>:<key>` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretReference<'a> {
    /// Provider marker, without the trailing `:`
    pub marker: &'a str,
    /// Lookup key, trimmed; empty when the variable name should be used
    pub key: &'a str,
}

impl<'a> SecretReference<'a> {
    /// The key to look up for the variable `variable`
    pub fn resolve_key(&self, variable: &'a str) -> &'a str {
        if self.key.is_empty() {
            variable
        } else {
            self.key
        }
    }
}

/// Parse `value` as a reference for `marker`
///
/// Returns `None` for anything that is not a reference to this provider,
/// including references addressed to other markers.
pub fn parse_reference<'a>(marker: &'a str, value: &'a str) -> Option<SecretReference<'a>> {
    let rest = value.strip_prefix(marker)?;
    let key = rest.strip_prefix(':')?;
    Some(SecretReference {
        marker,
        key: key.trim(),
    })
}

/// Check if `value` is a reference for `marker`
pub fn is_reference(marker: &str, value: &str) -> bool {
    parse_reference(marker, value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_explicit_key() {
        let reference = parse_reference("file", "file:MYSQL_PASSWORD").unwrap();
        assert_eq!(reference.marker, "file");
        assert_eq!(reference.key, "MYSQL_PASSWORD");
        assert_eq!(reference.resolve_key("DB_PASS"), "MYSQL_PASSWORD");
    }

    #[test]
    fn test_parse_empty_key_uses_variable_name() {
        let reference = parse_reference("file", "file:").unwrap();
        assert_eq!(reference.key, "");
        assert_eq!(reference.resolve_key("MYSQL_PASSWORD"), "MYSQL_PASSWORD");
    }

    #[test]
    fn test_parse_trims_key() {
        let reference = parse_reference("file", "file: API_KEY ").unwrap();
        assert_eq!(reference.key, "API_KEY");
    }

    #[test]
    fn test_non_references() {
        assert!(!is_reference("file", "plain-value"));
        assert!(!is_reference("file", "file"));
        assert!(!is_reference("file", "filex:KEY"));
        assert!(!is_reference("file", "FILE:KEY"));
        assert!(!is_reference("file", "vault:secret/data/db"));
        assert!(!is_reference("file", " file:KEY"));
    }

    #[test]
    fn test_markers_are_independent() {
        assert!(is_reference("memory", "memory:KEY"));
        assert!(!is_reference("file", "memory:KEY"));
    }

    #[test]
    fn test_key_may_contain_colons() {
        let reference = parse_reference("file", "file:a:b").unwrap();
        assert_eq!(reference.key, "a:b");
    }
}
