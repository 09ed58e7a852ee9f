//! Parser for flat `NAME=VALUE` secrets files
//!
//! Format rules:
//! - one secret per line, split at the first `=`
//! - everything after the first `=` is the value, further `=` included
//! - blank lines and lines starting with `#` are skipped
//! - `\r\n` line endings are accepted
//! - a line without `=` or with an empty name is an error

use thiserror::Error;

use super::mapping::SecretMapping;

/// A malformed line in a secrets file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    /// What is wrong with the line
    pub reason: String,
}

/// Parse the contents of a secrets file into a mapping
///
/// Parsing stops at the first malformed line; no partial mapping is
/// returned.
pub fn parse_secrets(contents: &str) -> Result<SecretMapping, ParseError> {
    let mut mapping = SecretMapping::new();

    for (index, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (name, value) = parse_line(raw).map_err(|reason| ParseError {
            line: index + 1,
            reason,
        })?;
        mapping.insert(name.to_string(), value.to_string());
    }

    Ok(mapping)
}

fn parse_line(line: &str) -> Result<(&str, &str), String> {
    let Some((name, value)) = line.split_once('=') else {
        return Err("missing '=' delimiter".to_string());
    };

    let name = name.trim();
    if name.is_empty() {
        return Err("empty secret name".to_string());
    }

    Ok((name, value))
}
