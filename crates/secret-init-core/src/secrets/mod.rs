//! Secret material loaded from a backing store
//!
//! - `SecretMapping`: immutable name → value map owned by a provider
//! - `parse_secrets`: parser for flat `NAME=VALUE` secrets files

mod mapping;
mod parser;

pub use mapping::SecretMapping;
pub use parser::{parse_secrets, ParseError};
