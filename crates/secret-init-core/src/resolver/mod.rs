//! Reference parsing and environment snapshot helpers
//!
//! Shared by every provider backend so that all of them agree on what a
//! secret reference looks like and how resolved values are rendered.

mod reference;
mod environ;

pub use reference::{is_reference, parse_reference, SecretReference};
pub use environ::{
    merge_entries, render_entries, snapshot_from_entries, snapshot_from_pairs, EnvironError,
};
