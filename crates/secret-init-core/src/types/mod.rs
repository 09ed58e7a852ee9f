//! Shared types used across providers

mod cancellation;

pub use cancellation::CancellationToken;
