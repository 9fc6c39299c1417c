//! Conversions between DIDs and the public key types of cryptography crates.

// Re-exports
pub use ed25519_dalek;

pub mod ed25519;
