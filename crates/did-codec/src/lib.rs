//! A Decentralized Identifier (aka [DID][spec]), is a globally unique
//! identifier that provides a general purpose way of looking up public keys
//! associated with the globally unique identifier.
//!
//! This crate parses and formats DIDs of three methods, without resolving them
//! over the network:
//!
//! - [`did:key`](methods::key), which directly encodes a public key.
//! - [`did:plc`](methods::plc), a base32 identifier registered in the plc
//!   directory.
//! - [`did:web`](methods::web), a domain name and optional path, whose DID
//!   document is served over https.
//!
//! Every DID type implements [`FromStr`] for parsing and [`Display`] for
//! formatting into its canonical form. Parsing and then formatting a DID always
//! produces the string that was parsed (except that did:plc identifiers are
//! folded to lowercase), and formatting and then parsing always produces an
//! equal value.
//!
//! ```
//! use did_codec::methods::DidDyn;
//!
//! let did: DidDyn = "did:web:localhost%3A8080".parse().unwrap();
//! let web = did.as_web().unwrap();
//! assert_eq!(web.port(), Some(8080));
//! assert_eq!(did.to_string(), "did:web:localhost%3A8080");
//! ```
//!
//! [spec]: https://www.w3.org/TR/did-core/

#![forbid(unsafe_code)]

use std::{fmt::Display, str::FromStr};

#[cfg(feature = "ed25519")]
pub mod crypto;
pub mod host;
pub mod key_algos;
pub mod methods;
pub mod percent;
pub mod uri;

mod varint;

#[cfg(feature = "serde")]
mod serde_impls;

pub use crate::key_algos::KeyAlgo;
pub use crate::methods::{
	key::DidKey, plc::DidPlc, web::DidWeb, DidDyn, ParseError,
};
pub use crate::uri::DidMethod;
pub use crate::varint::DecodeError as VarintDecodeError;

/// Functionality common to every DID type.
pub trait Did: FromStr + Display {
	/// The method of the did.
	fn method(&self) -> DidMethod;
}

fn _assert_bounds(did: DidDyn) {
	fn helper(_did: impl std::fmt::Debug + Send + Sync + 'static) {}
	helper(did)
}
