pub mod key;
pub mod plc;
pub mod web;

use std::{fmt::Display, str::FromStr};

use tracing::{debug, trace};

use crate::{
	uri::{self, DidMethod, DidUri},
	Did,
};

use self::{key::DidKey, plc::DidPlc, web::DidWeb};

/// Dynamically typed did method.
///
/// ```
/// use did_codec::methods::DidDyn;
///
/// let did: DidDyn = "did:web:example.com:users:alice".parse().unwrap();
/// assert_eq!(did.as_web().unwrap().path(), ["users", "alice"]);
/// assert_eq!(did.to_string(), "did:web:example.com:users:alice");
/// ```
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
#[non_exhaustive]
pub enum DidDyn {
	Key(DidKey),
	Plc(DidPlc),
	Web(DidWeb),
}

impl DidDyn {
	pub fn as_key(&self) -> Option<&DidKey> {
		match self {
			Self::Key(did) => Some(did),
			_ => None,
		}
	}

	pub fn as_plc(&self) -> Option<&DidPlc> {
		match self {
			Self::Plc(did) => Some(did),
			_ => None,
		}
	}

	pub fn as_web(&self) -> Option<&DidWeb> {
		match self {
			Self::Web(did) => Some(did),
			_ => None,
		}
	}
}

impl FromStr for DidDyn {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let result = dispatch(s);
		if let Err(ref err) = result {
			debug!(did = s, %err, "rejected did");
		}
		result
	}
}

fn dispatch(s: &str) -> Result<DidDyn, ParseError> {
	let uri = DidUri::parse(s)?;
	trace!(method = %uri.method(), "dispatching did");
	// The method codecs check their own prefix, so they get the whole string.
	Ok(match uri.method() {
		DidMethod::Key => DidDyn::Key(DidKey::from_str(s)?),
		DidMethod::Plc => DidDyn::Plc(DidPlc::from_str(s)?),
		DidMethod::Web => DidDyn::Web(DidWeb::from_str(s)?),
	})
}

impl TryFrom<String> for DidDyn {
	type Error = ParseError;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		Self::from_str(&s)
	}
}

impl Display for DidDyn {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Key(did) => did.fmt(f),
			Self::Plc(did) => did.fmt(f),
			Self::Web(did) => did.fmt(f),
		}
	}
}

impl Did for DidDyn {
	fn method(&self) -> DidMethod {
		match self {
			Self::Key(did) => did.method(),
			Self::Plc(did) => did.method(),
			Self::Web(did) => did.method(),
		}
	}
}

impl From<DidKey> for DidDyn {
	fn from(value: DidKey) -> Self {
		Self::Key(value)
	}
}

impl From<DidPlc> for DidDyn {
	fn from(value: DidPlc) -> Self {
		Self::Plc(value)
	}
}

impl From<DidWeb> for DidDyn {
	fn from(value: DidWeb) -> Self {
		Self::Web(value)
	}
}

/// Any error from parsing a [`DidDyn`].
#[derive(thiserror::Error, Debug, Eq, PartialEq, Clone)]
pub enum ParseError {
	#[error(transparent)]
	Uri(#[from] uri::ParseError),
	#[error("invalid did:key: {0}")]
	Key(#[from] key::ParseError),
	#[error("invalid did:plc: {0}")]
	Plc(#[from] plc::ParseError),
	#[error("invalid did:web: {0}")]
	Web(#[from] web::ParseError),
}

impl ParseError {
	/// Whether the string wasn't shaped like `did:<method>:<id>` at all.
	pub fn is_malformed(&self) -> bool {
		matches!(self, Self::Uri(uri::ParseError::Malformed(_)))
	}

	pub fn is_unsupported_method(&self) -> bool {
		matches!(self, Self::Uri(uri::ParseError::UnsupportedMethod(_)))
	}
}

#[cfg(test)]
mod test {
	use super::*;

	use eyre::WrapErr;
	use itertools::Itertools;

	use crate::key_algos::KeyAlgo;

	fn examples() -> Vec<DidDyn> {
		vec![
			DidKey::from_pub_key(KeyAlgo::Ed25519, vec![7u8; 32])
				.unwrap()
				.into(),
			DidKey::from_pub_key(KeyAlgo::Secp256k1, vec![2u8; 33])
				.unwrap()
				.into(),
			DidKey::from_pub_key(KeyAlgo::P256, vec![3u8; 33])
				.unwrap()
				.into(),
			DidPlc::from_identifier("yk4dd2qkboz2yv6tpubpc6co")
				.unwrap()
				.into(),
			DidWeb::from_host_and_path("example.com", Vec::<String>::new())
				.unwrap()
				.into(),
			DidWeb::from_host_and_path("localhost:8080", ["a b", "c"])
				.unwrap()
				.into(),
		]
	}

	#[test]
	fn test_roundtrip() -> eyre::Result<()> {
		for did in examples() {
			let text = did.to_string();
			let parsed = DidDyn::from_str(&text)
				.wrap_err_with(|| format!("failed to parse {text}"))?;
			assert_eq!(parsed, did);
			assert_eq!(parsed.to_string(), text);
		}
		Ok(())
	}

	#[test]
	fn test_equality_across_variants() {
		for (a, b) in examples().iter().tuple_combinations() {
			assert_ne!(a, b, "{a} and {b} should be distinct");
		}
	}

	#[test]
	fn test_method() {
		let methods: Vec<DidMethod> = examples().iter().map(Did::method).collect();
		assert_eq!(
			methods,
			[
				DidMethod::Key,
				DidMethod::Key,
				DidMethod::Key,
				DidMethod::Plc,
				DidMethod::Web,
				DidMethod::Web,
			]
		);
	}

	#[test]
	fn test_plc_equality_is_case_insensitive() -> eyre::Result<()> {
		let upper = DidDyn::from_str("did:plc:YK4DD2QKBOZ2YV6TPUBPC6CO")?;
		let lower = DidDyn::from_str("did:plc:yk4dd2qkboz2yv6tpubpc6co")?;
		assert_eq!(upper, lower);
		assert_eq!(upper.to_string(), "did:plc:yk4dd2qkboz2yv6tpubpc6co");
		Ok(())
	}

	#[test]
	fn test_malformed_and_unsupported() {
		for s in ["did:", "", "not-a-did", "did:key"] {
			let err = DidDyn::from_str(s).unwrap_err();
			assert!(err.is_malformed(), "{s:?} gave {err:?}");
		}
		for s in ["did:unsupported:123", "did::abc"] {
			let err = DidDyn::from_str(s).unwrap_err();
			assert!(err.is_unsupported_method(), "{s:?} gave {err:?}");
		}
		let err = DidDyn::from_str("did:unsupported:123").unwrap_err();
		assert_eq!(
			err,
			ParseError::Uri(uri::ParseError::UnsupportedMethod("unsupported".to_owned()))
		);
	}

	#[test]
	fn test_method_errors_propagate() {
		assert_eq!(
			DidDyn::from_str("did:key:"),
			Err(ParseError::Key(key::ParseError::EmptyIdentifier))
		);
		assert_eq!(
			DidDyn::from_str("did:plc:abc"),
			Err(ParseError::Plc(plc::ParseError::TooShort { min: 4, actual: 3 }))
		);
		assert_eq!(
			DidDyn::from_str("did:web:"),
			Err(ParseError::Web(web::ParseError::EmptyIdentifier))
		);
		// Embedded colons reach the method codec untouched.
		assert_eq!(
			DidDyn::from_str("did:plc:abcd:efgh"),
			Err(ParseError::Plc(plc::ParseError::InvalidCharacter(':')))
		);
	}

	#[test]
	fn test_try_from_string() -> eyre::Result<()> {
		let s = String::from("did:web:example.com");
		let did = DidDyn::try_from(s)?;
		assert!(did.as_web().is_some());
		assert!(did.as_key().is_none());
		assert!(did.as_plc().is_none());
		Ok(())
	}
}
