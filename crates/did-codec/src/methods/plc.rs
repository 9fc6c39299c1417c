//! An implementation of the [did:plc] method.
//!
//! Identifiers are base32 (`a-z`, `2-7`) and case-insensitive. They are always
//! stored in their canonical lowercase form.
//!
//! [did:plc]: https://web.plc.directory/spec/v0.1/did-plc

use std::{fmt::Display, hash::Hash, str::FromStr};

use crate::{uri::DidMethod, Did};

/// Length bounds that an identifier must satisfy.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub struct PlcIdPolicy {
	pub min_len: usize,
	pub max_len: usize,
}

impl PlcIdPolicy {
	/// The loose bounds of the identifier format. This is the default.
	pub const FORMAT: Self = Self {
		min_len: DidPlc::MIN_ID_LEN,
		max_len: DidPlc::MAX_ID_LEN,
	};
	/// Only identifiers of the exact length that the plc directory issues.
	pub const CANONICAL: Self = Self {
		min_len: DidPlc::CANONICAL_ID_LEN,
		max_len: DidPlc::CANONICAL_ID_LEN,
	};
}

impl Default for PlcIdPolicy {
	fn default() -> Self {
		Self::FORMAT
	}
}

/// An implementation of the `did:plc` method. See the [module](self) docs for more
/// info.
#[derive(Debug, Clone)]
pub struct DidPlc {
	/// Always lowercase when constructed by this crate.
	id: String,
}

impl DidPlc {
	pub const PREFIX: &'static str = "did:plc:";
	pub const MIN_ID_LEN: usize = 4;
	pub const MAX_ID_LEN: usize = 64;
	pub const CANONICAL_ID_LEN: usize = 24;

	/// Creates a `did:plc` from the identifier (everything after `did:plc:`),
	/// using [`PlcIdPolicy::default`].
	pub fn from_identifier(id: &str) -> Result<Self, ParseError> {
		Self::from_identifier_with_policy(id, &PlcIdPolicy::default())
	}

	pub fn from_identifier_with_policy(
		id: &str,
		policy: &PlcIdPolicy,
	) -> Result<Self, ParseError> {
		if id.is_empty() {
			return Err(ParseError::EmptyIdentifier);
		}
		let len = id.chars().count();
		if len < policy.min_len {
			return Err(ParseError::TooShort {
				min: policy.min_len,
				actual: len,
			});
		}
		if len > policy.max_len {
			return Err(ParseError::TooLong {
				max: policy.max_len,
				actual: len,
			});
		}
		let id = Self::normalize(id);
		if let Some(c) = id.chars().find(|c| !is_base32(*c)) {
			return Err(ParseError::InvalidCharacter(c));
		}
		Ok(Self { id })
	}

	/// Parses a full `did:plc:...` string under the given policy.
	pub fn parse_with_policy(
		s: &str,
		policy: &PlcIdPolicy,
	) -> Result<Self, ParseError> {
		let id = s.strip_prefix(Self::PREFIX).ok_or(ParseError::MissingPrefix)?;
		Self::from_identifier_with_policy(id, policy)
	}

	/// Folds an identifier to its canonical case. Does not validate it.
	pub fn normalize(id: &str) -> String {
		id.to_ascii_lowercase()
	}

	/// The identifier, without the `did:plc:` prefix.
	pub fn identifier(&self) -> &str {
		&self.id
	}
}

const fn is_base32(c: char) -> bool {
	matches!(c, 'a'..='z' | '2'..='7')
}

impl PartialEq for DidPlc {
	fn eq(&self, other: &Self) -> bool {
		self.id.eq_ignore_ascii_case(&other.id)
	}
}

impl Eq for DidPlc {}

impl Hash for DidPlc {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		// Must agree with the case-insensitive `PartialEq`.
		for b in self.id.bytes() {
			b.to_ascii_lowercase().hash(state);
		}
	}
}

impl FromStr for DidPlc {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse_with_policy(s, &PlcIdPolicy::default())
	}
}

impl Display for DidPlc {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}{}", Self::PREFIX, self.id)
	}
}

impl Did for DidPlc {
	fn method(&self) -> DidMethod {
		DidMethod::Plc
	}
}

#[derive(thiserror::Error, Debug, Eq, PartialEq, Clone)]
pub enum ParseError {
	#[error("expected the did:plc: prefix")]
	MissingPrefix,
	#[error("the did:plc has an empty identifier")]
	EmptyIdentifier,
	#[error("identifier has length {actual}, but must be at least {min}")]
	TooShort { min: usize, actual: usize },
	#[error("identifier has length {actual}, but must be at most {max}")]
	TooLong { max: usize, actual: usize },
	#[error("identifier contains {0:?}, which is not a base32 character")]
	InvalidCharacter(char),
}
