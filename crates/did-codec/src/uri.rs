use std::{fmt::Display, str::FromStr};

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum DidMethod {
	Key,
	Plc,
	Web,
}

impl DidMethod {
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Key => "key",
			Self::Plc => "plc",
			Self::Web => "web",
		}
	}
}

impl FromStr for DidMethod {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"key" => Self::Key,
			"plc" => Self::Plc,
			"web" => Self::Web,
			_ => return Err(ParseError::UnsupportedMethod(s.to_owned())),
		})
	}
}

impl Display for DidMethod {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.as_str().fmt(f)
	}
}

/// The `did:<method>:<method-specific-id>` envelope shared by every method,
/// borrowed from the string it was parsed from.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub struct DidUri<'a> {
	method: DidMethod,
	/// The string representation of the DID.
	s: &'a str,
	/// The index in `s` where the method-specific-id starts.
	method_specific_id: usize,
}

impl<'a> DidUri<'a> {
	/// Splits `s` on `:`. There must be at least three segments, the first being
	/// `did`. Everything after the method is the method-specific-id, including
	/// any further colons.
	pub fn parse(s: &'a str) -> Result<Self, ParseError> {
		let mut segments = s.splitn(3, ':');
		if segments.next() != Some("did") {
			return Err(ParseError::Malformed("expected the did: scheme"));
		}
		let (Some(method), Some(method_specific_id)) =
			(segments.next(), segments.next())
		else {
			return Err(ParseError::Malformed(
				"expected did:<method>:<method-specific-id>",
			));
		};
		let method = DidMethod::from_str(method)?;

		Ok(Self {
			method,
			s,
			method_specific_id: s.len() - method_specific_id.len(),
		})
	}

	/// Gets the uri as a str.
	pub fn as_str(&self) -> &'a str {
		self.s
	}

	/// The method of the did.
	pub fn method(&self) -> DidMethod {
		self.method
	}

	/// Method-specific identity info.
	pub fn method_specific_id(&self) -> &'a str {
		&self.s[self.method_specific_id..]
	}
}

#[derive(Debug, thiserror::Error, Eq, PartialEq, Clone)]
pub enum ParseError {
	#[error("malformed did: {0}")]
	Malformed(&'static str),
	#[error("encountered unsupported did:method {0:?}")]
	UnsupportedMethod(String),
}

#[cfg(test)]
mod test {
	use super::*;
	use eyre::{Result, WrapErr};

	#[test]
	fn test_parse() -> Result<()> {
		let test_cases = [
			("did:key:123456", DidMethod::Key, "123456"),
			("did:plc:abcd", DidMethod::Plc, "abcd"),
			("did:web:example.com:a:b", DidMethod::Web, "example.com:a:b"),
			("did:web:", DidMethod::Web, ""),
		];
		for (s, method, msi) in test_cases {
			let uri = DidUri::parse(s).wrap_err_with(|| format!("failed to parse {s}"))?;
			assert_eq!(uri.method(), method);
			assert_eq!(uri.method_specific_id(), msi);
			assert_eq!(uri.as_str(), s);
		}
		Ok(())
	}

	#[test]
	fn test_malformed() {
		for s in ["", "did", "did:", "did:key", "not-a-did", "DID:key:abc"] {
			assert!(
				matches!(DidUri::parse(s), Err(ParseError::Malformed(_))),
				"{s:?} should be malformed"
			);
		}
	}

	#[test]
	fn test_unsupported_method() {
		assert_eq!(
			DidUri::parse("did:unsupported:123"),
			Err(ParseError::UnsupportedMethod("unsupported".to_owned()))
		);
		// Three segments are present, so an empty method is merely unknown.
		assert_eq!(
			DidUri::parse("did::abc"),
			Err(ParseError::UnsupportedMethod(String::new()))
		);
	}

	#[test]
	fn test_method_display() {
		for method in [DidMethod::Key, DidMethod::Plc, DidMethod::Web] {
			assert_eq!(Ok(method), method.to_string().parse());
		}
	}
}
