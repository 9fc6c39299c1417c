//! An implementation of the [did:web] method.
//!
//! A `did:web` is a host, an optional port, and an optional path:
//! `did:web:<host>[%3A<port>][:<segment>]*`. The colon before a port is
//! percent-encoded so that it can't be confused with the `:` path separator.
//!
//! [did:web]: https://w3c-ccg.github.io/did-method-web

use std::{fmt::Display, str::FromStr};

use url::Url;

use crate::{
	host::{parse_host_and_port, Host, HostError},
	percent::{self, PercentDecodeError},
	uri::DidMethod,
	Did,
};

/// An implementation of the `did:web` method. See the [module](self) docs for more
/// info.
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub struct DidWeb {
	host: Host,
	port: Option<u16>,
	/// Decoded path segments. Never empty strings.
	path: Vec<String>,
}

impl DidWeb {
	pub const PREFIX: &'static str = "did:web:";
	const ENCODED_COLON: &'static str = "%3A";

	/// Creates a `did:web` from a `host[:port]` and decoded path segments.
	///
	/// ```
	/// use did_codec::methods::web::DidWeb;
	///
	/// let did = DidWeb::from_host_and_path("example.com", ["users", "alice"]).unwrap();
	/// assert_eq!(did.to_string(), "did:web:example.com:users:alice");
	/// ```
	pub fn from_host_and_path<I>(host: &str, path: I) -> Result<Self, ParseError>
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		let (host, port) = parse_host_and_port(host)?;
		let path = path
			.into_iter()
			.map(Into::into)
			.enumerate()
			.map(|(index, segment): (usize, String)| {
				if segment.is_empty() {
					Err(ParseError::EmptyPathSegment { index })
				} else {
					Ok(segment)
				}
			})
			.collect::<Result<_, _>>()?;
		Ok(Self { host, port, path })
	}

	/// Creates a `did:web` from an `https` url such as `https://example.com/users/alice`.
	/// Empty path segments (such as from a trailing `/`) are dropped.
	pub fn from_url(url: &Url) -> Result<Self, ParseError> {
		if url.scheme() != "https" {
			return Err(ParseError::UnsupportedUrl(format!(
				"scheme must be https, but was {}",
				url.scheme()
			)));
		}
		if url.query().is_some() || url.fragment().is_some() {
			return Err(ParseError::UnsupportedUrl(
				"url may not have a query or fragment".to_owned(),
			));
		}
		let Some(host) = url.host_str() else {
			return Err(ParseError::UnsupportedUrl("url has no host".to_owned()));
		};
		let (host, _) = parse_host_and_port(host)?;
		let path = url
			.path_segments()
			.into_iter()
			.flatten()
			.filter(|segment| !segment.is_empty())
			.map(|segment| {
				percent::decode(segment).map_err(|source| ParseError::PathEncoding {
					segment: segment.to_owned(),
					source,
				})
			})
			.collect::<Result<_, _>>()?;
		Ok(Self {
			host,
			port: url.port(),
			path,
		})
	}

	pub fn host(&self) -> &Host {
		&self.host
	}

	pub fn port(&self) -> Option<u16> {
		self.port
	}

	/// The decoded path segments.
	pub fn path(&self) -> &[String] {
		&self.path
	}

	/// The https url that the DID document of this DID is served at.
	///
	/// ```
	/// use did_codec::methods::web::DidWeb;
	///
	/// let did: DidWeb = "did:web:localhost%3A8080".parse().unwrap();
	/// assert_eq!(did.to_resolution_url(), "https://localhost:8080/.well-known/did.json");
	/// ```
	pub fn to_resolution_url(&self) -> String {
		let mut url = format!("https://{}", self.host);
		if let Some(port) = self.port {
			url.push_str(&format!(":{port}"));
		}
		for segment in &self.path {
			url.push('/');
			url.push_str(&percent::encode_url_path(segment));
		}
		url.push_str("/.well-known/did.json");
		url
	}
}

/// Decodes a single path segment, only accepting its canonical spelling.
fn decode_segment(index: usize, segment: &str) -> Result<String, ParseError> {
	if segment.is_empty() {
		return Err(ParseError::EmptyPathSegment { index });
	}
	let path_err = |source| ParseError::PathEncoding {
		segment: segment.to_owned(),
		source,
	};
	let decoded = percent::decode(segment).map_err(path_err)?;
	let expected = percent::encode_segment(&decoded);
	if expected != segment {
		return Err(path_err(PercentDecodeError::NotCanonical { expected }));
	}
	Ok(decoded)
}

impl FromStr for DidWeb {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let id = s.strip_prefix(Self::PREFIX).ok_or(ParseError::MissingPrefix)?;
		if id.is_empty() {
			return Err(ParseError::EmptyIdentifier);
		}
		let mut segments = id.split(':');
		let encoded_host = segments.next().unwrap_or_default();
		let (host, port) =
			parse_host_and_port(&encoded_host.replace(Self::ENCODED_COLON, ":"))?;
		let path = segments
			.enumerate()
			.map(|(index, segment)| decode_segment(index, segment))
			.collect::<Result<_, _>>()?;

		Ok(Self { host, port, path })
	}
}

impl Display for DidWeb {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}{}", Self::PREFIX, self.host)?;
		if let Some(port) = self.port {
			write!(f, "{}{port}", Self::ENCODED_COLON)?;
		}
		for segment in &self.path {
			write!(f, ":{}", percent::encode_segment(segment))?;
		}
		Ok(())
	}
}

impl Did for DidWeb {
	fn method(&self) -> DidMethod {
		DidMethod::Web
	}
}

#[derive(thiserror::Error, Debug, Eq, PartialEq, Clone)]
pub enum ParseError {
	#[error("expected the did:web: prefix")]
	MissingPrefix,
	#[error("the did:web has an empty method-specific-id")]
	EmptyIdentifier,
	#[error(transparent)]
	Host(#[from] HostError),
	#[error("path segment {index} is empty")]
	EmptyPathSegment { index: usize },
	#[error("path segment {segment:?} is not correctly percent-encoded")]
	PathEncoding {
		segment: String,
		#[source]
		source: PercentDecodeError,
	},
	#[error("unsupported url: {0}")]
	UnsupportedUrl(String),
}
