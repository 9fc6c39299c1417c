//! Hosts that may appear in a `did:web`.
//!
//! did:web is only defined over domain names, so ip literals are rejected. A
//! host containing a `.` is a [`Domain`], anything else (such as `localhost`) is
//! an opaque [`Hostname`]. Domains are split around their public suffix, as
//! listed in the [public suffix list](https://publicsuffix.org).

use std::fmt::Display;

use tracing::trace;

/// Maximum length of a full domain name.
pub const MAX_DOMAIN_LEN: usize = 253;
/// Maximum length of a single dot separated label.
pub const MAX_LABEL_LEN: usize = 63;

#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub enum Host {
	Domain(Domain),
	Hostname(Hostname),
}

impl Host {
	/// Parses a host, without any port.
	pub fn parse(s: &str) -> Result<Self, HostError> {
		if let Ok(url::Host::Ipv4(_) | url::Host::Ipv6(_)) = url::Host::parse(s) {
			return Err(HostError::UnsupportedForm(s.to_owned()));
		}
		validate(s)?;
		if !s.contains('.') {
			return Ok(Self::Hostname(Hostname(s.to_owned())));
		}
		Ok(Self::Domain(Domain::split(s)))
	}
}

impl Display for Host {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Domain(d) => d.fmt(f),
			Self::Hostname(h) => h.fmt(f),
		}
	}
}

/// A domain name, split into its labels.
///
/// `a.b.example.com` has subdomains `["a", "b"]`, name `example` and suffix
/// `com`. `sub.example.co.uk` has subdomains `["sub"]`, name `example` and
/// suffix `co.uk`.
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub struct Domain {
	subdomains: Vec<String>,
	name: String,
	suffix: String,
}

impl Domain {
	/// Splits an already validated domain that contains at least one `.`.
	fn split(s: &str) -> Self {
		// The list is lowercase, but the original case is kept.
		let lowercase = s.to_ascii_lowercase();
		let suffix_len = psl::suffix(lowercase.as_bytes())
			.map(|suffix| suffix.as_bytes().len())
			.unwrap_or(0);
		// A host that is itself a public suffix, like `co.uk`, still needs a name,
		// so the last label becomes the suffix.
		let split_at = if suffix_len == 0 || suffix_len >= s.len() {
			s.rfind('.').unwrap_or(0)
		} else {
			s.len() - suffix_len - 1
		};
		let (rest, suffix) = (&s[..split_at], &s[split_at + 1..]);
		let (subdomains, name) = match rest.rsplit_once('.') {
			None => (Vec::new(), rest),
			Some((subdomains, name)) => {
				(subdomains.split('.').map(str::to_owned).collect(), name)
			}
		};
		trace!(domain = s, suffix, "split domain");
		Self {
			subdomains,
			name: name.to_owned(),
			suffix: suffix.to_owned(),
		}
	}

	pub fn subdomains(&self) -> &[String] {
		&self.subdomains
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn suffix(&self) -> &str {
		&self.suffix
	}
}

impl Display for Domain {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for subdomain in &self.subdomains {
			write!(f, "{subdomain}.")?;
		}
		write!(f, "{}.{}", self.name, self.suffix)
	}
}

/// A single label host, like `localhost`.
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub struct Hostname(String);

impl Hostname {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Display for Hostname {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

/// Parses `host[:port]` in a single step.
pub fn parse_host_and_port(s: &str) -> Result<(Host, Option<u16>), HostError> {
	if s.starts_with('[') {
		// Bracketed ipv6 literal, possibly followed by a port.
		return Err(HostError::UnsupportedForm(s.to_owned()));
	}
	let Some((host, port)) = s.rsplit_once(':') else {
		return Ok((Host::parse(s)?, None));
	};
	let port = parse_port(port)?;
	Ok((Host::parse(host)?, Some(port)))
}

/// Ports must be spelled canonically: ascii digits without leading zeroes.
fn parse_port(s: &str) -> Result<u16, HostError> {
	let invalid = || HostError::InvalidPort(s.to_owned());
	if s.is_empty()
		|| !s.bytes().all(|b| b.is_ascii_digit())
		|| (s.len() > 1 && s.starts_with('0'))
	{
		return Err(invalid());
	}
	s.parse().map_err(|_| invalid())
}

fn validate(s: &str) -> Result<(), DomainError> {
	if s.is_empty() {
		return Err(DomainError::Empty);
	}
	if s.len() > MAX_DOMAIN_LEN {
		return Err(DomainError::TooLong(s.len()));
	}
	if let Some(c) = s
		.chars()
		.find(|&c| !(c.is_ascii_alphanumeric() || c == '-' || c == '.'))
	{
		return Err(DomainError::InvalidCharacter(c));
	}
	for c in [s.chars().next(), s.chars().last()].into_iter().flatten() {
		if c == '-' || c == '.' {
			return Err(DomainError::InvalidBoundary(c));
		}
	}
	for label in s.split('.') {
		if label.is_empty() {
			return Err(DomainError::EmptyLabel);
		}
		if label.len() > MAX_LABEL_LEN {
			return Err(DomainError::LabelTooLong(label.to_owned()));
		}
		if label.starts_with('-') || label.ends_with('-') {
			return Err(DomainError::InvalidBoundary('-'));
		}
	}
	Ok(())
}

#[derive(thiserror::Error, Debug, Eq, PartialEq, Clone)]
pub enum HostError {
	#[error(transparent)]
	InvalidDomain(#[from] DomainError),
	#[error("{0:?} is an ip address, but did:web only supports domain names")]
	UnsupportedForm(String),
	#[error("{0:?} is not a valid port")]
	InvalidPort(String),
}

#[derive(thiserror::Error, Debug, Eq, PartialEq, Clone)]
pub enum DomainError {
	#[error("domain was empty")]
	Empty,
	#[error("domain was {0} characters long, but at most {MAX_DOMAIN_LEN} are allowed")]
	TooLong(usize),
	#[error("domain contains invalid character {0:?}")]
	InvalidCharacter(char),
	#[error("domain or label may not start or end with {0:?}")]
	InvalidBoundary(char),
	#[error("domain contains an empty label")]
	EmptyLabel,
	#[error("label {0:?} is longer than {MAX_LABEL_LEN} characters")]
	LabelTooLong(String),
}
