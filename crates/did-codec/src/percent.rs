//! Percent-encoding, as used by the method-specific-id of `did:web`.
//!
//! Encoding leaves ASCII alphanumerics and `-._~` untouched and escapes
//! everything else as uppercase `%XX`. Decoding is strict: a `%` must always be
//! followed by two hex digits.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped inside a did:web path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'.')
	.remove(b'_')
	.remove(b'~');

/// Characters escaped inside a segment of an https url path. Same as [`SEGMENT`],
/// but a verbatim `/` is kept.
const URL_PATH: &AsciiSet = &SEGMENT.remove(b'/');

/// Percent-encodes a single did:web path segment.
pub fn encode_segment(segment: &str) -> String {
	utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Percent-encodes a segment for use in an https url path.
pub fn encode_url_path(segment: &str) -> String {
	utf8_percent_encode(segment, URL_PATH).to_string()
}

/// Strictly percent-decodes `s`.
pub fn decode(s: &str) -> Result<String, PercentDecodeError> {
	let bytes = s.as_bytes();
	let mut idx = 0;
	while idx < bytes.len() {
		if bytes[idx] != b'%' {
			idx += 1;
			continue;
		}
		let escape = bytes.get(idx + 1..idx + 3).ok_or(PercentDecodeError::Truncated {
			index: idx,
		})?;
		if let Some(&bad) = escape.iter().find(|b| !b.is_ascii_hexdigit()) {
			return Err(PercentDecodeError::InvalidHex {
				index: idx,
				found: char::from(bad),
			});
		}
		idx += 3;
	}

	percent_decode_str(s)
		.decode_utf8()
		.map(|decoded| decoded.into_owned())
		.map_err(|_| PercentDecodeError::InvalidUtf8)
}

#[derive(thiserror::Error, Debug, Eq, PartialEq, Clone)]
pub enum PercentDecodeError {
	#[error("escape at byte {index} is missing hex digits")]
	Truncated { index: usize },
	#[error("escape at byte {index} contains non-hex digit {found:?}")]
	InvalidHex { index: usize, found: char },
	#[error("decoded bytes are not valid UTF-8")]
	InvalidUtf8,
	#[error("not in canonical form, expected {expected:?}")]
	NotCanonical { expected: String },
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_encode_segment() {
		let examples = [
			("alice", "alice"),
			("path with spaces", "path%20with%20spaces"),
			("a-b.c_d~e", "a-b.c_d~e"),
			("a:b", "a%3Ab"),
			("a/b", "a%2Fb"),
			("100%", "100%25"),
			("é", "%C3%A9"),
		];
		for (decoded, encoded) in examples {
			assert_eq!(encode_segment(decoded), encoded);
			assert_eq!(decode(encoded).as_deref(), Ok(decoded));
		}
	}

	#[test]
	fn test_encode_url_path_keeps_slash() {
		assert_eq!(encode_url_path("a/b c"), "a/b%20c");
		assert_eq!(encode_url_path("a:b"), "a%3Ab");
	}

	#[test]
	fn test_decode_is_lenient_about_case_but_strict_about_digits() {
		assert_eq!(decode("%2f").as_deref(), Ok("/"));
		assert_eq!(
			decode("abc%"),
			Err(PercentDecodeError::Truncated { index: 3 })
		);
		assert_eq!(
			decode("abc%4"),
			Err(PercentDecodeError::Truncated { index: 3 })
		);
		assert_eq!(
			decode("%4G"),
			Err(PercentDecodeError::InvalidHex {
				index: 0,
				found: 'G'
			})
		);
		assert_eq!(decode("%FF"), Err(PercentDecodeError::InvalidUtf8));
	}
}
