//! An implementation of the [did:key] method.
//!
//! [did:key]: https://w3c-ccg.github.io/did-method-key/

use std::{fmt::Display, str::FromStr};

use bytes::Bytes;

use crate::{
	key_algos::KeyAlgo,
	uri::DidMethod,
	varint::{decode_varint, DecodeError},
	Did,
};

/// An implementation of the `did:key` method. See the [module](self) docs for more
/// info.
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
pub struct DidKey {
	algo: KeyAlgo,
	/// The raw public key, without its multicodec prefix.
	pub_key: Bytes,
}

impl DidKey {
	pub const PREFIX: &'static str = "did:key:";

	/// Creates a `did:key` from the raw bytes of a public key. The length of
	/// `pub_key` must be valid for `algo`.
	pub fn from_pub_key(
		algo: KeyAlgo,
		pub_key: impl Into<Bytes>,
	) -> Result<Self, InvalidKeyLength> {
		let pub_key = pub_key.into();
		if !algo.is_valid_len(pub_key.len()) {
			return Err(InvalidKeyLength {
				algo,
				expected: algo.pub_key_lens(),
				actual: pub_key.len(),
			});
		}
		Ok(Self { algo, pub_key })
	}

	pub fn key_algo(&self) -> KeyAlgo {
		self.algo
	}

	/// The raw public key, without its multicodec prefix.
	pub fn pub_key(&self) -> &[u8] {
		&self.pub_key
	}

	/// The multibase (base58-btc) encoding of the multicodec prefixed public key.
	/// This is everything after `did:key:`.
	///
	/// # Panics
	/// Panics if the public key has the wrong length for its algorithm, which
	/// can't happen for keys built through this crate's constructors.
	pub fn multibase(&self) -> String {
		assert!(
			self.algo.is_valid_len(self.pub_key.len()),
			"{} public keys can't have length {}",
			self.algo,
			self.pub_key.len()
		);
		let prefix = self.algo.multicodec_prefix();
		let mut buf =
			Vec::with_capacity(prefix.as_slice().len() + self.pub_key.len());
		buf.extend_from_slice(prefix.as_slice());
		buf.extend_from_slice(&self.pub_key);

		let encoded = bs58::encode(buf)
			.with_alphabet(bs58::Alphabet::BITCOIN)
			.into_string();
		format!("z{encoded}")
	}
}

fn decode_multibase(multibase: &str) -> Result<Vec<u8>, MultibaseDecodeError> {
	// did:key only uses base58-btc, so its not actually any arbitrary multibase.
	// the first character should always be 'z'
	let mut chars = multibase.chars();
	match chars.next() {
		Some('z') => (),
		Some(base) => return Err(MultibaseDecodeError::WrongBase(base)),
		None => return Err(MultibaseDecodeError::Empty),
	}
	let decoded = bs58::decode(chars.as_str())
		.with_alphabet(bs58::Alphabet::BITCOIN)
		.into_vec()?;
	Ok(decoded)
}

#[derive(thiserror::Error, Debug, Eq, PartialEq, Clone)]
pub enum MultibaseDecodeError {
	#[error(
		"Expected \"base58-btc\" encoding which should be identified in multibase as ascii 'z' but got {0:?}"
	)]
	WrongBase(char),
	#[error("multibase string was empty")]
	Empty,
	#[error(transparent)]
	Bs58(#[from] bs58::decode::Error),
}

impl FromStr for DidKey {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let multibase = s
			.strip_prefix(Self::PREFIX)
			.ok_or(ParseError::MissingPrefix)?;
		if multibase.is_empty() {
			return Err(ParseError::EmptyIdentifier);
		}
		let decoded = decode_multibase(multibase)?;
		if decoded.len() < 2 {
			return Err(ParseError::InsufficientBytes(decoded.len()));
		}
		let (tag, tag_len) = decode_varint(&decoded)?;
		let algo = KeyAlgo::from_multicodec_value(tag)
			.ok_or(ParseError::UnsupportedKeyType(tag))?;
		let mut decoded = Bytes::from(decoded);
		let pub_key = decoded.split_off(tag_len);

		Ok(Self::from_pub_key(algo, pub_key)?)
	}
}

impl Display for DidKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}{}", Self::PREFIX, self.multibase())
	}
}

impl Did for DidKey {
	fn method(&self) -> DidMethod {
		DidMethod::Key
	}
}

#[derive(thiserror::Error, Debug, Eq, PartialEq, Clone)]
#[error("{algo} public keys must have a length in {expected:?} but got {actual}")]
pub struct InvalidKeyLength {
	pub algo: KeyAlgo,
	pub expected: &'static [usize],
	pub actual: usize,
}

#[derive(thiserror::Error, Debug, Eq, PartialEq, Clone)]
pub enum ParseError {
	#[error("expected the did:key: prefix")]
	MissingPrefix,
	#[error("the did:key has an empty method-specific-id")]
	EmptyIdentifier,
	#[error(transparent)]
	MultibaseDecode(#[from] MultibaseDecodeError),
	#[error("decoded {0} bytes, but at least a multicodec tag and key are required")]
	InsufficientBytes(usize),
	#[error("failed to decode the multicodec tag: {0}")]
	MulticodecDecode(#[from] DecodeError),
	#[error("multicodec {0:#x} is not a supported key type")]
	UnsupportedKeyType(u16),
	#[error(transparent)]
	InvalidKeyLength(#[from] InvalidKeyLength),
}
