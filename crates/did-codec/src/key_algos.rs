use std::fmt::Display;
use std::str::FromStr;

use crate::varint::{encode_varint, VarintEncoding};

/// The public key algorithms supported by `did:key`.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum KeyAlgo {
	Ed25519,
	Secp256k1,
	P256,
}

impl KeyAlgo {
	pub const ALL: [KeyAlgo; 3] = [Self::Ed25519, Self::Secp256k1, Self::P256];

	/// The public key lengths (in bytes) that are valid for this algorithm.
	pub const fn pub_key_lens(&self) -> &'static [usize] {
		match self {
			Self::Ed25519 => Ed25519::PUB_KEY_LENS,
			Self::Secp256k1 => Secp256k1::PUB_KEY_LENS,
			Self::P256 => P256::PUB_KEY_LENS,
		}
	}

	/// The multicodec value that identifies this algorithm's public keys.
	pub const fn multicodec_value(&self) -> u16 {
		match self {
			Self::Ed25519 => Ed25519::MULTICODEC_VALUE,
			Self::Secp256k1 => Secp256k1::MULTICODEC_VALUE,
			Self::P256 => P256::MULTICODEC_VALUE,
		}
	}

	/// Inverse of [`Self::multicodec_value`].
	pub fn from_multicodec_value(value: u16) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|algo| algo.multicodec_value() == value)
	}

	pub const fn name(&self) -> &'static str {
		match self {
			Self::Ed25519 => "ed25519",
			Self::Secp256k1 => "secp256k1",
			Self::P256 => "p256",
		}
	}

	pub(crate) const fn multicodec_prefix(&self) -> VarintEncoding {
		match self {
			Self::Ed25519 => Ed25519::MULTICODEC_VALUE_ENCODED,
			Self::Secp256k1 => Secp256k1::MULTICODEC_VALUE_ENCODED,
			Self::P256 => P256::MULTICODEC_VALUE_ENCODED,
		}
	}

	pub(crate) fn is_valid_len(&self, len: usize) -> bool {
		self.pub_key_lens().contains(&len)
	}
}

impl Display for KeyAlgo {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.name().fmt(f)
	}
}

impl FromStr for KeyAlgo {
	type Err = UnknownKeyAlgo;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|algo| algo.name().eq_ignore_ascii_case(s))
			.ok_or_else(|| UnknownKeyAlgo(s.to_owned()))
	}
}

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
#[error("unknown key algorithm {0:?}, expected one of ed25519, secp256k1, p256")]
pub struct UnknownKeyAlgo(pub String);

// ---- internal code ----

/// A key algorithm that is known statically, at compile time.
pub(crate) trait StaticKeyAlgo {
	const PUB_KEY_LENS: &'static [usize];
	const MULTICODEC_VALUE: u16;
	const MULTICODEC_VALUE_ENCODED: VarintEncoding =
		encode_varint(Self::MULTICODEC_VALUE);
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub(crate) struct Ed25519;

impl StaticKeyAlgo for Ed25519 {
	const PUB_KEY_LENS: &'static [usize] = &[32];
	const MULTICODEC_VALUE: u16 = 0xED;
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub(crate) struct Secp256k1;

impl StaticKeyAlgo for Secp256k1 {
	/// Compressed or uncompressed SEC1 points.
	const PUB_KEY_LENS: &'static [usize] = &[33, 65];
	const MULTICODEC_VALUE: u16 = 0xE7;
}

#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub(crate) struct P256;

impl StaticKeyAlgo for P256 {
	/// Compressed or uncompressed SEC1 points.
	const PUB_KEY_LENS: &'static [usize] = &[33, 65];
	const MULTICODEC_VALUE: u16 = 0x1200;
}

impl PartialEq<Ed25519> for KeyAlgo {
	fn eq(&self, _other: &Ed25519) -> bool {
		*self == KeyAlgo::Ed25519
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_multicodec_prefixes() {
		assert_eq!(KeyAlgo::Ed25519.multicodec_prefix().as_slice(), [0xed, 0x01]);
		assert_eq!(KeyAlgo::Secp256k1.multicodec_prefix().as_slice(), [0xe7, 0x01]);
		assert_eq!(KeyAlgo::P256.multicodec_prefix().as_slice(), [0x80, 0x24]);
	}

	#[test]
	fn test_multicodec_value_roundtrip() {
		for algo in KeyAlgo::ALL {
			assert_eq!(
				Some(algo),
				KeyAlgo::from_multicodec_value(algo.multicodec_value())
			);
		}
		// x25519 is a valid multicodec, but not a signing key we support.
		assert_eq!(None, KeyAlgo::from_multicodec_value(0xec));
	}

	#[test]
	fn test_from_str() {
		assert_eq!(Ok(KeyAlgo::P256), "P256".parse());
		assert_eq!(Ok(KeyAlgo::Secp256k1), "secp256k1".parse());
		assert_eq!(
			Err(UnknownKeyAlgo("rsa".to_owned())),
			"rsa".parse::<KeyAlgo>()
		);
	}
}
