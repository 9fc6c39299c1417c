use curve25519_dalek::edwards::CompressedEdwardsY;

use crate::{
	key_algos::{Ed25519, KeyAlgo, StaticKeyAlgo as _},
	methods::key::DidKey,
};

/// An ed25519 public key.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub struct VerifyingKey(ed25519_dalek::VerifyingKey);

impl VerifyingKey {
	pub const LEN: usize = Self::key_len();

	/// Instantiates `VerifyingKey` from some bytes. Performs all necessary
	/// validation that the key is valid and of sufficient strength.
	///
	/// Note that we will reject any keys that are too weak (aka low order).
	pub fn try_from_bytes(bytes: &[u8; Self::LEN]) -> Result<Self, TryFromBytesError> {
		let compressed_edwards = CompressedEdwardsY(bytes.to_owned());
		let Some(edwards) = compressed_edwards.decompress() else {
			return Err(TryFromBytesError::NotOnCurve);
		};
		let key = ed25519_dalek::VerifyingKey::from(edwards);
		if key.is_weak() {
			return Err(TryFromBytesError::WeakKey);
		}
		Ok(Self(key))
	}

	pub fn into_inner(self) -> ed25519_dalek::VerifyingKey {
		self.0
	}

	/// The `did:key` that encodes this public key.
	pub fn to_did_key(&self) -> DidKey {
		DidKey::from_pub_key(KeyAlgo::Ed25519, self.0.as_bytes().to_vec())
			.expect("ed25519 keys always have a valid length")
	}

	// TODO: Turn this into inline const when that feature stabilizes
	const fn key_len() -> usize {
		let len = Ed25519::PUB_KEY_LENS[0];
		assert!(len == ed25519_dalek::PUBLIC_KEY_LENGTH);
		len
	}
}

impl TryFrom<&DidKey> for VerifyingKey {
	type Error = FromDidKeyError;

	fn try_from(did: &DidKey) -> Result<Self, Self::Error> {
		if did.key_algo() != Ed25519 {
			return Err(FromDidKeyError::WrongAlgo(did.key_algo()));
		}
		let bytes: &[u8; Self::LEN] = did
			.pub_key()
			.try_into()
			.expect("did:key guarantees the length of ed25519 keys");
		Ok(Self::try_from_bytes(bytes)?)
	}
}

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum TryFromBytesError {
	#[error(
		"the provided bytes was not the y coordinate of a valid point on the curve"
	)]
	NotOnCurve,
	#[error("public key has a low order and is too weak, which would allow the key to generate signatures that work for almost any message. To prevent this, we reject weak keys.")]
	WeakKey,
}

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum FromDidKeyError {
	#[error("expected an ed25519 did:key but got a {0} key")]
	WrongAlgo(KeyAlgo),
	#[error(transparent)]
	Key(#[from] TryFromBytesError),
}

#[cfg(test)]
mod test {
	use super::*;

	use std::str::FromStr;

	// See https://datatracker.ietf.org/doc/html/rfc8037#appendix-A.2
	const RFC_PUB_KEY: [u8; 32] = hex_literal::hex!(
		"d7 5a 98 01 82 b1 0a b7 d5 4b fe d3 c9 64 07 3a
		0e e1 72 f3 da a6 23 25 af 02 1a 68 f7 07 51 1a"
	);
	const RFC_DID: &str = "did:key:z6MktwupdmLXVVqTzCw4i46r4uGyosGXRnR3XjN4Zq7oMMsw";

	#[test]
	fn test_to_did_key() {
		let key = VerifyingKey::try_from_bytes(&RFC_PUB_KEY).unwrap();
		assert_eq!(key.to_did_key().to_string(), RFC_DID);
		assert_eq!(key.into_inner().as_bytes(), &RFC_PUB_KEY);
	}

	#[test]
	fn test_from_did_key() -> eyre::Result<()> {
		let did = DidKey::from_str(RFC_DID)?;
		let key = VerifyingKey::try_from(&did)?;
		assert_eq!(key.to_did_key(), did);

		let p256 = DidKey::from_pub_key(KeyAlgo::P256, vec![3u8; 33])?;
		assert_eq!(
			VerifyingKey::try_from(&p256),
			Err(FromDidKeyError::WrongAlgo(KeyAlgo::P256))
		);
		Ok(())
	}

	#[test]
	fn test_rejects_weak_keys() {
		// The identity point has order 1.
		let mut identity = [0u8; 32];
		identity[0] = 1;
		assert_eq!(
			VerifyingKey::try_from_bytes(&identity),
			Err(TryFromBytesError::WeakKey)
		);
	}
}
