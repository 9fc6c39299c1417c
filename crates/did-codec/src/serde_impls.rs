//! DIDs serialize as their canonical string, and deserialize by parsing one.

use std::{fmt::Display, marker::PhantomData, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{DidDyn, DidKey, DidPlc, DidWeb};

struct FromStrVisitor<T>(PhantomData<T>);

impl<T> de::Visitor<'_> for FromStrVisitor<T>
where
	T: FromStr,
	T::Err: Display,
{
	type Value = T;

	fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.write_str("a did string")
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
		T::from_str(v).map_err(E::custom)
	}
}

macro_rules! impl_serde {
	($($t:ty),+ $(,)?) => {$(
		impl Serialize for $t {
			fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
				serializer.collect_str(self)
			}
		}

		impl<'de> Deserialize<'de> for $t {
			fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
				deserializer.deserialize_str(FromStrVisitor(PhantomData))
			}
		}
	)+};
}

impl_serde!(DidDyn, DidKey, DidPlc, DidWeb);
