//! Unsigned varints, as used by multicodec tags.
//!
//! See <https://github.com/multiformats/unsigned-varint>

/// bitmask for 7 least significant bits
const LSB_7: u8 = u8::MAX / 2;
/// bitmask for most significant bit
const MSB: u8 = !LSB_7;
/// A u16 never needs more than 3 bytes (7 + 7 + 2 bits).
const MAX_LEN: usize = 3;

#[inline]
const fn msb_is_1(val: u8) -> bool {
	val & MSB == MSB
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub(crate) struct VarintEncoding {
	buf: [u8; MAX_LEN],
	len: u8,
}

impl VarintEncoding {
	pub const fn as_slice(&self) -> &[u8] {
		self.buf.split_at(self.len as usize).0
	}
}

/// Encodes a value as a varint.
pub(crate) const fn encode_varint(value: u16) -> VarintEncoding {
	let mut buf = [0; MAX_LEN];
	let mut remaining = value;
	let mut len = 0;
	// Always write at least one byte, so that 0 encodes as [0x00].
	loop {
		let chunk = (remaining as u8) & LSB_7;
		remaining >>= 7;
		if remaining == 0 {
			buf[len] = chunk;
			len += 1;
			break;
		}
		buf[len] = chunk | MSB;
		len += 1;
	}

	VarintEncoding {
		buf,
		len: len as u8,
	}
}

/// Decodes the varint at the start of `encoded`.
///
/// Returns the decoded value along with the number of bytes that it occupied.
/// Any bytes after the varint are ignored.
pub(crate) const fn decode_varint(
	encoded: &[u8],
) -> Result<(u16, usize), DecodeError> {
	let mut result: u32 = 0;
	let mut idx = 0;
	while idx < MAX_LEN {
		if idx >= encoded.len() {
			return Err(DecodeError::MissingBytes);
		}
		let byte = encoded[idx];
		result |= ((byte & LSB_7) as u32) << (7 * idx);
		if !msb_is_1(byte) {
			// A trailing zero byte means a shorter encoding existed.
			if idx > 0 && byte == 0 {
				return Err(DecodeError::NotMinimal);
			}
			if result > u16::MAX as u32 {
				return Err(DecodeError::WouldOverflow);
			}
			return Ok((result as u16, idx + 1));
		}
		idx += 1;
	}
	Err(DecodeError::WouldOverflow)
}

#[derive(thiserror::Error, Debug, Eq, PartialEq, Clone, Copy)]
pub enum DecodeError {
	#[error("expected more bytes than what were provided")]
	MissingBytes,
	#[error(
		"the decoded number is too large to fit into the type without overflowing"
	)]
	WouldOverflow,
	#[error("the varint was not minimally encoded")]
	NotMinimal,
}
