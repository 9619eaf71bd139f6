//! Primitive value codecs.
//!
//! Atoms are encoded straight to bytes. The record framing supplies the length, so
//! none of these encodings carries its own.
//!
//! | tag | encoding |
//! |-----|----------|
//! | `int` | big-endian two's complement, `bit_length(|v|) / 8 + 1` bytes |
//! | `bool` | the `int` encoding of 0 or 1 |
//! | `text` | UTF-8 bytes |
//! | `none` | the single byte `0x00` |
//! | `bytes` | passthrough |

use tangle_graph::{Node, TypeTag};

use crate::error::{Error, Result};

/// Converts one kind of primitive node to and from raw bytes.
pub trait AtomCodec: Send + Sync {
	/// Encodes `node`.
	///
	/// # Errors
	///
	/// [`Error::KindMismatch`] if `node` is not the kind this codec handles.
	fn encode(&self, node: &Node) -> Result<Vec<u8>>;

	/// Decodes raw record bytes into a node.
	fn decode(&self, raw: &[u8]) -> Result<Node>;
}

/// Byte length of the integer encoding of `value`.
///
/// One more byte than the whole bytes needed for the magnitude, so a magnitude whose
/// bit length is a multiple of eight still gets a sign byte.
pub const fn int_len(value: i64) -> usize {
	let bits = (u64::BITS - value.unsigned_abs().leading_zeros()) as usize;
	bits / 8 + 1
}

/// Encodes a signed integer as big-endian two's complement of [`int_len`] bytes.
pub fn encode_int(value: i64) -> Vec<u8> {
	let len = int_len(value);
	let bytes = value.to_be_bytes();
	if len <= bytes.len() {
		return bytes[bytes.len() - len..].to_vec();
	}
	// Only i64::MIN needs a ninth byte.
	let mut out = Vec::with_capacity(len);
	out.push(if value < 0 { 0xff } else { 0x00 });
	out.extend_from_slice(&bytes);
	out
}

/// Decodes big-endian two's complement of any length.
///
/// An empty slice is zero. Longer encodings are accepted as long as the extra
/// leading bytes are pure sign extension.
pub fn decode_int(raw: &[u8]) -> Result<i64> {
	let mut raw = raw;
	while raw.len() > 8 {
		let redundant = match raw[0] {
			0x00 => raw[1] & 0x80 == 0,
			0xff => raw[1] & 0x80 != 0,
			_ => false,
		};
		if !redundant {
			return Err(Error::invalid(TypeTag::INT, format!("{} bytes do not fit in 64 bits", raw.len())));
		}
		raw = &raw[1..];
	}
	let Some(&first) = raw.first() else {
		return Ok(0);
	};
	let mut buf = if first & 0x80 != 0 { [0xff; 8] } else { [0x00; 8] };
	buf[8 - raw.len()..].copy_from_slice(raw);
	Ok(i64::from_be_bytes(buf))
}

fn mismatch(tag: TypeTag, node: &Node) -> Error {
	Error::KindMismatch { tag, found: node.tag() }
}

/// Codec for [`Node::None`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneCodec;

impl AtomCodec for NoneCodec {
	fn encode(&self, node: &Node) -> Result<Vec<u8>> {
		match node {
			Node::None => Ok(vec![0x00]),
			other => Err(mismatch(TypeTag::NONE, other)),
		}
	}

	fn decode(&self, _raw: &[u8]) -> Result<Node> {
		Ok(Node::None)
	}
}

/// Codec for [`Node::Bool`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl AtomCodec for BoolCodec {
	fn encode(&self, node: &Node) -> Result<Vec<u8>> {
		match node {
			Node::Bool(value) => Ok(encode_int(i64::from(*value))),
			other => Err(mismatch(TypeTag::BOOL, other)),
		}
	}

	fn decode(&self, raw: &[u8]) -> Result<Node> {
		let value = decode_int(raw).map_err(|_| Error::invalid(TypeTag::BOOL, "integer out of range"))?;
		Ok(Node::Bool(value != 0))
	}
}

/// Codec for [`Node::Int`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IntCodec;

impl AtomCodec for IntCodec {
	fn encode(&self, node: &Node) -> Result<Vec<u8>> {
		match node {
			Node::Int(value) => Ok(encode_int(*value)),
			other => Err(mismatch(TypeTag::INT, other)),
		}
	}

	fn decode(&self, raw: &[u8]) -> Result<Node> {
		decode_int(raw).map(Node::Int)
	}
}

/// Codec for [`Node::Text`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl AtomCodec for TextCodec {
	fn encode(&self, node: &Node) -> Result<Vec<u8>> {
		match node {
			Node::Text(text) => Ok(text.as_bytes().to_vec()),
			other => Err(mismatch(TypeTag::TEXT, other)),
		}
	}

	fn decode(&self, raw: &[u8]) -> Result<Node> {
		std::str::from_utf8(raw)
			.map(|text| Node::Text(text.to_owned()))
			.map_err(|e| Error::invalid(TypeTag::TEXT, e.to_string()))
	}
}

/// Codec for [`Node::Bytes`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesCodec;

impl AtomCodec for BytesCodec {
	fn encode(&self, node: &Node) -> Result<Vec<u8>> {
		match node {
			Node::Bytes(bytes) => Ok(bytes.clone()),
			other => Err(mismatch(TypeTag::BYTES, other)),
		}
	}

	fn decode(&self, raw: &[u8]) -> Result<Node> {
		Ok(Node::Bytes(raw.to_vec()))
	}
}

#[cfg(test)]
mod tests;
