//! Base-128 unsigned integers, most significant group first.
//!
//! Every byte carries seven payload bits. The high bit is clear on all bytes except
//! the last one, where it is set and terminates the number, so zero encodes as the
//! single byte `0x80`. Redundant leading zero groups decode fine but are never
//! produced.

use crate::error::{Result, WireError};

/// High bit marking the final (least significant) group.
pub const TERMINATOR: u8 = 0x80;

const PAYLOAD: u8 = 0x7f;

/// Longest canonical encoding of a `u64`.
pub const MAX_LEN: usize = 10;

/// Number of bytes [`write`] emits for `value`.
pub const fn encoded_len(value: u64) -> usize {
	let bits = (u64::BITS - value.leading_zeros()) as usize;
	if bits == 0 { 1 } else { bits.div_ceil(7) }
}

/// Appends the encoding of `value` to `out`.
pub fn write(value: u64, out: &mut Vec<u8>) {
	let groups = encoded_len(value);
	out.reserve(groups);
	for shift in (1..groups).rev() {
		out.push(((value >> (7 * shift)) as u8) & PAYLOAD);
	}
	out.push((value as u8 & PAYLOAD) | TERMINATOR);
}

/// Returns the encoding of `value` as a fresh buffer.
#[must_use]
pub fn encode(value: u64) -> Vec<u8> {
	let mut out = Vec::with_capacity(encoded_len(value));
	write(value, &mut out);
	out
}

/// Decodes the varint starting at `start`.
///
/// Returns the value and the offset just past its terminator byte.
///
/// # Errors
///
/// [`WireError::Truncated`] if no terminator appears before the end of `buf`,
/// [`WireError::Overflow`] if the value needs more than 64 bits.
pub fn decode(buf: &[u8], start: usize) -> Result<(u64, usize)> {
	let mut value: u64 = 0;
	let mut pos = start;
	loop {
		let Some(&byte) = buf.get(pos) else {
			return Err(WireError::Truncated {
				offset: start,
				context: "varint without terminator",
			});
		};
		if value >> (u64::BITS - 7) != 0 {
			return Err(WireError::Overflow { offset: start });
		}
		value = (value << 7) | u64::from(byte & PAYLOAD);
		pos += 1;
		if byte & TERMINATOR != 0 {
			return Ok((value, pos));
		}
	}
}
