//! Bounds-checked reading over a borrowed byte slice.

use crate::error::{Result, WireError};
use crate::varint;

/// Forward-only reader over a borrowed slice.
///
/// Slices handed out by [`Cursor::take`] borrow the underlying buffer, so record
/// bodies are never copied while a stream is being split. Reported offsets are
/// shifted by `base`, which lets a cursor over a sub-slice describe positions in
/// the enclosing stream.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	buf: &'a [u8],
	pos: usize,
	base: usize,
}

impl<'a> Cursor<'a> {
	/// Creates a cursor at the start of `buf`.
	pub const fn new(buf: &'a [u8]) -> Self {
		Self::with_base(buf, 0)
	}

	/// Creates a cursor whose offsets are reported relative to `base`.
	pub const fn with_base(buf: &'a [u8], base: usize) -> Self {
		Self { buf, pos: 0, base }
	}

	/// Absolute offset of the next unread byte.
	#[inline]
	pub const fn offset(&self) -> usize {
		self.base + self.pos
	}

	/// Bytes left to read.
	#[inline]
	pub const fn remaining(&self) -> usize {
		self.buf.len() - self.pos
	}

	/// Returns true once every byte has been consumed.
	#[inline]
	pub const fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// The unread tail, without consuming it.
	pub fn rest(&self) -> &'a [u8] {
		&self.buf[self.pos..]
	}

	/// Reads one varint.
	pub fn read_varint(&mut self) -> Result<u64> {
		let (value, next) = varint::decode(self.buf, self.pos).map_err(|e| self.rebase(e))?;
		self.pos = next;
		Ok(value)
	}

	/// Reads one varint that must fit a `usize` (lengths and counts).
	pub fn read_len(&mut self) -> Result<usize> {
		let offset = self.offset();
		let value = self.read_varint()?;
		usize::try_from(value).map_err(|_| WireError::Overflow { offset })
	}

	/// Reads a single byte.
	pub fn read_u8(&mut self, context: &'static str) -> Result<u8> {
		let byte = *self.buf.get(self.pos).ok_or(WireError::Truncated {
			offset: self.offset(),
			context,
		})?;
		self.pos += 1;
		Ok(byte)
	}

	/// Borrows the next `len` bytes.
	pub fn take(&mut self, len: usize, context: &'static str) -> Result<&'a [u8]> {
		if len > self.remaining() {
			return Err(WireError::Truncated {
				offset: self.offset(),
				context,
			});
		}
		let slice = &self.buf[self.pos..self.pos + len];
		self.pos += len;
		Ok(slice)
	}

	fn rebase(&self, err: WireError) -> WireError {
		match err {
			WireError::Truncated { offset, context } => WireError::Truncated {
				offset: offset + self.base,
				context,
			},
			WireError::Overflow { offset } => WireError::Overflow {
				offset: offset + self.base,
			},
			WireError::Malformed { offset, reason } => WireError::Malformed {
				offset: offset + self.base,
				reason,
			},
		}
	}
}
