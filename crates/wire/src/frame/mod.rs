//! Stream header, type table and record framing.
//!
//! [`StreamWriter`] accumulates `(type code, record)` pairs in dense index order and
//! joins them behind the header. [`Stream::parse`] does the inverse: it slices the
//! two sections out of a buffer and [`Records`] walks them in lock-step, yielding
//! one borrowed [`RecordBody`] per dense index.

use crate::cursor::Cursor;
use crate::error::{Result, WireError};
use crate::varint;

/// Leading byte of an atom record body.
pub const ATOM_TAG: u8 = 0x00;
/// Leading byte of a container record body.
pub const CONTAINER_TAG: u8 = 0x01;

/// The three varints that open every stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
	/// Dense index of the root record.
	pub root: u64,
	/// Byte length of the type-table section.
	pub types_len: usize,
	/// Byte length of the data section.
	pub data_len: usize,
}

impl StreamHeader {
	/// Appends the header encoding to `out`.
	pub fn write(&self, out: &mut Vec<u8>) {
		varint::write(self.root, out);
		varint::write(self.types_len as u64, out);
		varint::write(self.data_len as u64, out);
	}

	/// Reads a header from the front of `cursor`.
	pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			root: cursor.read_varint()?,
			types_len: cursor.read_len()?,
			data_len: cursor.read_len()?,
		})
	}
}

/// Body of one record, borrowed from the stream buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordBody<'a> {
	/// Raw atom bytes, already stripped of the tag byte.
	Atom(&'a [u8]),
	/// Opaque container header followed by child indices in wire order.
	Container {
		/// Container-specific header bytes.
		header: &'a [u8],
		/// Dense indices of the children.
		children: Vec<u64>,
	},
}

impl<'a> RecordBody<'a> {
	/// Parses a record body (everything after the record length prefix).
	///
	/// `offset` is the absolute position of `body` and is only used for errors.
	pub fn parse(body: &'a [u8], offset: usize) -> Result<Self> {
		let mut cursor = Cursor::with_base(body, offset);
		let tag = cursor.read_u8("record tag").map_err(|_| WireError::Malformed {
			offset,
			reason: "empty record",
		})?;
		match tag {
			ATOM_TAG => Ok(Self::Atom(cursor.rest())),
			CONTAINER_TAG => {
				let header_len = cursor.read_len()?;
				let header = cursor.take(header_len, "container header")?;
				let mut children = Vec::new();
				while !cursor.is_empty() {
					children.push(cursor.read_varint()?);
				}
				Ok(Self::Container { header, children })
			}
			_ => Err(WireError::Malformed {
				offset,
				reason: "unknown record tag",
			}),
		}
	}

	/// Encoded byte length of this body, excluding the length prefix.
	pub fn encoded_len(&self) -> usize {
		match self {
			Self::Atom(raw) => atom_len(raw),
			Self::Container { header, children } => container_len(header, children),
		}
	}
}

fn atom_len(raw: &[u8]) -> usize {
	1 + raw.len()
}

fn container_len(header: &[u8], children: &[u64]) -> usize {
	1 + varint::encoded_len(header.len() as u64)
		+ header.len()
		+ children.iter().map(|&c| varint::encoded_len(c)).sum::<usize>()
}

/// Accumulates records in dense index order and produces the final stream.
#[derive(Debug, Default)]
pub struct StreamWriter {
	types: Vec<u8>,
	data: Vec<u8>,
	records: usize,
}

impl StreamWriter {
	/// Creates an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of records pushed so far.
	pub const fn len(&self) -> usize {
		self.records
	}

	/// Returns true if no record has been pushed.
	pub const fn is_empty(&self) -> bool {
		self.records == 0
	}

	/// Appends an atom record at the next dense index.
	pub fn push_atom(&mut self, code: u64, raw: &[u8]) {
		varint::write(code, &mut self.types);
		varint::write(atom_len(raw) as u64, &mut self.data);
		self.data.push(ATOM_TAG);
		self.data.extend_from_slice(raw);
		self.records += 1;
	}

	/// Appends a container record at the next dense index.
	pub fn push_container(&mut self, code: u64, header: &[u8], children: &[u64]) {
		varint::write(code, &mut self.types);
		varint::write(container_len(header, children) as u64, &mut self.data);
		self.data.push(CONTAINER_TAG);
		varint::write(header.len() as u64, &mut self.data);
		self.data.extend_from_slice(header);
		for &child in children {
			varint::write(child, &mut self.data);
		}
		self.records += 1;
	}

	/// Joins header, type table and data section.
	#[must_use]
	pub fn finish(self, root: u64) -> Vec<u8> {
		let header = StreamHeader {
			root,
			types_len: self.types.len(),
			data_len: self.data.len(),
		};
		let mut out = Vec::with_capacity(3 * varint::MAX_LEN + self.types.len() + self.data.len());
		header.write(&mut out);
		out.extend_from_slice(&self.types);
		out.extend_from_slice(&self.data);
		out
	}
}

/// A stream split into its header and two sections.
#[derive(Debug, Clone)]
pub struct Stream<'a> {
	header: StreamHeader,
	types: &'a [u8],
	types_offset: usize,
	data: &'a [u8],
	data_offset: usize,
}

impl<'a> Stream<'a> {
	/// Reads the header and slices out the type table and data sections.
	///
	/// Bytes after the data section are ignored.
	///
	/// # Errors
	///
	/// [`WireError::Truncated`] if the header or either section runs past the end of
	/// `buf`.
	pub fn parse(buf: &'a [u8]) -> Result<Self> {
		let mut cursor = Cursor::new(buf);
		let header = StreamHeader::read(&mut cursor)?;
		let types_offset = cursor.offset();
		let types = cursor.take(header.types_len, "type table section")?;
		let data_offset = cursor.offset();
		let data = cursor.take(header.data_len, "data section")?;
		Ok(Self {
			header,
			types,
			types_offset,
			data,
			data_offset,
		})
	}

	/// The decoded header.
	pub const fn header(&self) -> StreamHeader {
		self.header
	}

	/// Iterates `(type code, body)` pairs in dense index order.
	pub fn records(&self) -> Records<'a> {
		Records {
			types: Cursor::with_base(self.types, self.types_offset),
			data: Cursor::with_base(self.data, self.data_offset),
			done: false,
		}
	}
}

/// Lock-step iterator over the type table and data sections.
///
/// Yields at most one error, after which it is exhausted.
#[derive(Debug, Clone)]
pub struct Records<'a> {
	types: Cursor<'a>,
	data: Cursor<'a>,
	done: bool,
}

impl<'a> Records<'a> {
	fn read_next(&mut self) -> Result<Option<(u64, RecordBody<'a>)>> {
		if self.types.is_empty() {
			if !self.data.is_empty() {
				return Err(WireError::Malformed {
					offset: self.data.offset(),
					reason: "data section has more records than the type table",
				});
			}
			return Ok(None);
		}
		let code = self.types.read_varint()?;
		if self.data.is_empty() {
			return Err(WireError::Truncated {
				offset: self.data.offset(),
				context: "record missing for type table entry",
			});
		}
		let len = self.data.read_len()?;
		let offset = self.data.offset();
		let body = self.data.take(len, "record body")?;
		Ok(Some((code, RecordBody::parse(body, offset)?)))
	}
}

impl<'a> Iterator for Records<'a> {
	type Item = Result<(u64, RecordBody<'a>)>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		match self.read_next() {
			Ok(Some(item)) => Some(Ok(item)),
			Ok(None) => {
				self.done = true;
				None
			}
			Err(err) => {
				self.done = true;
				Some(Err(err))
			}
		}
	}
}
