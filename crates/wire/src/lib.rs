//! Byte-level building blocks of the tangle stream format.
//!
//! Everything here is value-agnostic: it knows about varints, section lengths and
//! record bodies, never about what a type code means. The grammar is:
//!
//! ```text
//! stream         := header types data
//! header         := varint(root_index) varint(len(types)) varint(len(data))
//! types          := (varint(type_code))*
//! data           := (record)*
//! record         := varint(record_len) record_body
//! record_body    := atom_body | container_body
//! atom_body      := 0x00 raw_bytes
//! container_body := 0x01 varint(len(header)) header (varint(child_index))*
//! ```
//!
//! * [`varint`]: the base-128, terminator-high-bit integer encoding used for all metadata
//! * [`Cursor`]: bounds-checked reader that reports absolute stream offsets
//! * [`StreamWriter`] / [`Stream`]: assembling and splitting whole streams

pub mod cursor;
pub mod error;
pub mod frame;
pub mod varint;

pub use cursor::Cursor;
pub use error::{Result, WireError};
pub use frame::{ATOM_TAG, CONTAINER_TAG, RecordBody, Records, Stream, StreamHeader, StreamWriter};
