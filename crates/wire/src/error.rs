//! Error types for stream framing.

use thiserror::Error;

/// Failures raised while reading a stream.
///
/// Offsets are absolute positions in the buffer handed to [`crate::Stream::parse`]
/// (or to the [`crate::Cursor`] that produced the error).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
	/// The buffer ended before a complete item could be read.
	#[error("truncated input at offset {offset}: {context}")]
	Truncated {
		/// Where the incomplete item starts.
		offset: usize,
		/// What was being read.
		context: &'static str,
	},

	/// A varint does not fit in 64 bits.
	#[error("varint at offset {offset} overflows 64 bits")]
	Overflow {
		/// Where the varint starts.
		offset: usize,
	},

	/// The bytes are complete but violate the stream grammar.
	#[error("malformed stream at offset {offset}: {reason}")]
	Malformed {
		/// Where the violation was detected.
		offset: usize,
		/// Which rule was broken.
		reason: &'static str,
	},
}

/// Result type for framing operations.
pub type Result<T> = std::result::Result<T, WireError>;
