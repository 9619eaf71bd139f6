//! Errors raised by the pack and unpack engines.

use std::fmt;

use tangle_graph::{NodeId, TypeTag};
use tangle_wire::WireError;
use thiserror::Error;

use crate::identity::Token;

/// What had no handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unregistered {
	/// A node's tag while packing.
	Tag(TypeTag),
	/// A wire type code while unpacking.
	Code {
		/// The code read from the type table.
		code: u64,
		/// The record carrying it.
		token: Token,
	},
}

impl fmt::Display for Unregistered {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Tag(tag) => write!(f, "tag `{tag}`"),
			Self::Code { code, token } => write!(f, "type code {code} (record {token})"),
		}
	}
}

/// Pack and unpack failures.
///
/// Every variant aborts the call that raised it; no partial stream or graph is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
	/// A value or wire type code has no registered handler.
	#[error("unregistered type: {0}")]
	UnregisteredType(Unregistered),

	/// Truncated or malformed framing.
	#[error(transparent)]
	Wire(#[from] WireError),

	/// Atom or container bytes that the handler cannot decode.
	#[error("invalid `{tag}` encoding: {reason}")]
	InvalidEncoding {
		/// Type being decoded.
		tag: TypeTag,
		/// What was wrong with the bytes.
		reason: String,
	},

	/// The graph nests deeper than the configured limit.
	#[error("nesting depth exceeds limit of {limit}")]
	DepthExceeded {
		/// The configured `max_depth`.
		limit: usize,
	},

	/// The input is longer than the configured limit.
	#[error("input of {len} bytes exceeds limit of {limit}")]
	InputTooLarge {
		/// Length of the rejected input.
		len: usize,
		/// The configured `max_input_len`.
		limit: usize,
	},

	/// A container record references an index outside the record table.
	#[error("record {token} references missing record {child}")]
	Dangling {
		/// The referencing record.
		token: Token,
		/// The out-of-range child index.
		child: u64,
	},

	/// A record's framing kind disagrees with its registered handler.
	#[error("record {token} is framed as {found} but `{tag}` expects {expected}")]
	RecordKind {
		/// The offending record.
		token: Token,
		/// Tag its type code maps to.
		tag: TypeTag,
		/// Framing the handler expects.
		expected: &'static str,
		/// Framing found on the wire.
		found: &'static str,
	},

	/// A handler was given a node of another shape.
	#[error("`{tag}` handler cannot encode a `{found}` node")]
	KindMismatch {
		/// Tag the handler is registered under.
		tag: TypeTag,
		/// Tag of the node it was given.
		found: TypeTag,
	},

	/// A token outside the session's record table.
	#[error("record {0} is not in the session")]
	UnknownToken(Token),

	/// A node id does not belong to the graph being packed or filled.
	#[error("node {0} is not in the graph")]
	UnknownNode(NodeId),

	/// A session token has no finished record.
	///
	/// Happens when a session is reused after a failed call.
	#[error("record {token} was never completed")]
	Incomplete {
		/// The unfinished token.
		token: Token,
	},
}

impl Error {
	pub(crate) fn invalid(tag: TypeTag, reason: impl Into<String>) -> Self {
		Self::InvalidEncoding {
			tag,
			reason: reason.into(),
		}
	}
}

/// Result type for codec operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
