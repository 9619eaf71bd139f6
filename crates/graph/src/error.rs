//! Graph mutation errors.

use thiserror::Error;

use crate::{NodeId, TypeTag};

/// Errors raised by in-place graph edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
	/// The id does not belong to this graph.
	#[error("node {0} is not in the graph")]
	UnknownNode(NodeId),

	/// The node exists but has a different shape than the edit requires.
	#[error("node {id} is a {found}, expected {expected}")]
	WrongKind {
		/// The node being edited.
		id: NodeId,
		/// Tag the edit requires.
		expected: TypeTag,
		/// Tag the node actually has.
		found: TypeTag,
	},
}

/// Result type for graph edits.
pub type Result<T> = std::result::Result<T, GraphError>;
