//! Node and handle types.

use std::fmt;

use crate::TypeTag;

/// Handle of a node inside one [`crate::Graph`].
///
/// Ids are only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
	/// Position of the node in its arena.
	#[inline]
	pub const fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// One value in a graph.
///
/// Atoms own their payload. Containers own only child ids; the children live
/// elsewhere in the same arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	/// The absent-value marker.
	None,
	/// A boolean.
	Bool(bool),
	/// A signed integer.
	Int(i64),
	/// UTF-8 text.
	Text(String),
	/// A raw byte string.
	Bytes(Vec<u8>),
	/// Elements in order.
	List(Vec<NodeId>),
	/// Key-value entries in insertion order.
	Map(Vec<(NodeId, NodeId)>),
	/// A user-defined container: its tag, opaque header bytes, and children.
	Tagged {
		/// Registered type of this container.
		tag: TypeTag,
		/// Container-specific header carried verbatim.
		header: Vec<u8>,
		/// Children in order.
		children: Vec<NodeId>,
	},
}

impl Node {
	/// The semantic type of this node.
	pub const fn tag(&self) -> TypeTag {
		match self {
			Self::None => TypeTag::NONE,
			Self::Bool(_) => TypeTag::BOOL,
			Self::Int(_) => TypeTag::INT,
			Self::Text(_) => TypeTag::TEXT,
			Self::Bytes(_) => TypeTag::BYTES,
			Self::List(_) => TypeTag::LIST,
			Self::Map(_) => TypeTag::MAP,
			Self::Tagged { tag, .. } => *tag,
		}
	}

	/// Returns true for nodes that reference other nodes.
	pub const fn is_container(&self) -> bool {
		matches!(self, Self::List(_) | Self::Map(_) | Self::Tagged { .. })
	}

	/// Child ids in traversal order (map entries yield key then value).
	pub fn children(&self) -> Vec<NodeId> {
		match self {
			Self::List(items) => items.clone(),
			Self::Map(entries) => entries.iter().flat_map(|&(k, v)| [k, v]).collect(),
			Self::Tagged { children, .. } => children.clone(),
			_ => Vec::new(),
		}
	}
}
