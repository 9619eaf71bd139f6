//! The node arena.

use crate::error::{GraphError, Result};
use crate::{Node, NodeId, TypeTag};

/// Arena of nodes.
///
/// Nodes are never removed, so every issued [`NodeId`] stays valid for the life of
/// the graph. Containers are usually created empty and filled afterwards, which is
/// how shared and self-referencing structures are built:
///
/// ```
/// use tangle_graph::{Graph, Node};
///
/// let mut graph = Graph::new();
/// let list = graph.list([]);
/// graph.list_push(list, list).unwrap();
/// assert_eq!(graph.get(list), Some(&Node::List(vec![list])));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
	nodes: Vec<Node>,
}

impl Graph {
	/// Creates an empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty graph with room for `capacity` nodes.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			nodes: Vec::with_capacity(capacity),
		}
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Returns true if the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Adds a node and returns its id.
	///
	/// # Panics
	///
	/// If the arena already holds `u32::MAX` nodes.
	pub fn push(&mut self, node: Node) -> NodeId {
		let id = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
		assert!(id < u32::MAX, "graph arena exhausted");
		self.nodes.push(node);
		NodeId(id)
	}

	/// Looks up a node.
	pub fn get(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id.index())
	}

	/// Looks up a node for in-place mutation.
	pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.nodes.get_mut(id.index())
	}

	/// Returns true if `id` was issued by this graph.
	pub fn contains(&self, id: NodeId) -> bool {
		id.index() < self.nodes.len()
	}

	/// Iterates nodes with their ids in creation order.
	pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
		self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i as u32), node))
	}

	/// Adds the absent-value marker.
	pub fn none(&mut self) -> NodeId {
		self.push(Node::None)
	}

	/// Adds a boolean.
	pub fn bool(&mut self, value: bool) -> NodeId {
		self.push(Node::Bool(value))
	}

	/// Adds an integer.
	pub fn int(&mut self, value: i64) -> NodeId {
		self.push(Node::Int(value))
	}

	/// Adds a text value.
	pub fn text(&mut self, value: impl Into<String>) -> NodeId {
		self.push(Node::Text(value.into()))
	}

	/// Adds a byte string.
	pub fn bytes(&mut self, value: impl Into<Vec<u8>>) -> NodeId {
		self.push(Node::Bytes(value.into()))
	}

	/// Adds a list of existing nodes.
	pub fn list(&mut self, items: impl IntoIterator<Item = NodeId>) -> NodeId {
		self.push(Node::List(items.into_iter().collect()))
	}

	/// Adds a map of existing nodes.
	pub fn map(&mut self, entries: impl IntoIterator<Item = (NodeId, NodeId)>) -> NodeId {
		self.push(Node::Map(entries.into_iter().collect()))
	}

	/// Adds a user-defined container.
	pub fn tagged(
		&mut self,
		tag: TypeTag,
		header: impl Into<Vec<u8>>,
		children: impl IntoIterator<Item = NodeId>,
	) -> NodeId {
		self.push(Node::Tagged {
			tag,
			header: header.into(),
			children: children.into_iter().collect(),
		})
	}

	/// Appends `item` to the list at `list`.
	pub fn list_push(&mut self, list: NodeId, item: NodeId) -> Result<()> {
		self.check(item)?;
		match self.node_mut(list)? {
			Node::List(items) => {
				items.push(item);
				Ok(())
			}
			other => Err(GraphError::WrongKind {
				id: list,
				expected: TypeTag::LIST,
				found: other.tag(),
			}),
		}
	}

	/// Appends an entry to the map at `map`.
	pub fn map_insert(&mut self, map: NodeId, key: NodeId, value: NodeId) -> Result<()> {
		self.check(key)?;
		self.check(value)?;
		match self.node_mut(map)? {
			Node::Map(entries) => {
				entries.push((key, value));
				Ok(())
			}
			other => Err(GraphError::WrongKind {
				id: map,
				expected: TypeTag::MAP,
				found: other.tag(),
			}),
		}
	}

	fn check(&self, id: NodeId) -> Result<()> {
		if self.contains(id) {
			Ok(())
		} else {
			Err(GraphError::UnknownNode(id))
		}
	}

	fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
		self.nodes.get_mut(id.index()).ok_or(GraphError::UnknownNode(id))
	}
}
