//! Composite value codecs.
//!
//! A container is written as an opaque header plus an ordered list of child
//! references. Handlers never recurse themselves: [`ContainerCodec::split`] reports
//! the children and the pack engine visits them, and on the way back the unpack
//! engine registers the node returned by [`ContainerCodec::shell`] before resolving
//! any child, then hands the resolved ids to [`ContainerCodec::fill`].

use tangle_graph::{Node, NodeId, TypeTag};
use tangle_wire::{Cursor, varint};

use crate::error::{Error, Result};

/// Header and children of one container, as produced by [`ContainerCodec::split`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Packed {
	/// Opaque container header.
	pub header: Vec<u8>,
	/// Children in the order they are written.
	pub children: Vec<NodeId>,
}

/// Converts one kind of container node to and from header bytes plus children.
pub trait ContainerCodec: Send + Sync {
	/// Splits `node` into its header and child ids, in a stable order.
	fn split(&self, node: &Node) -> Result<Packed>;

	/// Builds the empty instance that is registered before children resolve.
	fn shell(&self, header: &[u8]) -> Result<Node>;

	/// Inserts resolved children into the registered shell, in wire order.
	///
	/// `shell` may already be referenced from inside `children` when the container
	/// is part of a cycle.
	fn fill(&self, shell: &mut Node, header: &[u8], children: Vec<NodeId>) -> Result<()>;
}

/// Codec for [`Node::List`]: empty header, one child per element.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListCodec;

impl ContainerCodec for ListCodec {
	fn split(&self, node: &Node) -> Result<Packed> {
		match node {
			Node::List(items) => Ok(Packed {
				header: Vec::new(),
				children: items.clone(),
			}),
			other => Err(Error::KindMismatch {
				tag: TypeTag::LIST,
				found: other.tag(),
			}),
		}
	}

	fn shell(&self, _header: &[u8]) -> Result<Node> {
		Ok(Node::List(Vec::new()))
	}

	fn fill(&self, shell: &mut Node, _header: &[u8], children: Vec<NodeId>) -> Result<()> {
		match shell {
			Node::List(items) => {
				items.extend(children);
				Ok(())
			}
			other => Err(Error::KindMismatch {
				tag: TypeTag::LIST,
				found: other.tag(),
			}),
		}
	}
}

/// Codec for [`Node::Map`].
///
/// The header is the varint entry count. Children are every key in entry order
/// followed by every value in entry order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapCodec;

impl MapCodec {
	fn entry_count(header: &[u8]) -> Result<usize> {
		let mut cursor = Cursor::new(header);
		let count = cursor
			.read_len()
			.map_err(|e| Error::invalid(TypeTag::MAP, format!("bad entry count: {e}")))?;
		if !cursor.is_empty() {
			return Err(Error::invalid(TypeTag::MAP, "trailing bytes after entry count"));
		}
		Ok(count)
	}
}

impl ContainerCodec for MapCodec {
	fn split(&self, node: &Node) -> Result<Packed> {
		let Node::Map(entries) = node else {
			return Err(Error::KindMismatch {
				tag: TypeTag::MAP,
				found: node.tag(),
			});
		};
		let mut children = Vec::with_capacity(entries.len() * 2);
		children.extend(entries.iter().map(|&(key, _)| key));
		children.extend(entries.iter().map(|&(_, value)| value));
		Ok(Packed {
			header: varint::encode(entries.len() as u64),
			children,
		})
	}

	fn shell(&self, header: &[u8]) -> Result<Node> {
		Self::entry_count(header)?;
		Ok(Node::Map(Vec::new()))
	}

	fn fill(&self, shell: &mut Node, header: &[u8], children: Vec<NodeId>) -> Result<()> {
		let count = Self::entry_count(header)?;
		if count.checked_mul(2) != Some(children.len()) {
			return Err(Error::invalid(
				TypeTag::MAP,
				format!("{count} entries but {} children", children.len()),
			));
		}
		let Node::Map(entries) = shell else {
			return Err(Error::KindMismatch {
				tag: TypeTag::MAP,
				found: shell.tag(),
			});
		};
		let (keys, values) = children.split_at(count);
		entries.extend(keys.iter().copied().zip(values.iter().copied()));
		Ok(())
	}
}

/// Codec for user-defined [`Node::Tagged`] containers registered under `tag`.
///
/// The node's header bytes travel verbatim and its children keep their order.
#[derive(Debug, Clone, Copy)]
pub struct TaggedCodec {
	tag: TypeTag,
}

impl TaggedCodec {
	/// Creates a codec for nodes tagged `tag`.
	pub const fn new(tag: TypeTag) -> Self {
		Self { tag }
	}
}

impl ContainerCodec for TaggedCodec {
	fn split(&self, node: &Node) -> Result<Packed> {
		match node {
			Node::Tagged {
				tag,
				header,
				children,
			} if *tag == self.tag => Ok(Packed {
				header: header.clone(),
				children: children.clone(),
			}),
			other => Err(Error::KindMismatch {
				tag: self.tag,
				found: other.tag(),
			}),
		}
	}

	fn shell(&self, header: &[u8]) -> Result<Node> {
		Ok(Node::Tagged {
			tag: self.tag,
			header: header.to_vec(),
			children: Vec::new(),
		})
	}

	fn fill(&self, shell: &mut Node, _header: &[u8], children: Vec<NodeId>) -> Result<()> {
		match shell {
			Node::Tagged { children: slots, .. } => {
				slots.extend(children);
				Ok(())
			}
			other => Err(Error::KindMismatch {
				tag: self.tag,
				found: other.tag(),
			}),
		}
	}
}
