//! Graph to bytes.
//!
//! Packing is a depth-first walk from the root. Every visited node is identified
//! with a session [`Token`]; the token's payload is recorded before the walk descends
//! into a container, so a later visit to the same node (a shared reference or a
//! cycle back to an ancestor) returns at once. Records are numbered densely in the
//! order they complete: atoms on first visit, containers after all their children.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap as HashMap};
use tangle_graph::{Graph, NodeId};
use tangle_wire::StreamWriter;
use tracing::{debug, trace};

use crate::config::CodecConfig;
use crate::container::Packed;
use crate::error::{Error, Result, Unregistered};
use crate::identity::{Identities, Token};
use crate::registry::{Handler, TypeCode, TypeRegistry};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Payload {
	/// A container whose children are still being visited.
	Placeholder,
	Atom(Vec<u8>),
	Container { header: Vec<u8>, children: Vec<Token> },
}

/// Working state of one pack call.
///
/// Owned by a single call (or a single caller driving [`Packer::pack_into`]) and
/// consumed by [`Packer::finalize`]. Discard a session after any error.
#[derive(Debug, Default)]
pub struct PackSession {
	ids: Identities<NodeId>,
	/// Completion order doubles as the dense index order.
	codes: IndexMap<Token, TypeCode, FxBuildHasher>,
	payloads: HashMap<Token, Payload>,
}

impl PackSession {
	/// Creates an empty session.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of completed records.
	pub fn len(&self) -> usize {
		self.codes.len()
	}

	/// Returns true if no record has been completed.
	pub fn is_empty(&self) -> bool {
		self.codes.is_empty()
	}

	/// Token already assigned to `node`, if it has been visited.
	pub fn token_of(&self, node: NodeId) -> Option<Token> {
		self.ids.get(&node)
	}
}

/// Serializes graphs using one type registry.
#[derive(Debug, Clone)]
pub struct Packer {
	registry: Arc<TypeRegistry>,
	config: CodecConfig,
}

impl Packer {
	/// Creates a packer with default limits.
	pub fn new(registry: Arc<TypeRegistry>) -> Self {
		Self::with_config(registry, CodecConfig::default())
	}

	/// Creates a packer with explicit limits.
	pub fn with_config(registry: Arc<TypeRegistry>, config: CodecConfig) -> Self {
		Self { registry, config }
	}

	/// The registry this packer dispatches on.
	pub fn registry(&self) -> &Arc<TypeRegistry> {
		&self.registry
	}

	/// Serializes the graph reachable from `root`.
	///
	/// # Errors
	///
	/// [`Error::UnregisteredType`] for a node whose tag has no handler,
	/// [`Error::DepthExceeded`] for nesting beyond the configured limit, or any
	/// handler error. No bytes are produced on failure.
	pub fn pack(&self, graph: &Graph, root: NodeId) -> Result<Vec<u8>> {
		let mut session = PackSession::new();
		let token = self.pack_into(graph, root, &mut session)?;
		self.finalize(token, session)
	}

	/// Adds the graph reachable from `root` to `session` and returns the root's token.
	///
	/// Several roots from the same graph may share one session; nodes they have in
	/// common are recorded once.
	pub fn pack_into(&self, graph: &Graph, root: NodeId, session: &mut PackSession) -> Result<Token> {
		self.visit(graph, root, session, 0)
	}

	fn visit(&self, graph: &Graph, id: NodeId, session: &mut PackSession, depth: usize) -> Result<Token> {
		let token = session.ids.identify(id);
		if session.payloads.contains_key(&token) {
			return Ok(token);
		}

		let node = graph.get(id).ok_or(Error::UnknownNode(id))?;
		let tag = node.tag();
		let entry = self
			.registry
			.entry(tag)
			.ok_or(Error::UnregisteredType(Unregistered::Tag(tag)))?;

		let payload = match entry.handler() {
			Handler::Atom(codec) => Payload::Atom(codec.encode(node)?),
			Handler::Container(codec) => {
				if depth >= self.config.max_depth {
					return Err(Error::DepthExceeded {
						limit: self.config.max_depth,
					});
				}
				session.payloads.insert(token, Payload::Placeholder);
				let Packed { header, children } = codec.split(node)?;
				let mut tokens = Vec::with_capacity(children.len());
				for child in children {
					tokens.push(self.visit(graph, child, session, depth + 1)?);
				}
				Payload::Container {
					header,
					children: tokens,
				}
			}
		};

		trace!(%token, %tag, code = entry.code().get(), "record packed");
		session.payloads.insert(token, payload);
		session.codes.insert(token, entry.code());
		Ok(token)
	}

	/// Renumbers the session densely and writes the stream with `root` as its root.
	///
	/// # Errors
	///
	/// [`Error::Incomplete`] if the session holds references to records that never
	/// finished, which only happens when a session outlives a failed call.
	pub fn finalize(&self, root: Token, session: PackSession) -> Result<Vec<u8>> {
		let mut dense: Identities<Token> = Identities::new();
		for &token in session.codes.keys() {
			dense.identify(token);
		}
		let dense_index = |token: Token| {
			dense
				.get(&token)
				.map(|t| t.index() as u64)
				.ok_or(Error::Incomplete { token })
		};

		let mut writer = StreamWriter::new();
		for (&token, code) in &session.codes {
			match session.payloads.get(&token) {
				Some(Payload::Atom(raw)) => writer.push_atom(code.get(), raw),
				Some(Payload::Container { header, children }) => {
					let children = children.iter().map(|&c| dense_index(c)).collect::<Result<Vec<_>>>()?;
					writer.push_container(code.get(), header, &children);
				}
				Some(Payload::Placeholder) | None => return Err(Error::Incomplete { token }),
			}
		}

		let root_index = dense_index(root)?;
		let records = writer.len();
		let bytes = writer.finish(root_index);
		debug!(records, bytes = bytes.len(), root = root_index, "graph packed");
		Ok(bytes)
	}
}

#[cfg(test)]
mod tests;
