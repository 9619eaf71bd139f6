//! Bytes to graph.
//!
//! [`Unpacker::split`] indexes a stream into one raw record per token without
//! decoding anything. [`Unpacker::unpack_token`] then resolves records on demand,
//! starting from whichever token the caller asks for. A container's empty shell is
//! pushed into the output graph and recorded as the token's value before any of its
//! children are resolved, so a child that points back at an ancestor gets the
//! ancestor's id instead of recursing.

use std::sync::Arc;

use tangle_graph::{Graph, NodeId};
use tangle_wire::{RecordBody, Stream, WireError};
use tracing::{debug, trace};

use crate::config::CodecConfig;
use crate::error::{Error, Result, Unregistered};
use crate::identity::Token;
use crate::registry::{Handler, TypeRegistry};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot<'a> {
	Raw(RecordBody<'a>),
	/// Taken out of the table while its node is being built.
	Resolving,
	Resolved(NodeId),
}

/// Record table of one stream, borrowed from its bytes.
///
/// Holds each record's type code and either its raw body or, once resolved, the
/// id of the node it became. Owned by a single unpack call.
#[derive(Debug, Clone)]
pub struct UnpackSession<'a> {
	codes: Vec<u64>,
	slots: Vec<Slot<'a>>,
}

impl UnpackSession<'_> {
	/// Number of records in the stream.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Returns true for a stream without records.
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Wire type code of a record.
	pub fn type_code(&self, token: Token) -> Option<u64> {
		self.codes.get(token.index()).copied()
	}

	/// Node a record resolved to, if it has been resolved.
	pub fn resolved(&self, token: Token) -> Option<NodeId> {
		match self.slots.get(token.index()) {
			Some(Slot::Resolved(id)) => Some(*id),
			_ => None,
		}
	}

	/// Returns true once a record has a node (possibly still being filled).
	pub fn is_resolved(&self, token: Token) -> bool {
		self.resolved(token).is_some()
	}
}

const fn body_kind(body: &RecordBody<'_>) -> &'static str {
	match body {
		RecordBody::Atom(_) => "an atom",
		RecordBody::Container { .. } => "a container",
	}
}

const fn handler_kind(handler: &Handler) -> &'static str {
	match handler {
		Handler::Atom(_) => "an atom",
		Handler::Container(_) => "a container",
	}
}

fn token_at(index: usize) -> Result<Token> {
	Token::from_index(index as u64).ok_or(Error::Wire(WireError::Malformed {
		offset: 0,
		reason: "more records than tokens can address",
	}))
}

/// Deserializes streams using one type registry.
#[derive(Debug, Clone)]
pub struct Unpacker {
	registry: Arc<TypeRegistry>,
	config: CodecConfig,
}

impl Unpacker {
	/// Creates an unpacker with default limits.
	pub fn new(registry: Arc<TypeRegistry>) -> Self {
		Self::with_config(registry, CodecConfig::default())
	}

	/// Creates an unpacker with explicit limits.
	pub fn with_config(registry: Arc<TypeRegistry>, config: CodecConfig) -> Self {
		Self { registry, config }
	}

	/// The registry this unpacker dispatches on.
	pub fn registry(&self) -> &Arc<TypeRegistry> {
		&self.registry
	}

	/// Decodes a whole stream and returns the rebuilt graph with its root.
	pub fn unpack(&self, bytes: &[u8]) -> Result<(Graph, NodeId)> {
		let (root, mut session) = self.split(bytes)?;
		let mut graph = Graph::with_capacity(session.len());
		let id = self.unpack_token(root, &mut session, &mut graph)?;
		debug!(records = session.len(), nodes = graph.len(), "graph unpacked");
		Ok((graph, id))
	}

	/// Indexes a stream into its record table and returns the root token.
	///
	/// Framing is validated for every record, including ones the root cannot reach;
	/// contents are not decoded.
	///
	/// # Errors
	///
	/// [`Error::InputTooLarge`] past the configured limit, [`Error::Wire`] for
	/// truncated or malformed framing (including a root outside the table), and
	/// [`Error::Dangling`] for a child index outside the table.
	pub fn split<'a>(&self, bytes: &'a [u8]) -> Result<(Token, UnpackSession<'a>)> {
		if let Some(limit) = self.config.max_input_len
			&& bytes.len() > limit
		{
			return Err(Error::InputTooLarge {
				len: bytes.len(),
				limit,
			});
		}

		let stream = Stream::parse(bytes)?;
		let mut codes = Vec::new();
		let mut slots = Vec::new();
		for record in stream.records() {
			let (code, body) = record?;
			codes.push(code);
			slots.push(Slot::Raw(body));
		}

		let count = slots.len() as u64;
		for (index, slot) in slots.iter().enumerate() {
			if let Slot::Raw(RecordBody::Container { children, .. }) = slot
				&& let Some(&child) = children.iter().find(|&&c| c >= count)
			{
				return Err(Error::Dangling {
					token: token_at(index)?,
					child,
				});
			}
		}

		let root = stream.header().root;
		if root >= count {
			return Err(Error::Wire(WireError::Malformed {
				offset: 0,
				reason: "root index outside the record table",
			}));
		}
		let root = token_at(root as usize)?;
		trace!(records = slots.len(), %root, "stream split");
		Ok((root, UnpackSession { codes, slots }))
	}

	/// Resolves `token` (and everything it reaches) into `graph`.
	///
	/// Tokens already resolved in `session` return their existing node, so calling
	/// this for several tokens of one session shares nodes between the results.
	pub fn unpack_token(&self, token: Token, session: &mut UnpackSession<'_>, graph: &mut Graph) -> Result<NodeId> {
		self.resolve(token, session, graph, 0)
	}

	fn resolve(
		&self,
		token: Token,
		session: &mut UnpackSession<'_>,
		graph: &mut Graph,
		depth: usize,
	) -> Result<NodeId> {
		let index = token.index();
		let slot = session.slots.get_mut(index).ok_or(Error::UnknownToken(token))?;
		let body = match std::mem::replace(slot, Slot::Resolving) {
			Slot::Raw(body) => body,
			Slot::Resolved(id) => {
				*slot = Slot::Resolved(id);
				return Ok(id);
			}
			Slot::Resolving => return Err(Error::Incomplete { token }),
		};

		let code = session.codes[index];
		let entry = self
			.registry
			.entry_by_code(code)
			.ok_or(Error::UnregisteredType(Unregistered::Code { code, token }))?;
		let tag = entry.tag();

		match (entry.handler(), body) {
			(Handler::Atom(codec), RecordBody::Atom(raw)) => {
				let id = graph.push(codec.decode(raw)?);
				session.slots[index] = Slot::Resolved(id);
				trace!(%token, %tag, node = %id, "atom resolved");
				Ok(id)
			}
			(Handler::Container(codec), RecordBody::Container { header, children }) => {
				if depth >= self.config.max_depth {
					return Err(Error::DepthExceeded {
						limit: self.config.max_depth,
					});
				}
				let id = graph.push(codec.shell(header)?);
				session.slots[index] = Slot::Resolved(id);

				let mut ids = Vec::with_capacity(children.len());
				for child in children {
					let child_token = Token::from_index(child).ok_or(Error::Dangling { token, child })?;
					ids.push(self.resolve(child_token, session, graph, depth + 1)?);
				}
				let shell = graph.get_mut(id).ok_or(Error::UnknownNode(id))?;
				codec.fill(shell, header, ids)?;
				trace!(%token, %tag, node = %id, "container resolved");
				Ok(id)
			}
			(handler, body) => Err(Error::RecordKind {
				token,
				tag,
				expected: handler_kind(handler),
				found: body_kind(&body),
			}),
		}
	}
}

#[cfg(test)]
mod tests;
