//! Packer and unpacker over one registry.

use std::sync::Arc;

use tangle_graph::{Graph, NodeId};

use crate::config::CodecConfig;
use crate::error::Result;
use crate::pack::Packer;
use crate::registry::TypeRegistry;
use crate::unpack::Unpacker;

/// Both engines sharing one registry and one set of limits.
///
/// Streams produced by [`Codec::pack`] decode with [`Codec::unpack`] of any codec
/// built from the same registrations.
#[derive(Debug, Clone)]
pub struct Codec {
	packer: Packer,
	unpacker: Unpacker,
}

impl Codec {
	/// Creates a codec over `registry` with default limits.
	pub fn new(registry: Arc<TypeRegistry>) -> Self {
		Self::with_config(registry, CodecConfig::default())
	}

	/// Creates a codec over `registry` with explicit limits.
	pub fn with_config(registry: Arc<TypeRegistry>, config: CodecConfig) -> Self {
		Self {
			packer: Packer::with_config(registry.clone(), config.clone()),
			unpacker: Unpacker::with_config(registry, config),
		}
	}

	/// A codec over the standard profile.
	pub fn standard() -> Self {
		Self::new(Arc::new(TypeRegistry::standard()))
	}

	/// The pack half.
	pub fn packer(&self) -> &Packer {
		&self.packer
	}

	/// The unpack half.
	pub fn unpacker(&self) -> &Unpacker {
		&self.unpacker
	}

	/// See [`Packer::pack`].
	pub fn pack(&self, graph: &Graph, root: NodeId) -> Result<Vec<u8>> {
		self.packer.pack(graph, root)
	}

	/// See [`Unpacker::unpack`].
	pub fn unpack(&self, bytes: &[u8]) -> Result<(Graph, NodeId)> {
		self.unpacker.unpack(bytes)
	}
}

impl Default for Codec {
	fn default() -> Self {
		Self::standard()
	}
}
