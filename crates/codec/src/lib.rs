//! Identity-preserving binary codec for cyclic value graphs.
//!
//! # Purpose
//!
//! Serializes a [`Graph`] rooted at some node into a compact self-describing byte
//! stream and rebuilds an isomorphic graph from it. Shared nodes are written once
//! and cycles are closed by reference, so the decoded graph has the same sharing
//! and the same cycles as the input.
//!
//! # Mental Model
//!
//! 1. **Registration:** a [`RegistryBuilder`] collects one handler per [`TypeTag`]
//!    ([`AtomCodec`] or [`ContainerCodec`]) with an optional priority. [`RegistryBuilder::build`]
//!    freezes it into a [`TypeRegistry`] that assigns every tag a wire [`TypeCode`].
//! 2. **Packing:** [`Packer`] walks the graph depth-first. Each node gets a session
//!    [`Token`]; a node whose token already has a payload is skipped, which both
//!    deduplicates shared nodes and stops cycles. Tokens are renumbered densely when
//!    the stream is assembled.
//! 3. **Unpacking:** [`Unpacker::split`] indexes the stream into one raw record per
//!    token. [`Unpacker::unpack_token`] resolves records lazily from the root,
//!    reusing already-resolved nodes.
//!
//! # Invariants
//!
//! - Login before recursion: a container's placeholder payload (pack side) or empty
//!   shell node (unpack side) is registered against its token before any child is
//!   visited. Both engines do this themselves; handlers only split and fill.
//! - Session scope: tokens live in a [`PackSession`] or [`UnpackSession`] created per
//!   call. Nothing survives a call except the immutable registry.
//! - Symmetric tables: packer and unpacker must be built from the same registrations
//!   in the same order. This is a contract between processes and is not checked on
//!   the wire beyond failing on codes with no handler.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`TypeRegistry`] | Immutable tag/code table with handlers, shared via `Arc`. |
//! | [`Packer`] | Graph to bytes. |
//! | [`Unpacker`] | Bytes to graph. |
//! | [`Codec`] | A packer and unpacker over one registry. |
//! | [`CodecConfig`] | Recursion and input limits. |

pub mod atom;
pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod identity;
pub mod pack;
pub mod registry;
pub mod unpack;

pub use atom::{AtomCodec, BoolCodec, BytesCodec, IntCodec, NoneCodec, TextCodec};
pub use codec::Codec;
pub use config::{CodecConfig, ConfigError};
pub use container::{ContainerCodec, ListCodec, MapCodec, Packed, TaggedCodec};
pub use error::{Error, Result, Unregistered};
pub use identity::{Identities, Token};
pub use pack::{PackSession, Packer};
pub use registry::{Entry, Handler, RegistryBuilder, RegistryError, TypeCode, TypeRegistry};
pub use tangle_graph::{Graph, Node, NodeId, TypeTag, isomorphic};
pub use unpack::{UnpackSession, Unpacker};
