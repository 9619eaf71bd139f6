//! Type registration and wire type-code assignment.
//!
//! # Code assignment
//!
//! Atom registrations come first, then container registrations, each in the order
//! they were made. Registrations with an explicit priority receive codes `0..k` in
//! ascending priority, ties keeping registration order; the remaining
//! registrations follow in registration order. The packer and unpacker of a stream
//! must use registries built from identical registrations in identical order.
//!
//! The tie-break between equal explicit priorities is registration order. That is
//! deterministic within one build but nothing pins it across versions of a
//! profile, so profiles that must stay wire compatible should use distinct
//! priorities.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;
use tangle_graph::TypeTag;
use thiserror::Error;
use tracing::{debug, trace};

use crate::atom::{AtomCodec, BoolCodec, BytesCodec, IntCodec, NoneCodec, TextCodec};
use crate::container::{ContainerCodec, ListCodec, MapCodec, TaggedCodec};

/// Wire-level integer naming a registered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeCode(u32);

impl TypeCode {
	/// The code as written to the type table.
	#[inline]
	pub const fn get(self) -> u64 {
		self.0 as u64
	}
}

impl fmt::Display for TypeCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// Registry construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	/// The same tag was registered twice in one builder.
	#[error("type `{0}` registered more than once")]
	DuplicateTag(TypeTag),
}

/// The handler bound to a tag.
#[derive(Clone)]
pub enum Handler {
	/// Encodes straight to bytes.
	Atom(Arc<dyn AtomCodec>),
	/// Encodes to a header plus child references.
	Container(Arc<dyn ContainerCodec>),
}

impl Handler {
	/// Returns true for container handlers.
	pub const fn is_container(&self) -> bool {
		matches!(self, Self::Container(_))
	}
}

impl fmt::Debug for Handler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Atom(_) => "Handler::Atom",
			Self::Container(_) => "Handler::Container",
		})
	}
}

#[derive(Debug, Clone)]
struct Registration {
	tag: TypeTag,
	handler: Handler,
	priority: Option<i32>,
}

/// Collects registrations until [`RegistryBuilder::build`] freezes them.
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
	atoms: Vec<Registration>,
	containers: Vec<Registration>,
}

impl RegistryBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// A builder holding the standard profile.
	///
	/// Registers, all with default priority: `int`, `bool`, `text`, `none`, `bytes`,
	/// `list`, `map`. Built as is this yields codes 0 through 6 in that order.
	pub fn standard() -> Self {
		let mut builder = Self::new();
		builder
			.atom(TypeTag::INT, IntCodec)
			.atom(TypeTag::BOOL, BoolCodec)
			.atom(TypeTag::TEXT, TextCodec)
			.atom(TypeTag::NONE, NoneCodec)
			.atom(TypeTag::BYTES, BytesCodec)
			.container(TypeTag::LIST, ListCodec)
			.container(TypeTag::MAP, MapCodec);
		builder
	}

	/// Number of registrations so far.
	pub fn len(&self) -> usize {
		self.atoms.len() + self.containers.len()
	}

	/// Returns true if nothing has been registered.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Registers an atom handler with default priority.
	pub fn atom(&mut self, tag: TypeTag, codec: impl AtomCodec + 'static) -> &mut Self {
		self.push_atom(tag, Arc::new(codec), None)
	}

	/// Registers an atom handler with an explicit priority.
	pub fn atom_with_priority(
		&mut self,
		tag: TypeTag,
		codec: impl AtomCodec + 'static,
		priority: i32,
	) -> &mut Self {
		self.push_atom(tag, Arc::new(codec), Some(priority))
	}

	/// Registers a container handler with default priority.
	pub fn container(&mut self, tag: TypeTag, codec: impl ContainerCodec + 'static) -> &mut Self {
		self.push_container(tag, Arc::new(codec), None)
	}

	/// Registers a container handler with an explicit priority.
	pub fn container_with_priority(
		&mut self,
		tag: TypeTag,
		codec: impl ContainerCodec + 'static,
		priority: i32,
	) -> &mut Self {
		self.push_container(tag, Arc::new(codec), Some(priority))
	}

	/// Registers a [`TaggedCodec`] for user-defined containers named `tag`.
	pub fn tagged(&mut self, tag: TypeTag) -> &mut Self {
		self.container(tag, TaggedCodec::new(tag))
	}

	/// Registers an already shared atom handler.
	pub fn push_atom(&mut self, tag: TypeTag, codec: Arc<dyn AtomCodec>, priority: Option<i32>) -> &mut Self {
		self.atoms.push(Registration {
			tag,
			handler: Handler::Atom(codec),
			priority,
		});
		self
	}

	/// Registers an already shared container handler.
	pub fn push_container(
		&mut self,
		tag: TypeTag,
		codec: Arc<dyn ContainerCodec>,
		priority: Option<i32>,
	) -> &mut Self {
		self.containers.push(Registration {
			tag,
			handler: Handler::Container(codec),
			priority,
		});
		self
	}

	/// Folds another profile's registrations into this one.
	///
	/// A tag already registered here is replaced in place, keeping its position; new
	/// tags are appended in `other`'s order.
	pub fn merge(&mut self, other: &RegistryBuilder) -> &mut Self {
		for reg in other.atoms.iter().chain(&other.containers) {
			let slot = self
				.atoms
				.iter_mut()
				.chain(self.containers.iter_mut())
				.find(|existing| existing.tag == reg.tag);
			match slot {
				Some(existing) if existing.handler.is_container() == reg.handler.is_container() => {
					*existing = reg.clone();
				}
				Some(existing) => {
					// Kind changed: drop the old entry and append under the new kind.
					let tag = existing.tag;
					self.atoms.retain(|r| r.tag != tag);
					self.containers.retain(|r| r.tag != tag);
					self.push_registration(reg.clone());
				}
				None => self.push_registration(reg.clone()),
			}
		}
		self
	}

	fn push_registration(&mut self, reg: Registration) {
		if reg.handler.is_container() {
			self.containers.push(reg);
		} else {
			self.atoms.push(reg);
		}
	}

	/// Assigns type codes and freezes the table.
	///
	/// # Errors
	///
	/// [`RegistryError::DuplicateTag`] if any tag was registered twice.
	pub fn build(self) -> Result<TypeRegistry, RegistryError> {
		let ordered: Vec<&Registration> = self.atoms.iter().chain(&self.containers).collect();

		let (mut explicit, default): (Vec<&Registration>, Vec<&Registration>) =
			ordered.into_iter().partition(|reg| reg.priority.is_some());
		// Stable: equal priorities keep registration order.
		explicit.sort_by_key(|reg| reg.priority);

		let mut entries = Vec::with_capacity(self.len());
		let mut by_tag = HashMap::with_capacity_and_hasher(self.len(), Default::default());
		for (index, reg) in explicit.into_iter().chain(default).enumerate() {
			let code = TypeCode(u32::try_from(index).unwrap_or(u32::MAX));
			if by_tag.insert(reg.tag, code).is_some() {
				return Err(RegistryError::DuplicateTag(reg.tag));
			}
			trace!(tag = %reg.tag, code = code.0, priority = ?reg.priority, "assigned type code");
			entries.push(Entry {
				tag: reg.tag,
				code,
				handler: reg.handler.clone(),
				priority: reg.priority,
			});
		}
		debug!(types = entries.len(), "type registry built");

		Ok(TypeRegistry {
			entries,
			by_tag,
			source: self,
		})
	}
}

/// One row of a built registry.
#[derive(Debug, Clone)]
pub struct Entry {
	tag: TypeTag,
	code: TypeCode,
	handler: Handler,
	priority: Option<i32>,
}

impl Entry {
	/// The semantic type.
	pub const fn tag(&self) -> TypeTag {
		self.tag
	}

	/// The assigned wire code.
	pub const fn code(&self) -> TypeCode {
		self.code
	}

	/// The bound handler.
	pub const fn handler(&self) -> &Handler {
		&self.handler
	}

	/// The explicit priority, if one was given.
	pub const fn priority(&self) -> Option<i32> {
		self.priority
	}
}

/// Immutable tag/code table produced by [`RegistryBuilder::build`].
///
/// Safe to share between threads; wrap it in an `Arc` and hand clones to packers
/// and unpackers. Changing registrations means building a new registry, for
/// example from [`TypeRegistry::to_builder`].
#[derive(Debug, Clone)]
pub struct TypeRegistry {
	entries: Vec<Entry>,
	by_tag: HashMap<TypeTag, TypeCode>,
	source: RegistryBuilder,
}

impl TypeRegistry {
	/// The built standard profile (see [`RegistryBuilder::standard`]).
	pub fn standard() -> Self {
		match RegistryBuilder::standard().build() {
			Ok(registry) => registry,
			Err(err) => unreachable!("standard profile has unique tags: {err}"),
		}
	}

	/// A builder pre-populated with this registry's registrations, in order.
	pub fn to_builder(&self) -> RegistryBuilder {
		self.source.clone()
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if no types are registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Wire code of `tag`.
	pub fn code_for(&self, tag: TypeTag) -> Option<TypeCode> {
		self.by_tag.get(&tag).copied()
	}

	/// Tag bound to a wire code.
	pub fn type_for(&self, code: u64) -> Option<TypeTag> {
		self.entry_by_code(code).map(Entry::tag)
	}

	/// Full entry for `tag`.
	pub fn entry(&self, tag: TypeTag) -> Option<&Entry> {
		self.code_for(tag).and_then(|code| self.entries.get(code.0 as usize))
	}

	/// Full entry for a wire code.
	pub fn entry_by_code(&self, code: u64) -> Option<&Entry> {
		usize::try_from(code).ok().and_then(|index| self.entries.get(index))
	}

	/// Entries in code order.
	pub fn iter(&self) -> impl Iterator<Item = &Entry> {
		self.entries.iter()
	}
}

impl Default for TypeRegistry {
	fn default() -> Self {
		Self::standard()
	}
}
