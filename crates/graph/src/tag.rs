//! Semantic type names.

use std::fmt;

/// Name of a semantic value type.
///
/// Both codec engines dispatch on the tag a node reports, and type registries map
/// tags to wire type codes. Built-in node kinds use the associated constants;
/// user-defined containers pick their own name via [`TypeTag::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(&'static str);

impl TypeTag {
	/// The absent-value marker.
	pub const NONE: Self = Self("none");
	/// Booleans.
	pub const BOOL: Self = Self("bool");
	/// Signed integers.
	pub const INT: Self = Self("int");
	/// UTF-8 text.
	pub const TEXT: Self = Self("text");
	/// Raw byte strings.
	pub const BYTES: Self = Self("bytes");
	/// Ordered sequences.
	pub const LIST: Self = Self("list");
	/// Ordered key-value maps.
	pub const MAP: Self = Self("map");

	/// Creates a tag for a user-defined type.
	pub const fn new(name: &'static str) -> Self {
		Self(name)
	}

	/// The tag's name.
	pub const fn name(self) -> &'static str {
		self.0
	}
}

impl fmt::Display for TypeTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0)
	}
}
