//! Session-scoped identity tokens.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap as HashMap;

/// Opaque per-session handle for one value.
///
/// On the pack side a token stands for a node's identity; on the unpack side it is
/// a record's dense index. Tokens from different sessions are unrelated even when
/// their numbers coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(u32);

impl Token {
	/// Token for the `index`-th record of a decoded stream.
	///
	/// Returns `None` if the index does not fit a token.
	pub fn from_index(index: u64) -> Option<Self> {
		u32::try_from(index).ok().map(Self)
	}

	/// Sequential number of this token within its session.
	#[inline]
	pub const fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "@{}", self.0)
	}
}

/// Maps keys to tokens, allocating sequential tokens for unseen keys.
///
/// The pack engine keys this by node id; stream assembly keys a second instance by
/// the first instance's tokens to renumber them densely.
#[derive(Debug, Clone)]
pub struct Identities<K> {
	tokens: HashMap<K, Token>,
}

impl<K: Hash + Eq> Default for Identities<K> {
	fn default() -> Self {
		Self {
			tokens: HashMap::default(),
		}
	}
}

impl<K: Hash + Eq> Identities<K> {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the token for `key`, allocating the next one if `key` is new.
	///
	/// # Panics
	///
	/// If more than `u32::MAX` distinct keys are identified in one session.
	pub fn identify(&mut self, key: K) -> Token {
		let next = self.tokens.len();
		*self.tokens.entry(key).or_insert_with(|| {
			Token(u32::try_from(next).unwrap_or_else(|_| panic!("identity table exhausted")))
		})
	}

	/// Returns the token for `key` without allocating.
	pub fn get(&self, key: &K) -> Option<Token> {
		self.tokens.get(key).copied()
	}

	/// Number of identified keys.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	/// Returns true if nothing has been identified.
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}
