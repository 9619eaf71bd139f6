//! Engine limits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default recursion limit for both engines.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Limits applied to pack and unpack calls.
///
/// Loadable from TOML; missing keys take their defaults:
///
/// ```toml
/// max_depth = 256
/// max_input_len = 1048576
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
	/// Deepest container nesting either engine will follow before failing with
	/// [`crate::Error::DepthExceeded`]. Atoms do not count.
	pub max_depth: usize,
	/// Longest stream [`crate::Unpacker::split`] accepts.
	pub max_input_len: Option<usize>,
}

impl Default for CodecConfig {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			max_input_len: None,
		}
	}
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The TOML did not parse or did not match the schema.
	#[error("invalid codec config: {0}")]
	Parse(#[from] toml::de::Error),

	/// `max_depth` of zero would reject every container.
	#[error("max_depth must be at least 1")]
	ZeroDepth,
}

impl CodecConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks value ranges.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.max_depth == 0 {
			return Err(ConfigError::ZeroDepth);
		}
		Ok(())
	}

	/// Returns a copy with a different depth limit.
	#[must_use]
	pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	/// Returns a copy with an input length limit.
	#[must_use]
	pub const fn with_max_input_len(mut self, limit: usize) -> Self {
		self.max_input_len = Some(limit);
		self
	}
}
