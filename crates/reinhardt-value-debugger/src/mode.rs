//! Development/production build mode.
//!
//! The mode is resolved once per process from `REINHARDT_ENV`, falling back to
//! `debug_assertions` when the variable is unset. Rendering reads the cached
//! value and never consults the environment again.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Environment variable naming the active profile.
pub const ENV_VAR: &str = "REINHARDT_ENV";

/// Whether diagnostic-only UI may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
	/// Development build: overlays render.
	Development,
	/// Production build: overlays render nothing.
	Production,
}

impl BuildMode {
	/// Mode implied by how the crate was compiled.
	pub fn from_build() -> Self {
		if cfg!(debug_assertions) {
			BuildMode::Development
		} else {
			BuildMode::Production
		}
	}

	/// Resolves a mode from a raw `REINHARDT_ENV` value.
	///
	/// `None` or an empty value defers to [`BuildMode::from_build`].
	pub fn resolve(raw: Option<&str>) -> ConfigResult<Self> {
		match raw.map(str::trim) {
			None | Some("") => Ok(Self::from_build()),
			Some(value) => value.parse(),
		}
	}

	/// Reads `REINHARDT_ENV` from the process environment.
	pub fn from_env() -> ConfigResult<Self> {
		Self::resolve(std::env::var(ENV_VAR).ok().as_deref())
	}

	/// The process-wide mode, resolved on first use.
	///
	/// An unrecognised `REINHARDT_ENV` logs a warning and falls back to the
	/// build default.
	pub fn current() -> Self {
		static CURRENT: OnceLock<BuildMode> = OnceLock::new();
		*CURRENT.get_or_init(|| match Self::from_env() {
			Ok(mode) => {
				tracing::debug!(%mode, "resolved build mode");
				mode
			}
			Err(error) => {
				let fallback = Self::from_build();
				tracing::warn!(%error, %fallback, "invalid {ENV_VAR}, using build default");
				fallback
			}
		})
	}

	/// Returns `true` for [`BuildMode::Development`].
	pub fn is_development(self) -> bool {
		self == BuildMode::Development
	}
}

impl Default for BuildMode {
	fn default() -> Self {
		Self::current()
	}
}

impl FromStr for BuildMode {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"local" | "dev" | "development" | "test" => Ok(BuildMode::Development),
			"prod" | "production" | "staging" => Ok(BuildMode::Production),
			_ => Err(ConfigError::UnknownBuildMode(s.to_string())),
		}
	}
}

impl fmt::Display for BuildMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			BuildMode::Development => f.write_str("development"),
			BuildMode::Production => f.write_str("production"),
		}
	}
}
