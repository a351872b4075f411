//! Error types for debugger configuration.
//!
//! The component itself never fails; only turning environment variables and
//! configuration documents into settings can.

use thiserror::Error;

/// Errors raised while resolving debugger configuration.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
	/// `REINHARDT_ENV` (or a config document) named a mode we do not know.
	#[error("Unknown build mode '{0}' (expected one of: local, dev, development, test, prod, production, staging)")]
	UnknownBuildMode(String),

	/// The configuration document is not valid JSON or has the wrong shape.
	#[error("Failed to parse debugger configuration: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
