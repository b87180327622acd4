//! Error type shared by the crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failures surfaced by discovery, measurement and configuration.
#[derive(Debug, Error)]
pub enum Error {
	/// The input directory is missing or cannot be listed.
	#[error("cannot read directory {}: {source}", path.display())]
	ReadDir {
		/// Directory that was being listed.
		path: PathBuf,
		/// Underlying I/O error.
		source: std::io::Error,
	},
	/// A sample file is missing, unreadable, or not valid UTF-8.
	#[error("cannot read file {}: {source}", path.display())]
	ReadFile {
		/// File that was being read.
		path: PathBuf,
		/// Underlying I/O error.
		source: std::io::Error,
	},
	/// An invalid configuration value.
	#[error("config: {0}")]
	Config(String),
	/// A config file that is not valid TOML.
	#[error("toml: {0}")]
	Toml(#[from] toml::de::Error),
	/// JSON rendering failure.
	#[error("serde: {0}")]
	Serde(#[from] serde_json::Error),
}

#[allow(missing_docs)]
impl Error {
	pub fn config(msg: impl Into<String>) -> Self { Self::Config(msg.into()) }
	pub fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self { Self::ReadDir { path: path.into(), source } }
	pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self { Self::ReadFile { path: path.into(), source } }
}
