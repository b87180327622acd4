//! Reporter settings and their TOML/env sources.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, str::FromStr};

/// Largest accepted filename column width.
pub const MAX_COLUMN_WIDTH: usize = 256;

/// How report rows are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
	/// `Filename | Avg Latency (ms)` header followed by aligned rows.
	#[default]
	Table,
	/// `<stem>:<average> milliseconds`, one line per file.
	Legacy,
	/// Pretty-printed JSON array of outcomes.
	Json,
}

impl FromStr for OutputFormat {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.trim().to_ascii_lowercase().as_str() {
			"table" => Ok(Self::Table),
			"legacy" => Ok(Self::Legacy),
			"json" => Ok(Self::Json),
			other => Err(Error::config(format!("invalid format: {other} (expected table, legacy or json)"))),
		}
	}
}

/// What happens to the batch when one file cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
	/// Record the failure for that file and keep going.
	#[default]
	Isolate,
	/// Abort on the first failure; only a single error line is reported.
	FailFast,
}

/// Effective reporter settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
	/// Extension (without the dot) of the files to scan.
	pub extension: String,
	/// Width of the filename column in table output.
	pub column_width: usize,
	/// Print the table header row.
	pub header: bool,
	/// Output format.
	pub format: OutputFormat,
	/// Per-file failure handling.
	pub on_error: ErrorPolicy,
	/// File names to leave out of discovery.
	pub exclude: Vec<String>,
	/// Fallback log filter when `RUST_LOG` is unset.
	pub log_level: String,
}

impl Default for ReportConfig {
	fn default() -> Self {
		Self {
			extension: "txt".into(),
			column_width: 20,
			header: true,
			format: OutputFormat::Table,
			on_error: ErrorPolicy::Isolate,
			exclude: Vec::new(),
			log_level: "warn".into(),
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
	#[serde(default)]
	report: Option<ReportConfig>,
}

impl ReportConfig {
	/// Load the `[report]` section of a TOML file. A file without the section yields defaults.
	pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
		let data = fs::read_to_string(path.as_ref()).map_err(|e| Error::read_file(path.as_ref(), e))?;
		Self::from_toml_str(&data)
	}

	/// Parse the `[report]` section from TOML text.
	pub fn from_toml_str(s: &str) -> Result<Self> {
		let file: ConfigFile = toml::from_str(s)?;
		let cfg = file.report.unwrap_or_default();
		cfg.validate()?;
		Ok(cfg)
	}

	/// Overlay `LATENCY_REPORT_*` environment variables.
	pub fn apply_env(&mut self) -> Result<()> {
		self.apply_env_from(|k| std::env::var(k).ok())
	}

	/// Overlay settings from an arbitrary variable lookup. Blank values are ignored.
	pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
		if let Some(v) = get("LATENCY_REPORT_EXT") { self.extension = v; }
		if let Some(v) = get("LATENCY_REPORT_WIDTH") {
			self.column_width = v.parse().map_err(|_| Error::config(format!("invalid LATENCY_REPORT_WIDTH: {v}")))?;
		}
		if let Some(v) = get("LATENCY_REPORT_FORMAT") { self.format = v.parse()?; }
		if let Some(v) = get("LATENCY_REPORT_LOG_LEVEL") { self.log_level = v.to_ascii_lowercase(); }
		self.validate()
	}

	/// Reject values the reporter cannot work with.
	pub fn validate(&self) -> Result<()> {
		if self.extension.trim_start_matches('.').is_empty() {
			return Err(Error::config("extension must not be empty"));
		}
		if !(1..=MAX_COLUMN_WIDTH).contains(&self.column_width) {
			return Err(Error::config(format!(
				"invalid column_width: {} (allowed 1..={})",
				self.column_width, MAX_COLUMN_WIDTH
			)));
		}
		let allowed = ["trace", "debug", "info", "warn", "error"];
		if !allowed.contains(&self.log_level.as_str()) {
			return Err(Error::config(format!("invalid log_level: {}", self.log_level)));
		}
		Ok(())
	}

	/// Extension normalized to the `.ext` suffix form.
	pub fn suffix(&self) -> String {
		format!(".{}", self.extension.trim_start_matches('.'))
	}
}

/// Commented template written by `config write-template`.
pub const TEMPLATE_TOML: &str = r#"# latency-report configuration (template)

[report]
# Extension of the latency logs to scan
extension = "txt"
# Width of the filename column
column_width = 20
# Print the "Filename | Avg Latency (ms)" header
header = true
# table | legacy | json
format = "table"
# isolate: report unreadable files inline and continue
# fail-fast: stop at the first unreadable file
on_error = "isolate"
# File names to skip
exclude = []
# Used when RUST_LOG is unset
log_level = "warn"
"#;
