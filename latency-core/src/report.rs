//! Batch measurement and rendering of per-file results.

use crate::{
	config::{ErrorPolicy, OutputFormat, ReportConfig},
	discover::{discover, file_name, resolve_named},
	error::Result,
	measure::{measure, ReportEntry},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Header label of the filename column.
pub const FILENAME_LABEL: &str = "Filename";
/// Header label of the average column.
pub const AVERAGE_LABEL: &str = "Avg Latency (ms)";
/// Unit suffix used by the legacy format.
pub const LEGACY_UNIT: &str = "milliseconds";

/// Result of measuring a single file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
	/// The file was read and averaged.
	Measured(ReportEntry),
	/// The file could not be read.
	Failed {
		/// File name without its directory.
		file: String,
		/// Human readable cause.
		error: String,
	},
}

impl Outcome {
	/// File name this outcome belongs to.
	pub fn file(&self) -> &str {
		match self {
			Outcome::Measured(e) => &e.file,
			Outcome::Failed { file, .. } => file,
		}
	}
}

/// Ordered outcomes of one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report {
	outcomes: Vec<Outcome>,
}

impl Report {
	/// Measure every path. Under [`ErrorPolicy::FailFast`] the first failure is returned as the error.
	pub fn measure_all(paths: &[PathBuf], policy: ErrorPolicy) -> Result<Self> {
		let mut outcomes = Vec::with_capacity(paths.len());
		for path in paths {
			match measure(path) {
				Ok(entry) => outcomes.push(Outcome::Measured(entry)),
				Err(e) if policy == ErrorPolicy::FailFast => return Err(e),
				Err(e) => {
					tracing::warn!(file = %path.display(), error = %e, "skipping unreadable file");
					outcomes.push(Outcome::Failed { file: file_name(path), error: e.to_string() });
				}
			}
		}
		outcomes.sort_by(|a, b| a.file().cmp(b.file()));
		let report = Self { outcomes };
		tracing::info!(measured = report.measured().count(), failed = report.failed(), "batch complete");
		Ok(report)
	}

	/// Discover the logs in `dir` (or resolve `names` against it) and measure them.
	pub fn collect(dir: &Path, names: Option<&[String]>, cfg: &ReportConfig) -> Result<Self> {
		let paths = match names {
			Some(names) => resolve_named(dir, names, cfg)?,
			None => discover(dir, cfg)?,
		};
		Self::measure_all(&paths, cfg.on_error)
	}

	/// Outcomes in file name order.
	pub fn outcomes(&self) -> &[Outcome] { &self.outcomes }

	/// Successfully measured entries.
	pub fn measured(&self) -> impl Iterator<Item = &ReportEntry> {
		self.outcomes.iter().filter_map(|o| match o {
			Outcome::Measured(e) => Some(e),
			Outcome::Failed { .. } => None,
		})
	}

	/// Number of files that could not be read.
	pub fn failed(&self) -> usize {
		self.outcomes.iter().filter(|o| matches!(o, Outcome::Failed { .. })).count()
	}

	/// Render the report in the configured format. Lines are newline terminated.
	pub fn render(&self, cfg: &ReportConfig) -> Result<String> {
		let mut out = String::new();
		match cfg.format {
			OutputFormat::Table => {
				if cfg.header {
					out.push_str(&table_row(FILENAME_LABEL, AVERAGE_LABEL, cfg.column_width));
					out.push('\n');
				}
				for o in &self.outcomes {
					match o {
						Outcome::Measured(e) => out.push_str(&table_row(&e.file, &e.average.to_string(), cfg.column_width)),
						Outcome::Failed { error, .. } => out.push_str(&error_line(error)),
					}
					out.push('\n');
				}
			}
			OutputFormat::Legacy => {
				let suffix = cfg.suffix();
				for o in &self.outcomes {
					match o {
						Outcome::Measured(e) => {
							let stem = e.file.strip_suffix(suffix.as_str()).unwrap_or(&e.file);
							out.push_str(&format!("{stem}:{} {LEGACY_UNIT}", legacy_average(e)));
						}
						Outcome::Failed { error, .. } => out.push_str(&error_line(error)),
					}
					out.push('\n');
				}
			}
			OutputFormat::Json => {
				out.push_str(&serde_json::to_string_pretty(self)?);
				out.push('\n');
			}
		}
		Ok(out)
	}
}

/// `<name padded or truncated to width> | <value>`.
pub fn table_row(name: &str, value: &str, width: usize) -> String {
	let name: String = name.chars().take(width).collect();
	format!("{name:<width$} | {value}")
}

/// Average as the first revision printed it: the integer `0` when there were no
/// intervals, otherwise a float that always carries a decimal point (`50.0`).
pub fn legacy_average(entry: &ReportEntry) -> String {
	if entry.samples < 2 {
		return "0".into();
	}
	if entry.average.is_finite() && entry.average.fract() == 0.0 {
		format!("{:.1}", entry.average)
	} else {
		entry.average.to_string()
	}
}

/// The single-line error form shared by every text format.
pub fn error_line(message: &str) -> String {
	format!("ERROR: {message}")
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	fn fixture() -> tempfile::TempDir {
		let tmp = tempfile::tempdir().unwrap();
		fs::write(tmp.path().join("b.txt"), "x 5\n").unwrap();
		fs::write(tmp.path().join("a.txt"), "x 100\ny 150\nz 225\n").unwrap();
		tmp
	}

	#[test]
	fn table_has_header_then_sorted_rows() {
		let tmp = fixture();
		let cfg = ReportConfig::default();
		let text = Report::collect(tmp.path(), None, &cfg).unwrap().render(&cfg).unwrap();
		let lines: Vec<&str> = text.lines().collect();
		assert_eq!(lines, [
			"Filename             | Avg Latency (ms)",
			"a.txt                | 62.5",
			"b.txt                | 0",
		]);
	}

	#[test]
	fn long_names_are_truncated_to_the_column() {
		assert_eq!(table_row("tasksVision10_long_run.txt", "1", 10), "tasksVisio | 1");
		assert_eq!(table_row("a.txt", "1", 7), "a.txt   | 1");
	}

	#[test]
	fn legacy_format_uses_stems_and_unit() {
		let tmp = fixture();
		let cfg = ReportConfig { format: OutputFormat::Legacy, ..ReportConfig::default() };
		let text = Report::collect(tmp.path(), None, &cfg).unwrap().render(&cfg).unwrap();
		assert_eq!(text, "a:62.5 milliseconds\nb:0 milliseconds\n");
	}

	#[test]
	fn legacy_whole_numbers_print_as_floats() {
		let entry = |average, samples| ReportEntry { file: "pose1.txt".into(), average, samples };
		assert_eq!(legacy_average(&entry(50.0, 3)), "50.0");
		assert_eq!(legacy_average(&entry(0.0, 2)), "0.0");
		assert_eq!(legacy_average(&entry(-12.0, 4)), "-12.0");
		assert_eq!(legacy_average(&entry(62.5, 3)), "62.5");
		assert_eq!(legacy_average(&entry(0.0, 1)), "0");
		assert_eq!(legacy_average(&entry(0.0, 0)), "0");
	}

	#[test]
	fn unreadable_file_is_isolated_by_default() {
		let tmp = fixture();
		fs::write(tmp.path().join("aa.txt"), [0xff, 0xfe]).unwrap();
		let cfg = ReportConfig { header: false, ..ReportConfig::default() };
		let report = Report::collect(tmp.path(), None, &cfg).unwrap();
		assert_eq!(report.failed(), 1);
		assert_eq!(report.measured().count(), 2);
		let text = report.render(&cfg).unwrap();
		let lines: Vec<&str> = text.lines().collect();
		assert_eq!(lines.len(), 3);
		assert!(lines[0].starts_with("a.txt"));
		assert!(lines[1].starts_with("ERROR: cannot read file"));
		assert!(lines[1].contains("aa.txt"));
		assert!(lines[2].starts_with("b.txt"));
	}

	#[test]
	fn fail_fast_returns_the_first_error() {
		let tmp = fixture();
		fs::write(tmp.path().join("aa.txt"), [0xff, 0xfe]).unwrap();
		let cfg = ReportConfig { on_error: ErrorPolicy::FailFast, ..ReportConfig::default() };
		let err = Report::collect(tmp.path(), None, &cfg).unwrap_err();
		assert!(err.to_string().contains("aa.txt"));
	}

	#[test]
	fn named_mode_reports_missing_files() {
		let tmp = fixture();
		let names = vec!["b".to_string(), "missing".to_string(), "a".to_string()];
		let report = Report::collect(tmp.path(), Some(names.as_slice()), &ReportConfig::default()).unwrap();
		let files: Vec<&str> = report.outcomes().iter().map(Outcome::file).collect();
		assert_eq!(files, ["a.txt", "b.txt", "missing.txt"]);
		assert_eq!(report.failed(), 1);
	}

	#[test]
	fn json_tags_each_outcome() {
		let report = Report {
			outcomes: vec![
				Outcome::Measured(ReportEntry { file: "a.txt".into(), average: 62.5, samples: 3 }),
				Outcome::Failed { file: "c.txt".into(), error: "boom".into() },
			],
		};
		let cfg = ReportConfig { format: OutputFormat::Json, ..ReportConfig::default() };
		let v: serde_json::Value = serde_json::from_str(&report.render(&cfg).unwrap()).unwrap();
		assert_eq!(v[0]["status"], "measured");
		assert_eq!(v[0]["average"], 62.5);
		assert_eq!(v[1]["status"], "failed");
		assert_eq!(v[1]["error"], "boom");
	}
}
