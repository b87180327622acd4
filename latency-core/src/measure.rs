//! Per-file measurement.

use crate::{
	discover::file_name,
	error::{Error, Result},
	sample::Samples,
};
use serde::Serialize;
use std::{fs, path::Path};

/// Average inter-sample interval of one latency log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
	/// File name without its directory.
	pub file: String,
	/// Mean of consecutive timestamp differences, 0 with fewer than two samples.
	pub average: f64,
	/// Number of samples the average was computed from.
	pub samples: usize,
}

impl ReportEntry {
	/// Build an entry from already-parsed samples.
	pub fn from_samples(file: impl Into<String>, samples: &Samples) -> Self {
		Self { file: file.into(), average: samples.mean_interval(), samples: samples.len() }
	}
}

/// Read `path` fully and compute its report entry. The handle is released before returning.
pub fn measure(path: &Path) -> Result<ReportEntry> {
	let text = fs::read_to_string(path).map_err(|e| Error::read_file(path, e))?;
	let samples = Samples::parse(&text);
	let entry = ReportEntry::from_samples(file_name(path), &samples);
	tracing::debug!(
		file = %entry.file,
		samples = samples.len(),
		skipped = samples.skipped(),
		average = entry.average,
		"measured"
	);
	Ok(entry)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn measures_worked_examples() {
		let tmp = tempfile::tempdir().unwrap();
		let a = tmp.path().join("a.txt");
		let b = tmp.path().join("b.txt");
		fs::write(&a, "x 100\ny 150\nz 225\n").unwrap();
		fs::write(&b, "x 5\n").unwrap();
		assert_eq!(measure(&a).unwrap(), ReportEntry { file: "a.txt".into(), average: 62.5, samples: 3 });
		assert_eq!(measure(&b).unwrap(), ReportEntry { file: "b.txt".into(), average: 0.0, samples: 1 });
	}

	#[test]
	fn non_utf8_file_fails_to_read() {
		let tmp = tempfile::tempdir().unwrap();
		let bad = tmp.path().join("bad.txt");
		fs::write(&bad, [0xff, 0xfe, 0x00, 0x80]).unwrap();
		assert!(matches!(measure(&bad), Err(Error::ReadFile { .. })));
	}

	#[test]
	fn missing_file_fails_to_read() {
		let tmp = tempfile::tempdir().unwrap();
		assert!(matches!(measure(&tmp.path().join("none.txt")), Err(Error::ReadFile { .. })));
	}
}
