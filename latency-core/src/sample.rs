//! Timestamp extraction and interval math.
//!
//! A latency log is plain text. Each line is split on whitespace and the
//! second token, when it parses as an integer, is a timestamp sample. Every
//! other line is skipped without complaint.

/// Extract the timestamp sample from one log line, if it carries one.
pub fn parse_line(line: &str) -> Option<i64> {
	line.split_whitespace().nth(1)?.parse().ok()
}

/// Ordered timestamp samples taken from a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Samples {
	values: Vec<i64>,
	skipped: usize,
}

impl Samples {
	/// Parse every line of `text`, keeping file order.
	pub fn parse(text: &str) -> Self {
		let mut out = Self::default();
		for line in text.lines() {
			match parse_line(line) {
				Some(v) => out.values.push(v),
				None => out.skipped += 1,
			}
		}
		out
	}

	/// Samples in line order.
	pub fn values(&self) -> &[i64] { &self.values }

	/// Number of lines that did not yield a sample.
	pub fn skipped(&self) -> usize { self.skipped }

	/// Number of samples.
	pub fn len(&self) -> usize { self.values.len() }

	/// True when no line yielded a sample.
	pub fn is_empty(&self) -> bool { self.values.is_empty() }

	/// Consecutive deltas; empty with fewer than two samples.
	pub fn differences(&self) -> Vec<i128> {
		self.values.windows(2).map(|w| i128::from(w[1]) - i128::from(w[0])).collect()
	}

	/// Mean of the difference sequence, or 0 when there is none.
	pub fn mean_interval(&self) -> f64 {
		let diffs = self.differences();
		if diffs.is_empty() {
			return 0.0;
		}
		let total: i128 = diffs.iter().sum();
		total as f64 / diffs.len() as f64
	}
}

impl From<Vec<i64>> for Samples {
	fn from(values: Vec<i64>) -> Self { Self { values, skipped: 0 } }
}
