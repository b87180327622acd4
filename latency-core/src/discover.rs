//! Locating the latency logs to report on.

use crate::{
	config::ReportConfig,
	error::{Error, Result},
};
use std::{
	fs,
	path::{Path, PathBuf},
};

/// Display name of a path: its final component, lossily decoded.
pub fn file_name(path: &Path) -> String {
	path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| path.display().to_string())
}

/// All regular files in `dir` ending in the configured extension, minus exclusions, sorted by name.
pub fn discover(dir: &Path, cfg: &ReportConfig) -> Result<Vec<PathBuf>> {
	let suffix = cfg.suffix();
	let mut found = Vec::new();
	for entry in fs::read_dir(dir).map_err(|e| Error::read_dir(dir, e))? {
		let entry = entry.map_err(|e| Error::read_dir(dir, e))?;
		let name = entry.file_name().to_string_lossy().into_owned();
		if !name.ends_with(&suffix) || cfg.exclude.iter().any(|x| x == &name) {
			continue;
		}
		// File types are resolved through symlinks so linked logs are still picked up.
		if !entry.path().is_file() {
			tracing::debug!(name = %name, "skipping non-file entry");
			continue;
		}
		found.push(entry.path());
	}
	sort_by_name(&mut found);
	tracing::debug!(dir = %dir.display(), count = found.len(), "discovered latency logs");
	Ok(found)
}

/// Resolve base names such as `pose1` to `<dir>/pose1.txt`. Names already ending in the extension are kept.
pub fn resolve_named<S: AsRef<str>>(dir: &Path, names: &[S], cfg: &ReportConfig) -> Result<Vec<PathBuf>> {
	if !dir.is_dir() {
		return Err(Error::read_dir(dir, std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory")));
	}
	let suffix = cfg.suffix();
	let mut paths: Vec<PathBuf> = names
		.iter()
		.map(|n| n.as_ref().trim())
		.filter(|n| !n.is_empty())
		.map(|n| if n.ends_with(&suffix) { dir.join(n) } else { dir.join(format!("{n}{suffix}")) })
		.collect();
	sort_by_name(&mut paths);
	paths.dedup();
	Ok(paths)
}

fn sort_by_name(paths: &mut [PathBuf]) {
	paths.sort_by_cached_key(|p| file_name(p));
}
