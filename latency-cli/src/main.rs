#![forbid(unsafe_code)]

//! `latency-report`: print the average interval between consecutive
//! timestamp samples for every latency log in a directory.

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use latency_core::{
	config::TEMPLATE_TOML,
	report::error_line,
	ErrorPolicy, OutputFormat, Report, ReportConfig,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const CONFIG_FILE_NAME: &str = "latency-report.toml";

#[derive(Debug, Parser)]
#[command(
	name = "latency-report",
	version,
	about = "Average inter-sample latency per log file",
	args_conflicts_with_subcommands = true,
	subcommand_negates_reqs = true
)]
struct Cli {
	/// Directory containing the latency logs
	#[arg(required_unless_present = "files")]
	directory: Option<PathBuf>,
	/// Report only these base names, resolved as <NAME>.<EXT> inside the directory (default: .).
	/// Repeat the flag or separate names with commas.
	#[arg(long, action = ArgAction::Append, value_delimiter = ',')]
	files: Vec<String>,
	/// Extension of the files to scan (default: txt)
	#[arg(long)]
	ext: Option<String>,
	/// Width of the filename column (1..=256, default: 20)
	#[arg(long)]
	width: Option<usize>,
	/// Output format: table, legacy or json
	#[arg(long, value_parser = parse_format)]
	format: Option<OutputFormat>,
	/// Omit the table header row
	#[arg(long)]
	no_header: bool,
	/// File names to leave out (repeatable, comma separated)
	#[arg(long, action = ArgAction::Append, value_delimiter = ',')]
	exclude: Vec<String>,
	/// Stop at the first unreadable file and print only its error
	#[arg(long)]
	fail_fast: bool,
	/// Explicit config file (default: auto-discovered latency-report.toml)
	#[arg(long)]
	config: Option<PathBuf>,
	/// Log level used when RUST_LOG is unset
	#[arg(long)]
	log_level: Option<String>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Config helpers
	Config {
		#[command(subcommand)]
		action: ConfigCmd,
	},
}

#[derive(Debug, Subcommand)]
enum ConfigCmd {
	/// Show the effective config (resolved from files and env)
	Show {
		/// Explicit config file (default: auto-discovered latency-report.toml)
		#[arg(long)]
		config: Option<PathBuf>,
	},
	/// Write a latency-report.toml template
	WriteTemplate {
		/// Destination path (default: ./latency-report.toml)
		#[arg(long)]
		path: Option<PathBuf>,
		/// Overwrite if the file exists
		#[arg(long)]
		force: bool,
	},
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
	s.parse().map_err(|e: latency_core::Error| e.to_string())
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	if let Some(Command::Config { action }) = &cli.command {
		return run_config(action);
	}

	let cfg = resolve_config(&cli)?;
	init_logging(&cfg.log_level);

	let dir = cli.directory.clone().unwrap_or_else(|| PathBuf::from("."));
	let names = (!cli.files.is_empty()).then_some(cli.files.as_slice());
	match Report::collect(&dir, names, &cfg).and_then(|r| r.render(&cfg)) {
		Ok(text) => print!("{text}"),
		Err(e) => {
			tracing::error!(error = %e, "report aborted");
			println!("{}", error_line(&e.to_string()));
		}
	}
	Ok(())
}

fn run_config(action: &ConfigCmd) -> anyhow::Result<()> {
	match action {
		ConfigCmd::Show { config } => {
			let (cfg, source) = load_config(config.as_deref())?;
			let out = json!({
				"source": source.map(|p| p.display().to_string()),
				"report": cfg,
			});
			println!("{}", serde_json::to_string_pretty(&out)?);
		}
		ConfigCmd::WriteTemplate { path, force } => {
			let path = path.clone().unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
			if path.exists() && !force {
				eprintln!("refusing to overwrite existing file: {} (use --force)", path.display());
				std::process::exit(2);
			}
			std::fs::write(&path, TEMPLATE_TOML).with_context(|| format!("writing {}", path.display()))?;
			eprintln!("wrote {}", path.display());
		}
	}
	Ok(())
}

/// Defaults, then the first config file found, then env, then CLI flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<ReportConfig> {
	let (mut cfg, _) = load_config(cli.config.as_deref())?;
	if let Some(ext) = &cli.ext { cfg.extension = ext.clone(); }
	if let Some(w) = cli.width { cfg.column_width = w; }
	if let Some(f) = cli.format { cfg.format = f; }
	if cli.no_header { cfg.header = false; }
	if !cli.exclude.is_empty() { cfg.exclude.extend(cli.exclude.iter().cloned()); }
	if cli.fail_fast { cfg.on_error = ErrorPolicy::FailFast; }
	if let Some(l) = &cli.log_level { cfg.log_level = l.trim().to_ascii_lowercase(); }
	cfg.validate()?;
	Ok(cfg)
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<(ReportConfig, Option<PathBuf>)> {
	let source = find_config_file(explicit);
	let mut cfg = match &source {
		Some(path) => ReportConfig::load_from_file(path).with_context(|| format!("invalid config file {}", path.display()))?,
		None => ReportConfig::default(),
	};
	cfg.apply_env()?;
	Ok((cfg, source))
}

fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
	// An explicit path is returned even if absent so the read error surfaces.
	if let Some(p) = explicit { return Some(p.to_path_buf()); }

	// Search order: $LATENCY_REPORT_CONFIG -> ./latency-report.toml -> platform config dir
	let mut candidates: Vec<PathBuf> = Vec::new();
	if let Ok(p) = std::env::var("LATENCY_REPORT_CONFIG") {
		if !p.trim().is_empty() { candidates.push(PathBuf::from(p.trim())); }
	}
	candidates.push(PathBuf::from(CONFIG_FILE_NAME));
	if cfg!(windows) {
		if let Ok(app_data) = std::env::var("APPDATA") {
			candidates.push(PathBuf::from(app_data).join("latency-report").join(CONFIG_FILE_NAME));
		}
	} else {
		if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
			candidates.push(PathBuf::from(xdg).join("latency-report").join(CONFIG_FILE_NAME));
		}
		if let Ok(home) = std::env::var("HOME") {
			candidates.push(PathBuf::from(home).join(".config").join("latency-report").join(CONFIG_FILE_NAME));
		}
	}
	candidates.into_iter().find(|p| p.is_file())
}

fn init_logging(level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.compact()
		.try_init();
}
