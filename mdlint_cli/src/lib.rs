use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Structural linter for markdown documents.",
	long_about = "mdlint walks a directory tree and checks every `.md` file for structural \
	              defects without rendering it.\n\nIt reports malformed headers, broken local \
	              links and images, inconsistent list indentation, unterminated code fences, \
	              and tables whose rows disagree with their header.\n\nExit status is 0 when \
	              no issues were found (or there was nothing to check) and 1 otherwise."
)]
pub struct MdlintCli {
	/// Path to the root directory to lint. Defaults to the current
	/// directory.
	#[arg(long, short)]
	pub path: Option<PathBuf>,

	/// Enable verbose output. Debug logs are written to stderr.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,

	/// Output format for lint results. Use `text` for human-readable output,
	/// `json` for programmatic consumption, or `github` for GitHub Actions
	/// annotations that appear inline on PRs.
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// One `path:line: [category] message` line per issue, then a summary.
	Text,
	/// A single JSON object with the verdict, file count and every issue.
	Json,
	/// GitHub Actions `::error` annotations followed by the summary.
	Github,
}
