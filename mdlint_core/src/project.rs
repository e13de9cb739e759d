use std::path::Path;
use std::path::PathBuf;

use ignore::WalkBuilder;
use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::MdlintError;
use crate::MdlintResult;
use crate::Report;
use crate::config::MdlintConfig;
use crate::scanner::scan_markdown;

/// Name of the version control metadata directory that is never descended
/// into.
const VCS_DIR_NAME: &str = ".git";

const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Options that control which files are linted.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
	/// Gitignore-style patterns to exclude from enumeration.
	pub exclude_patterns: Vec<String>,
	/// Maximum markdown file size in bytes. `None` reads files of any size.
	pub max_file_size: Option<u64>,
}

impl ScanOptions {
	/// Construct [`ScanOptions`] from an optional [`MdlintConfig`]. `None`
	/// gives the same options as [`ScanOptions::default`].
	pub fn from_config(config: Option<&MdlintConfig>) -> Self {
		let exclude_patterns = config
			.map(|c| c.exclude.patterns.clone())
			.unwrap_or_default();
		let max_file_size = config.and_then(|c| c.max_file_size);

		Self {
			exclude_patterns,
			max_file_size,
		}
	}
}

/// Lint every markdown file under `root`, using the config file discovered
/// there (if any).
pub fn lint_project(root: &Path) -> MdlintResult<Report> {
	let config = MdlintConfig::load(root)?;
	let options = ScanOptions::from_config(config.as_ref());
	lint_project_with_options(root, &options)
}

/// Lint every markdown file under `root` with the given [`ScanOptions`].
///
/// Files are scanned in sorted order and the returned report is sorted. The
/// first file that cannot be read or decoded aborts the run.
pub fn lint_project_with_options(root: &Path, options: &ScanOptions) -> MdlintResult<Report> {
	let files = collect_markdown_files(root, options)?;
	tracing::info!(count = files.len(), root = %root.display(), "discovered markdown files");

	let mut report = Report::new();
	for file in &files {
		let content = read_markdown_file(file, options.max_file_size)?;
		let diagnostics = scan_markdown(file, &content);
		tracing::debug!(
			path = %file.display(),
			diagnostics = diagnostics.len(),
			"scanned file"
		);
		report.record_file(diagnostics);
	}

	report.sort();
	Ok(report)
}

/// Collect every file under `root` whose name ends in `.md` (compared
/// case-insensitively).
///
/// Hidden and gitignored files are included. `.git` directories and anything
/// matched by the exclude patterns are pruned. Directory symlinks are not
/// followed. Unreadable directories are logged and skipped.
pub fn collect_markdown_files(root: &Path, options: &ScanOptions) -> MdlintResult<Vec<PathBuf>> {
	let custom_exclude = build_exclude_matcher(root, &options.exclude_patterns)?;

	let mut builder = WalkBuilder::new(root);
	builder.standard_filters(false).follow_links(false);
	builder.filter_entry(move |entry| {
		if entry.depth() == 0 {
			return true;
		}

		let is_dir = entry.file_type().is_some_and(|file_type| file_type.is_dir());
		if is_dir && entry.file_name() == VCS_DIR_NAME {
			return false;
		}

		!custom_exclude.matched(entry.path(), is_dir).is_ignore()
	});

	let mut files = Vec::new();
	for result in builder.build() {
		let entry = match result {
			Ok(entry) => entry,
			Err(error) => {
				tracing::warn!(%error, "skipping unreadable path");
				continue;
			}
		};

		let is_dir = entry.file_type().is_none_or(|file_type| file_type.is_dir());
		if is_dir || entry.path().is_dir() {
			continue;
		}

		if is_markdown_name(entry.path()) {
			files.push(entry.into_path());
		}
	}

	// Sort for deterministic ordering.
	files.sort();
	Ok(files)
}

fn is_markdown_name(path: &Path) -> bool {
	path.file_name()
		.is_some_and(|name| name.to_string_lossy().to_lowercase().ends_with(".md"))
}

/// Build a `Gitignore` matcher from exclude patterns specified in
/// `mdlint.toml` `[exclude]`.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> MdlintResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			MdlintError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| MdlintError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

/// Read a markdown file into memory, decode it and normalize its line
/// endings. Files larger than `max_file_size` bytes are rejected when a limit
/// is given.
pub fn read_markdown_file(path: &Path, max_file_size: Option<u64>) -> MdlintResult<String> {
	let read_error = |error: std::io::Error| {
		MdlintError::ReadFile {
			path: path.display().to_string(),
			reason: error.to_string(),
		}
	};

	if let Some(limit) = max_file_size {
		let size = std::fs::metadata(path).map_err(read_error)?.len();
		if size > limit {
			return Err(MdlintError::FileTooLarge {
				path: path.display().to_string(),
				size,
				limit,
			});
		}
	}

	let bytes = std::fs::read(path).map_err(read_error)?;
	let text = decode_text(&bytes).map_err(|reason| {
		MdlintError::Decode {
			path: path.display().to_string(),
			reason,
		}
	})?;

	Ok(normalize_line_endings(&text))
}

/// Decode raw file bytes as text.
///
/// UTF-8 is tried first, with a leading byte order mark removed. Bytes that
/// are not UTF-8 but start with a UTF-16 byte order mark are decoded as
/// UTF-16 in the marked byte order. Anything else is an error describing why
/// UTF-8 decoding failed.
pub fn decode_text(bytes: &[u8]) -> Result<String, String> {
	let utf8_error = match std::str::from_utf8(bytes) {
		Ok(text) => return Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string()),
		Err(error) => error,
	};

	let little_endian = if bytes.starts_with(UTF16_LE_BOM) {
		true
	} else if bytes.starts_with(UTF16_BE_BOM) {
		false
	} else {
		return Err(format!("invalid UTF-8: {utf8_error}"));
	};

	let body = &bytes[UTF16_LE_BOM.len()..];
	if body.len() % 2 != 0 {
		return Err(format!(
			"invalid UTF-8 ({utf8_error}) and odd-length UTF-16 content"
		));
	}

	let units = body.chunks_exact(2).map(|pair| {
		let pair = [pair[0], pair[1]];
		if little_endian {
			u16::from_le_bytes(pair)
		} else {
			u16::from_be_bytes(pair)
		}
	});

	char::decode_utf16(units)
		.collect::<Result<String, _>>()
		.map_err(|error| format!("invalid UTF-8 ({utf8_error}) and invalid UTF-16: {error}"))
}

/// Normalize CRLF and lone CR line endings to LF.
pub fn normalize_line_endings(content: &str) -> String {
	if content.contains('\r') {
		content.replace("\r\n", "\n").replace('\r', "\n")
	} else {
		content.to_string()
	}
}

