use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::MdlintError;
use crate::MdlintResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["mdlint.toml", ".mdlint.toml", ".config/mdlint.toml"];

/// Configuration loaded from an `mdlint.toml` file.
///
/// The lint rules themselves are fixed. The config only narrows which
/// markdown files are enumerated and how large they may be.
///
/// ```toml
/// max_file_size = 1048576
///
/// [exclude]
/// patterns = ["vendor/", "CHANGELOG.md"]
/// ```
#[derive(Debug, Deserialize)]
pub struct MdlintConfig {
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
	/// Maximum file size in bytes. A larger markdown file aborts the run.
	/// Unset means no limit.
	#[serde(default)]
	pub max_file_size: Option<u64>,
}

/// Configuration for excluding files and directories from enumeration.
///
/// Patterns follow `.gitignore` syntax. Supports negation (`!pattern`),
/// directory markers (trailing `/`), and all standard gitignore wildcards.
#[derive(Debug, Default, Deserialize)]
pub struct ExcludeConfig {
	/// Patterns relative to the project root.
	///
	/// Examples: `"build/"`, `"*.generated.md"`, `"!important.md"`.
	#[serde(default)]
	pub patterns: Vec<String>,
}

impl MdlintConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no candidate exists.
	pub fn load(root: &Path) -> MdlintResult<Option<MdlintConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: MdlintConfig =
			toml::from_str(&content).map_err(|e| MdlintError::ConfigParse(e.to_string()))?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}
}
