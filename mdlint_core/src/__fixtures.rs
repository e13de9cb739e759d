use std::path::Path;
use std::path::PathBuf;

use crate::Category;
use crate::Diagnostic;
use crate::scan_markdown;

/// Path used for scans that never touch the filesystem.
pub fn virtual_file() -> PathBuf {
	PathBuf::from("/virtual/docs/readme.md")
}

/// Scan `content` as if it were [`virtual_file`].
pub fn scan(content: &str) -> Vec<Diagnostic> {
	scan_markdown(&virtual_file(), content)
}

/// Strip the file from each diagnostic for compact comparisons.
pub fn summarize(diagnostics: &[Diagnostic]) -> Vec<(usize, Category, String)> {
	diagnostics
		.iter()
		.map(|diagnostic| {
			(
				diagnostic.line,
				diagnostic.category,
				diagnostic.message.clone(),
			)
		})
		.collect()
}

pub fn expected(items: &[(usize, Category, &str)]) -> Vec<(usize, Category, String)> {
	items
		.iter()
		.map(|&(line, category, message)| (line, category, message.to_string()))
		.collect()
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("create_dir_all: {e}"));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {relative}: {e}"));
	path
}

/// Encode `text` as UTF-16 with a byte order mark.
pub fn utf16_with_bom(text: &str, little_endian: bool) -> Vec<u8> {
	let mut bytes = if little_endian {
		vec![0xFF, 0xFE]
	} else {
		vec![0xFE, 0xFF]
	};
	for unit in text.encode_utf16() {
		if little_endian {
			bytes.extend_from_slice(&unit.to_le_bytes());
		} else {
			bytes.extend_from_slice(&unit.to_be_bytes());
		}
	}
	bytes
}

/// Paths of `files` relative to `root`, using `/` separators.
pub fn relative_names(root: &Path, files: &[PathBuf]) -> Vec<String> {
	files
		.iter()
		.map(|file| {
			file.strip_prefix(root)
				.unwrap_or(file)
				.to_string_lossy()
				.replace('\\', "/")
		})
		.collect()
}
