//! Resolution of raw link and image targets to local filesystem paths.
//!
//! Resolution is purely lexical. Whether the resolved path exists is the
//! caller's concern.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Resolve a raw `[text](target)` target found in `markdown_file` to the
/// local path it refers to.
///
/// Returns `None` when the target is not a checkable local reference: empty,
/// a web URL, a `mailto:` address, or nothing left once the fragment and
/// query are removed.
///
/// ```
/// use std::path::Path;
/// use std::path::PathBuf;
///
/// use mdlint_core::resolve_target;
///
/// let file = Path::new("/docs/guide/intro.md");
/// assert_eq!(
/// 	resolve_target(file, "../api/index.md#usage"),
/// 	Some(PathBuf::from("/docs/api/index.md"))
/// );
/// assert_eq!(resolve_target(file, "https://example.com"), None);
/// assert_eq!(resolve_target(file, "#section"), None);
/// ```
pub fn resolve_target(markdown_file: &Path, raw_target: &str) -> Option<PathBuf> {
	let target = unquote(raw_target);
	if target.is_empty() || is_web_url(target) || target.starts_with("mailto:") {
		return None;
	}

	let decoded = percent_decode(target);
	let without_fragment = decoded.split('#').next().unwrap_or_default();
	let local = without_fragment.split('?').next().unwrap_or_default();
	if local.is_empty() {
		return None;
	}

	let local = Path::new(local);
	if local.is_absolute() {
		return Some(normalize_path(local));
	}

	let base = markdown_file.parent().unwrap_or_else(|| Path::new(""));
	Some(normalize_path(&base.join(local)))
}

/// Trim surrounding whitespace and strip one pair of matching double or
/// single quotes wrapping the whole target.
fn unquote(target: &str) -> &str {
	let trimmed = target.trim();
	for quote in ['"', '\''] {
		if trimmed.starts_with(quote) && trimmed.ends_with(quote) {
			// A lone quote character unwraps to nothing.
			return trimmed
				.get(1..trimmed.len().saturating_sub(1))
				.unwrap_or_default()
				.trim();
		}
	}
	trimmed
}

fn is_web_url(target: &str) -> bool {
	let lower = target.to_ascii_lowercase();
	lower.starts_with("http://") || lower.starts_with("https://")
}

/// Decode `%XX` escapes. Malformed escapes are kept verbatim and invalid
/// UTF-8 sequences become replacement characters.
pub fn percent_decode(input: &str) -> String {
	let bytes = input.as_bytes();
	let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
	let mut index = 0;
	while index < bytes.len() {
		if bytes[index] == b'%' && index + 2 < bytes.len() {
			let high = char::from(bytes[index + 1]).to_digit(16);
			let low = char::from(bytes[index + 2]).to_digit(16);
			if let (Some(high), Some(low)) = (high, low) {
				out.push(((high << 4) | low) as u8);
				index += 3;
				continue;
			}
		}
		out.push(bytes[index]);
		index += 1;
	}
	String::from_utf8_lossy(&out).into_owned()
}

/// Lexically collapse `.` and `..` segments.
///
/// `..` never climbs above the root of an absolute path. A relative path that
/// collapses to nothing becomes `.`.
pub fn normalize_path(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();
	let mut depth = 0usize;
	for component in path.components() {
		match component {
			Component::Prefix(_) | Component::RootDir => normalized.push(component),
			Component::CurDir => {}
			Component::ParentDir => {
				if depth > 0 {
					normalized.pop();
					depth -= 1;
				} else if !normalized.has_root() {
					normalized.push(component);
				}
			}
			Component::Normal(segment) => {
				normalized.push(segment);
				depth += 1;
			}
		}
	}

	if normalized.as_os_str().is_empty() {
		normalized.push(".");
	}
	normalized
}
