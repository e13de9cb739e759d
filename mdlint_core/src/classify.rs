//! Stateless matchers that recognize the shape of a single markdown line.
//!
//! Each matcher returns a structured match (or `None`) and never looks beyond
//! the line it is given.

use std::ops::Range;

/// Deepest ATX header level.
pub const MAX_HEADER_LEVEL: usize = 6;

/// Minimum run of fence characters that opens or closes a code block.
pub const MIN_FENCE_LENGTH: usize = 3;

/// Minimum dashes in a table separator cell.
const MIN_SEPARATOR_DASHES: usize = 3;

/// The character class of a code fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceChar {
	Backtick,
	Tilde,
}

impl FenceChar {
	fn from_char(ch: char) -> Option<Self> {
		match ch {
			'`' => Some(Self::Backtick),
			'~' => Some(Self::Tilde),
			_ => None,
		}
	}

	pub fn as_char(self) -> char {
		match self {
			Self::Backtick => '`',
			Self::Tilde => '~',
		}
	}
}

/// A code fence delimiter line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceMatch {
	pub fence: FenceChar,
	/// Length of the run of fence characters.
	pub length: usize,
}

/// Match an optionally indented run of three or more backticks or tildes.
/// Anything after the run is the info string and is ignored.
pub fn match_fence(line: &str) -> Option<FenceMatch> {
	let rest = line.trim_start();
	let first = rest.chars().next()?;
	let fence = FenceChar::from_char(first)?;
	let length = rest.chars().take_while(|&ch| ch == first).count();

	(length >= MIN_FENCE_LENGTH).then_some(FenceMatch { fence, length })
}

/// An ATX header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
	/// Number of leading `#` characters, `1..=6`.
	pub level: usize,
	/// Text after the whitespace following the `#` run. May be empty.
	pub title: &'a str,
}

/// Match 1 to 6 leading `#` characters followed by whitespace.
pub fn match_header(line: &str) -> Option<HeaderMatch<'_>> {
	let level = line.bytes().take_while(|&byte| byte == b'#').count();
	if !(1..=MAX_HEADER_LEVEL).contains(&level) {
		return None;
	}

	let rest = &line[level..];
	let title = rest.trim_start();
	if title.len() == rest.len() {
		return None;
	}

	Some(HeaderMatch { level, title })
}

/// True when the line starts with `#` but fails the strict "1 to 6 `#` then
/// whitespace" test, e.g. `#Title` or `#`.
pub fn lacks_space_after_hashes(line: &str) -> bool {
	line.starts_with('#') && match_header(line).is_none()
}

/// The marker that introduces a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker<'a> {
	/// `-`, `+` or `*`.
	Bullet(char),
	/// The digits of an ordered marker such as `12.`.
	Ordinal(&'a str),
}

/// A list item line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItemMatch<'a> {
	/// Number of leading spaces. Tabs are not counted.
	pub indent: usize,
	pub marker: ListMarker<'a>,
}

/// Match leading spaces, a bullet or ordinal marker, whitespace, and content.
pub fn match_list_item(line: &str) -> Option<ListItemMatch<'_>> {
	let indent = line.bytes().take_while(|&byte| byte == b' ').count();
	let rest = &line[indent..];

	let (marker, after) = match rest.bytes().next() {
		Some(bullet @ (b'-' | b'+' | b'*')) => (ListMarker::Bullet(char::from(bullet)), &rest[1..]),
		_ => {
			let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
			if digits == 0 {
				return None;
			}
			let after = rest[digits..].strip_prefix('.')?;
			(ListMarker::Ordinal(&rest[..digits]), after)
		}
	};

	let mut chars = after.chars();
	let separator = chars.next()?;
	if !separator.is_whitespace() || chars.as_str().is_empty() {
		return None;
	}

	Some(ListItemMatch { indent, marker })
}

/// Strip one optional leading and one optional trailing `|`.
fn strip_outer_pipes(text: &str) -> &str {
	let text = text.strip_prefix('|').unwrap_or(text);
	text.strip_suffix('|').unwrap_or(text)
}

fn is_separator_cell(cell: &str) -> bool {
	let cell = cell.strip_prefix(':').unwrap_or(cell);
	let cell = cell.strip_suffix(':').unwrap_or(cell);
	cell.len() >= MIN_SEPARATOR_DASHES && cell.bytes().all(|byte| byte == b'-')
}

/// Match a table separator row such as `| --- | :---: |`: two or more cells
/// of at least three dashes, each optionally colon-bounded.
pub fn is_table_separator(line: &str) -> bool {
	let mut cells = 0usize;
	for cell in strip_outer_pipes(line.trim()).split('|') {
		if !is_separator_cell(cell.trim()) {
			return false;
		}
		cells += 1;
	}

	cells >= 2
}

/// Count the cells of a table row after stripping one optional leading and
/// trailing `|`.
pub fn count_table_columns(line: &str) -> usize {
	strip_outer_pipes(line.trim()).split('|').count()
}

/// The flavour of inline reference to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineKind {
	/// `[text](target)` not preceded by `!`.
	Link,
	/// `![text](target)`.
	Image,
}

/// Find every non-overlapping `[text](target)` or `![text](target)` in the
/// line, scanning left to right, and return the raw target strings.
pub fn find_inline_targets(line: &str, kind: InlineKind) -> Vec<&str> {
	let bytes = line.as_bytes();
	let mut targets = Vec::new();
	let mut cursor = 0;

	while cursor < bytes.len() {
		let open_bracket = match kind {
			InlineKind::Link => {
				(bytes[cursor] == b'[' && (cursor == 0 || bytes[cursor - 1] != b'!'))
					.then_some(cursor)
			}
			InlineKind::Image => {
				(bytes[cursor] == b'!' && bytes.get(cursor + 1) == Some(&b'['))
					.then_some(cursor + 1)
			}
		};

		if let Some((target, end)) = open_bracket.and_then(|open| match_bracket_target(bytes, open))
		{
			targets.push(&line[target]);
			cursor = end;
			continue;
		}

		cursor += 1;
	}

	targets
}

/// Match `[...](target)` where `open` indexes the `[`. The text may not
/// contain `]` and the target must be non-empty and may not contain `)`.
///
/// Returns the byte range of the target and the index just past the `)`.
fn match_bracket_target(bytes: &[u8], open: usize) -> Option<(Range<usize>, usize)> {
	let close = open + 1 + bytes[open + 1..].iter().position(|&byte| byte == b']')?;
	if bytes.get(close + 1) != Some(&b'(') {
		return None;
	}

	let start = close + 2;
	let length = bytes[start..].iter().position(|&byte| byte == b')')?;
	if length == 0 {
		return None;
	}

	Some((start..start + length, start + length + 1))
}
