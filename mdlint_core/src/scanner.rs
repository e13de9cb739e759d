//! The single-pass, line-oriented scan over one markdown file.
//!
//! The scanner has two macro states. In [`FenceState::Normal`] every content
//! rule (headers, lists, links, images, tables) applies. In
//! [`FenceState::InFence`] only tab detection and fence transitions are
//! checked. A file that ends inside a fence gets one `syntax` diagnostic at
//! the opening fence line.

use std::path::Path;

use crate::Category;
use crate::Diagnostic;
use crate::classify::FenceChar;
use crate::classify::FenceMatch;
use crate::classify::InlineKind;
use crate::classify::MIN_FENCE_LENGTH;
use crate::classify::count_table_columns;
use crate::classify::find_inline_targets;
use crate::classify::is_table_separator;
use crate::classify::lacks_space_after_hashes;
use crate::classify::match_fence;
use crate::classify::match_header;
use crate::classify::match_list_item;
use crate::resolver::resolve_target;

/// Whether the scan is currently inside a fenced code block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FenceState {
	#[default]
	Normal,
	InFence {
		/// Character class of the opening fence. Only a fence of the same
		/// class closes the block.
		fence: FenceChar,
		/// 1-indexed line of the opening fence.
		opened_at: usize,
	},
}

/// Cross-line state for one file. Created fresh for every file.
#[derive(Debug, Clone, Default)]
pub struct ScanState {
	pub fence: FenceState,
	/// Level-1 headers seen so far.
	pub h1_count: usize,
	/// Level of the most recent header outside fences, if any.
	pub last_header_level: Option<usize>,
}

impl ScanState {
	pub fn is_fenced(&self) -> bool {
		matches!(self.fence, FenceState::InFence { .. })
	}

	/// Apply a fence line. Opens a block when in `Normal`; closes it only when
	/// the character class matches the opening fence.
	fn transition(&mut self, fence_match: FenceMatch, line: usize) {
		match self.fence {
			FenceState::Normal => {
				self.fence = FenceState::InFence {
					fence: fence_match.fence,
					opened_at: line,
				};
			}
			FenceState::InFence { fence, .. }
				if fence == fence_match.fence && fence_match.length >= MIN_FENCE_LENGTH =>
			{
				self.fence = FenceState::Normal;
			}
			FenceState::InFence { .. } => {}
		}
	}
}

/// Scan the content of `file` and return every diagnostic found, in the order
/// the rules fired.
///
/// `content` should already have its line endings normalized. Link and image
/// targets are resolved relative to `file` and checked for existence on disk.
pub fn scan_markdown(file: &Path, content: &str) -> Vec<Diagnostic> {
	let lines = split_lines(content);
	let mut scanner = LineScanner::new(file, &lines);
	scanner.run();
	scanner.finish()
}

/// Characters that end a line. Besides `\n` and `\r` this covers the vertical
/// tab, form feed, the ASCII file/group/record separators, NEL and the Unicode
/// line and paragraph separators.
fn is_line_break(ch: char) -> bool {
	matches!(
		ch,
		'\n' | '\r'
			| '\u{0b}' | '\u{0c}'
			| '\u{1c}' | '\u{1d}' | '\u{1e}'
			| '\u{85}' | '\u{2028}' | '\u{2029}'
	)
}

/// Split `content` into lines on every line break character, treating `\r\n`
/// as a single break. A trailing break does not produce an empty final line.
pub fn split_lines(content: &str) -> Vec<&str> {
	let mut lines = Vec::new();
	let mut start = 0;
	let mut chars = content.char_indices().peekable();

	while let Some((index, ch)) = chars.next() {
		if !is_line_break(ch) {
			continue;
		}

		lines.push(&content[start..index]);
		let mut end = index + ch.len_utf8();
		if ch == '\r' {
			if let Some(&(next, '\n')) = chars.peek() {
				chars.next();
				end = next + 1;
			}
		}
		start = end;
	}

	if start < content.len() {
		lines.push(&content[start..]);
	}

	lines
}

/// Walks the lines of one file once, keeping a [`ScanState`] and collecting
/// diagnostics.
struct LineScanner<'a> {
	file: &'a Path,
	lines: &'a [&'a str],
	state: ScanState,
	diagnostics: Vec<Diagnostic>,
}

impl<'a> LineScanner<'a> {
	fn new(file: &'a Path, lines: &'a [&'a str]) -> Self {
		Self {
			file,
			lines,
			state: ScanState::default(),
			diagnostics: Vec::new(),
		}
	}

	fn push(&mut self, line: usize, category: Category, message: impl Into<String>) {
		self.diagnostics
			.push(Diagnostic::new(self.file, line, category, message));
	}

	fn run(&mut self) {
		for index in 0..self.lines.len() {
			self.scan_line(index);
		}
	}

	fn scan_line(&mut self, index: usize) {
		let line_number = index + 1;
		let line = self.lines[index];

		if line.contains('\t') {
			self.push(line_number, Category::Indent, "Tab character found; use spaces");
		}

		if let Some(fence_match) = match_fence(line) {
			self.state.transition(fence_match, line_number);
			return;
		}

		if self.state.is_fenced() {
			return;
		}

		self.check_header(line, line_number);
		self.check_list_item(index, line, line_number);
		self.check_inline_targets(line, line_number);
		self.check_table(index, line, line_number);
	}

	fn check_header(&mut self, line: &str, line_number: usize) {
		let header = match_header(line);

		if header.is_some_and(|header| header.title.trim().is_empty()) {
			self.push(line_number, Category::Header, "Header has no text");
		}

		if lacks_space_after_hashes(line) {
			self.push(
				line_number,
				Category::Header,
				"Missing space after '#' in header",
			);
		}

		let Some(header) = header else {
			return;
		};

		if header.level == 1 {
			self.state.h1_count += 1;
			if self.state.h1_count > 1 {
				self.push(line_number, Category::Header, "Multiple H1 headings found");
			}
		}

		if let Some(previous) = self.state.last_header_level {
			if header.level > previous + 1 {
				self.push(
					line_number,
					Category::Header,
					format!("Header level jumps from H{previous} to H{}", header.level),
				);
			}
		}

		self.state.last_header_level = Some(header.level);
	}

	fn check_list_item(&mut self, index: usize, line: &str, line_number: usize) {
		let Some(item) = match_list_item(line) else {
			return;
		};

		if item.indent % 2 != 0 {
			self.push(
				line_number,
				Category::Indent,
				"List indentation is not a multiple of 2 spaces",
			);
		}

		if item.indent == 0 || index == 0 {
			return;
		}

		let previous = self.lines[index - 1];
		if previous.trim().is_empty() && !previous.starts_with(' ') {
			self.push(
				line_number,
				Category::Indent,
				"Indented list item preceded by blank line; may break nesting",
			);
		}
	}

	fn check_inline_targets(&mut self, line: &str, line_number: usize) {
		for target in find_inline_targets(line, InlineKind::Link) {
			if self.is_missing_local_target(target) {
				self.push(
					line_number,
					Category::Link,
					format!("Broken link target: {target}"),
				);
			}
		}

		for target in find_inline_targets(line, InlineKind::Image) {
			if self.is_missing_local_target(target) {
				self.push(
					line_number,
					Category::Image,
					format!("Missing image file: {target}"),
				);
			}
		}
	}

	/// A target that resolves locally but cannot be confirmed to exist.
	fn is_missing_local_target(&self, target: &str) -> bool {
		resolve_target(self.file, target).is_some_and(|path| !path.exists())
	}

	fn check_table(&mut self, index: usize, line: &str, line_number: usize) {
		if !line.contains('|') {
			return;
		}

		let Some(next) = self.lines.get(index + 1) else {
			return;
		};

		if !is_table_separator(next) {
			return;
		}

		let expected = count_table_columns(line);
		if expected < 2 {
			self.push(
				line_number,
				Category::Table,
				"Table header appears to have fewer than 2 columns",
			);
		}

		let rows = self.lines[index + 2..]
			.iter()
			.take_while(|row| row.contains('|') && !row.trim().is_empty());
		let mismatched: Vec<(usize, usize)> = rows
			.enumerate()
			.map(|(offset, row)| (index + 3 + offset, count_table_columns(row)))
			.filter(|&(_, columns)| columns != expected)
			.collect();

		for (row_number, columns) in mismatched {
			self.push(
				row_number,
				Category::Table,
				format!("Table row has {columns} columns; expected {expected}"),
			);
		}
	}

	fn finish(mut self) -> Vec<Diagnostic> {
		if let FenceState::InFence { opened_at, .. } = self.state.fence {
			self.push(opened_at, Category::Syntax, "Fenced code block is not closed");
		}

		self.diagnostics
	}
}
