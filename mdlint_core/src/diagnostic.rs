use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// The rule family a [`Diagnostic`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	/// Tabs and list indentation.
	Indent,
	/// ATX header shape, duplicate H1 and level jumps.
	Header,
	/// Local link targets that do not exist.
	Link,
	/// Local image files that do not exist.
	Image,
	/// Table header and row column counts.
	Table,
	/// Unterminated code fences.
	Syntax,
}

impl Category {
	/// The lowercase name used in rendered output and for report ordering.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Indent => "indent",
			Self::Header => "header",
			Self::Link => "link",
			Self::Image => "image",
			Self::Table => "table",
			Self::Syntax => "syntax",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One reported defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
	/// The markdown file the defect was found in.
	pub file: PathBuf,
	/// 1-indexed line number.
	pub line: usize,
	pub category: Category,
	pub message: String,
}

impl Diagnostic {
	pub fn new(
		file: impl Into<PathBuf>,
		line: usize,
		category: Category,
		message: impl Into<String>,
	) -> Self {
		Self {
			file: file.into(),
			line,
			category,
			message: message.into(),
		}
	}
}
