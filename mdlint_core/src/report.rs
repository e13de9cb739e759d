use std::cmp::Ordering;
use std::path::Path;

use crate::Diagnostic;

/// The outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
	/// No markdown files were found under the root.
	NothingToCheck,
	/// Files were checked and none produced a diagnostic.
	Passed,
	/// At least one diagnostic was produced.
	Failed,
}

impl Verdict {
	/// Process exit status for this verdict.
	pub fn exit_code(self) -> i32 {
		match self {
			Self::NothingToCheck | Self::Passed => 0,
			Self::Failed => 1,
		}
	}
}

/// Every diagnostic produced in one run together with the number of files
/// that were scanned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
	pub diagnostics: Vec<Diagnostic>,
	pub files_checked: usize,
}

impl Report {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record one scanned file and the diagnostics it produced.
	pub fn record_file(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
		self.files_checked += 1;
		self.diagnostics.extend(diagnostics);
	}

	/// Order diagnostics by file path, line, category name and message.
	pub fn sort(&mut self) {
		self.diagnostics.sort_by(compare_diagnostics);
	}

	pub fn verdict(&self) -> Verdict {
		if self.files_checked == 0 {
			Verdict::NothingToCheck
		} else if self.diagnostics.is_empty() {
			Verdict::Passed
		} else {
			Verdict::Failed
		}
	}

	/// One `{path}:{line}: [{category}] {message}` line per diagnostic, with
	/// paths shown relative to `root` where possible.
	pub fn diagnostic_lines(&self, root: &Path) -> Vec<String> {
		self.diagnostics
			.iter()
			.map(|diagnostic| {
				format!(
					"{}:{}: [{}] {}",
					relative_display(root, &diagnostic.file),
					diagnostic.line,
					diagnostic.category,
					diagnostic.message
				)
			})
			.collect()
	}

	/// The closing summary line for the current verdict.
	pub fn summary(&self) -> String {
		match self.verdict() {
			Verdict::NothingToCheck => "No .md files found".to_string(),
			Verdict::Passed => {
				format!("Markdown lint passed: {} file(s) checked", self.files_checked)
			}
			Verdict::Failed => {
				format!(
					"Markdown lint failed: {} issue(s) found",
					self.diagnostics.len()
				)
			}
		}
	}

	/// The text printed before the summary: every diagnostic line followed by
	/// a blank line when the run failed, otherwise nothing.
	pub fn render_body(&self, root: &Path) -> String {
		if self.verdict() != Verdict::Failed {
			return String::new();
		}

		let mut output = String::new();
		for line in self.diagnostic_lines(root) {
			output.push_str(&line);
			output.push('\n');
		}
		output.push('\n');
		output
	}

	/// Render the full plain-text report as printed on stdout.
	pub fn render_text(&self, root: &Path) -> String {
		format!("{}{}\n", self.render_body(root), self.summary())
	}
}

fn compare_diagnostics(a: &Diagnostic, b: &Diagnostic) -> Ordering {
	a.file
		.to_string_lossy()
		.cmp(&b.file.to_string_lossy())
		.then(a.line.cmp(&b.line))
		.then_with(|| a.category.as_str().cmp(b.category.as_str()))
		.then_with(|| a.message.cmp(&b.message))
}

/// Display `path` relative to `root`, falling back to the full path.
pub fn relative_display(root: &Path, path: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
