//! `mdlint_core` is the engine behind the `mdlint` structural
//! markdown linter. It walks a directory tree, scans every `.md` file once,
//! line by line, and reports malformed headers, broken local links and
//! images, inconsistent list indentation, unterminated code fences and
//! malformed tables. No markdown parser is involved.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Root directory
//!   → File enumerator (walks the tree, prunes `.git` and excluded paths)
//!   → Reader (UTF-8, UTF-16 fallback, line ending normalization)
//!   → Scanner (line classifiers + target resolver, one pass per file)
//!   → Report (sorted diagnostics and a pass/fail verdict)
//! ```
//!
//! ## Modules
//!
//! - [`classify`]: Stateless matchers for fences, ATX headers, list items,
//!   table rows and inline links/images.
//! - [`resolver`]: Turns a raw link target into the local path it refers to.
//! - [`scanner`]: The per-file fence-aware state machine producing
//!   diagnostics.
//! - [`project`]: File enumeration, reading and decoding, whole-tree runs.
//! - [`config`]: Optional `mdlint.toml` narrowing which files are linted.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use mdlint_core::lint_project;
//!
//! let root = Path::new(".");
//! let report = lint_project(root).unwrap();
//! print!("{}", report.render_text(root));
//! std::process::exit(report.verdict().exit_code());
//! ```

pub use config::*;
pub use diagnostic::*;
pub use error::*;
pub use project::*;
pub use report::*;
pub use resolver::resolve_target;
pub use scanner::*;

pub mod classify;
pub mod config;
mod diagnostic;
#[allow(unused_assignments)]
mod error;
pub mod project;
mod report;
pub mod resolver;
pub mod scanner;

#[cfg(test)]
mod __fixtures;
