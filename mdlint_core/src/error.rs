use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MdlintError {
	#[error(transparent)]
	#[diagnostic(code(mdlint::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read markdown file `{path}`: {reason}")]
	#[diagnostic(code(mdlint::read_file))]
	ReadFile { path: String, reason: String },

	#[error("failed to decode markdown file `{path}`: {reason}")]
	#[diagnostic(
		code(mdlint::decode),
		help("save the file as UTF-8, or as UTF-16 with a byte order mark")
	)]
	Decode { path: String, reason: String },

	#[error("file too large: `{path}` is {size} bytes (limit: {limit} bytes)")]
	#[diagnostic(
		code(mdlint::file_too_large),
		help("raise or remove `max_file_size` in mdlint.toml, or exclude this file")
	)]
	FileTooLarge { path: String, size: u64, limit: u64 },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdlint::config_parse),
		help("check that mdlint.toml is valid TOML with an optional [exclude] section")
	)]
	ConfigParse(String),
}

pub type MdlintResult<T> = Result<T, MdlintError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
