use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use mdlint_cli::MdlintCli;
use mdlint_cli::OutputFormat;
use mdlint_core::MdlintError;
use mdlint_core::Report;
use mdlint_core::Verdict;
use mdlint_core::lint_project;
use mdlint_core::relative_display;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = parse_args();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	match run(&args) {
		Ok(verdict) => process::exit(verdict.exit_code()),
		Err(error) => {
			let report: miette::Report = error.into();
			eprintln!("{report:?}");
			process::exit(1);
		}
	}
}

/// Parse arguments, mapping usage errors to exit status 1 instead of clap's
/// default of 2. Help and version output exit with 0.
fn parse_args() -> MdlintCli {
	match MdlintCli::try_parse() {
		Ok(args) => args,
		Err(error) => {
			error.print().ok();
			let code = match error.kind() {
				ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
				_ => 1,
			};
			process::exit(code);
		}
	}
}

/// Log to stderr so stdout only ever carries lint output.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.init();
}

fn resolve_root(args: &MdlintCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run(args: &MdlintCli) -> Result<Verdict, MdlintError> {
	let root = resolve_root(args);
	let report = lint_project(&root)?;

	match args.format {
		OutputFormat::Text => print_text(&report, &root),
		OutputFormat::Json => print_json(&report, &root),
		OutputFormat::Github => print_github(&report, &root),
	}

	Ok(report.verdict())
}

fn colored_summary(report: &Report) -> String {
	let summary = report.summary();
	match report.verdict() {
		Verdict::NothingToCheck => colored!(summary, yellow),
		Verdict::Passed => colored!(summary, green),
		Verdict::Failed => colored!(summary, red),
	}
}

fn print_text(report: &Report, root: &Path) {
	print!("{}", report.render_body(root));
	println!("{}", colored_summary(report));
}

fn print_json(report: &Report, root: &Path) {
	let diagnostics: Vec<serde_json::Value> = report
		.diagnostics
		.iter()
		.map(|diagnostic| {
			serde_json::json!({
				"file": relative_display(root, &diagnostic.file),
				"line": diagnostic.line,
				"category": diagnostic.category,
				"message": diagnostic.message,
			})
		})
		.collect();
	let output = serde_json::json!({
		"ok": report.verdict().exit_code() == 0,
		"files": report.files_checked,
		"diagnostics": diagnostics,
	});
	println!("{output}");
}

fn print_github(report: &Report, root: &Path) {
	for diagnostic in &report.diagnostics {
		println!(
			"::error file={},line={}::[{}] {}",
			relative_display(root, &diagnostic.file),
			diagnostic.line,
			diagnostic.category,
			diagnostic.message
		);
	}

	println!("{}", colored_summary(report));
}
