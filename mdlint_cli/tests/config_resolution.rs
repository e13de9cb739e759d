mod common;

use mdlint_core::AnyEmptyResult;

#[test]
fn exclude_patterns_from_mdlint_toml_are_applied() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("vendor"))?;
	std::fs::write(
		tmp.path().join("mdlint.toml"),
		"[exclude]\npatterns = [\"vendor/\"]\n",
	)?;
	std::fs::write(tmp.path().join("readme.md"), "# Readme\n")?;
	std::fs::write(tmp.path().join("vendor/broken.md"), "#Broken\n")?;

	common::mdlint_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("Markdown lint passed: 1 file(s) checked\n");

	Ok(())
}

#[test]
fn dot_config_mdlint_toml_is_discovered() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(
		tmp.path().join(".config/mdlint.toml"),
		"[exclude]\npatterns = [\"drafts/\"]\n",
	)?;
	std::fs::create_dir_all(tmp.path().join("drafts"))?;
	std::fs::write(tmp.path().join("drafts/wip.md"), "#Wip\n")?;

	common::mdlint_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("No .md files found\n");

	Ok(())
}

#[test]
fn mdlint_toml_takes_precedence_over_other_candidates() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("mdlint.toml"),
		"[exclude]\npatterns = [\"a.md\"]\n",
	)?;
	std::fs::write(
		tmp.path().join(".mdlint.toml"),
		"[exclude]\npatterns = [\"b.md\"]\n",
	)?;
	std::fs::write(tmp.path().join("a.md"), "#A\n")?;
	std::fs::write(tmp.path().join("b.md"), "# B\n")?;

	common::mdlint_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("Markdown lint passed: 1 file(s) checked\n");

	Ok(())
}

#[test]
fn invalid_config_exits_with_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("mdlint.toml"), "max_file_size = [\n")?;
	std::fs::write(tmp.path().join("a.md"), "# A\n")?;

	common::mdlint_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stdout("")
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

#[test]
fn max_file_size_aborts_on_large_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("mdlint.toml"), "max_file_size = 8\n")?;
	std::fs::write(tmp.path().join("big.md"), "# A rather long title\n")?;

	common::mdlint_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("file too large"));

	Ok(())
}
