mod common;

use csscope_core::AnyEmptyResult;
use predicates::boolean::PredicateBooleanExt;

#[test]
fn list_shows_templates_but_not_artifacts() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;
	std::fs::create_dir_all(tmp.path().join("pages"))?;
	std::fs::write(tmp.path().join("pages/about.html"), "{include ../card.css}")?;
	std::fs::write(tmp.path().join("index.build.html"), "stale")?;

	common::csscope_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("index.html"))
		.stdout(predicates::str::contains("about.html"))
		.stdout(predicates::str::contains("2 template(s)"))
		.stdout(predicates::str::contains("index.build.html").not());

	Ok(())
}

#[test]
fn list_respects_extension_override() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;
	std::fs::write(tmp.path().join("card.hbs"), "{include card.css}")?;

	let output = common::csscope_cmd()
		.arg("list")
		.arg("--ext")
		.arg(".hbs")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let files: Vec<String> = serde_json::from_slice(&output.stdout)?;
	assert_eq!(files, vec!["card.hbs".to_string()]);

	Ok(())
}

#[test]
fn list_reports_empty_projects() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::csscope_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("No markup templates found."));

	Ok(())
}
