mod common;

use csscope_core::AnyEmptyResult;
use predicates::boolean::PredicateBooleanExt;

#[test]
fn build_writes_scoped_artifacts() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;

	common::csscope_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Scoped 2 class(es) in 1 template(s)."));

	let markup = std::fs::read_to_string(tmp.path().join("index.build.html"))?;
	assert!(!markup.contains("{include"));
	assert!(markup.contains("class=card__card__"));
	assert!(markup.contains("class=card__title__"));

	let style = std::fs::read_to_string(tmp.path().join("card.build.css"))?;
	assert!(style.contains(".card__card__"));
	assert!(style.contains(".card__title__"));

	// Sources are left untouched.
	let source = std::fs::read_to_string(tmp.path().join("index.html"))?;
	assert!(source.contains("class={card}"));

	Ok(())
}

#[test]
fn build_with_seed_is_reproducible() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;

	let mut outputs = Vec::new();
	for _ in 0..2 {
		common::csscope_cmd()
			.arg("build")
			.arg("--seed")
			.arg("42")
			.arg("--path")
			.arg(tmp.path())
			.assert()
			.success();
		outputs.push(std::fs::read_to_string(tmp.path().join("index.build.html"))?);
	}

	assert_eq!(outputs[0], outputs[1]);

	Ok(())
}

#[test]
fn build_ignores_existing_artifacts() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;

	for _ in 0..2 {
		common::csscope_cmd()
			.arg("build")
			.arg("--path")
			.arg(tmp.path())
			.assert()
			.success()
			.stdout(predicates::str::contains("in 1 template(s)."));
	}

	assert!(!tmp.path().join("index.build.build.html").exists());

	Ok(())
}

#[test]
fn dry_run_writes_nothing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;

	common::csscope_cmd()
		.arg("build")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Dry run: would write 2 file(s):"))
		.stdout(predicates::str::contains("index.build.html"))
		.stdout(predicates::str::contains("card.build.css"));

	assert!(!tmp.path().join("index.build.html").exists());
	assert!(!tmp.path().join("card.build.css").exists());

	Ok(())
}

#[test]
fn include_after_class_fails_without_writing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;
	std::fs::write(
		tmp.path().join("broken.html"),
		"<p class={intro}></p>\n{include card.css}\n",
	)?;

	common::csscope_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("broken.html"))
		.stderr(predicates::str::contains("csscope::include_order"));

	assert!(!tmp.path().join("index.build.html").exists());
	assert!(!tmp.path().join("card.build.css").exists());

	Ok(())
}

#[test]
fn template_without_tags_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("plain.html"), "<p>nothing here</p>\n")?;

	common::csscope_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("csscope::malformed_document"));

	Ok(())
}

#[test]
fn missing_stylesheet_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("index.html"),
		"{include missing.css}<div class={box}></div>",
	)?;

	common::csscope_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("missing.css"));

	Ok(())
}

#[test]
fn unresolved_selector_is_a_warning() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("index.html"),
		"{include card.css}<div class={ghost}></div>",
	)?;
	std::fs::write(tmp.path().join("card.css"), ".card {}\n")?;

	common::csscope_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("csscope::unresolved_selector"))
		.stderr(predicates::str::contains("index.html:1:30"));

	assert!(tmp.path().join("index.build.html").exists());

	Ok(())
}

#[test]
fn json_output_lists_documents() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;

	let output = common::csscope_cmd()
		.arg("build")
		.arg("--format")
		.arg("json")
		.arg("--salt-length")
		.arg("6")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(report["dry_run"], false);
	assert_eq!(report["documents"][0]["markup"], "index.html");
	assert_eq!(report["documents"][0]["style_output"], "card.build.css");
	assert_eq!(report["documents"][0]["namespace"], "card");

	let scoped = report["documents"][0]["classes"][0]["scoped_name"]
		.as_str()
		.unwrap_or_default();
	assert!(scoped.starts_with("card__card__"));
	assert_eq!(scoped.len(), "card__card__".len() + 6);

	Ok(())
}

#[test]
fn quote_flag_wraps_scoped_names() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;

	common::csscope_cmd()
		.arg("build")
		.arg("--quote")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let markup = std::fs::read_to_string(tmp.path().join("index.build.html"))?;
	assert!(markup.contains("class=\"card__card__"));

	Ok(())
}

#[test]
fn single_file_path_builds_only_that_template() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;
	std::fs::write(
		tmp.path().join("other.html"),
		"{include card.css}<p class={card}></p>",
	)?;

	common::csscope_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path().join("other.html"))
		.assert()
		.success();

	assert!(tmp.path().join("other.build.html").exists());
	assert!(!tmp.path().join("index.build.html").exists());

	Ok(())
}

#[test]
fn empty_post_fix_is_rejected() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;

	common::csscope_cmd()
		.arg("build")
		.arg("--post-fix")
		.arg("")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("post_fix"));

	Ok(())
}

#[test]
fn duplicate_class_warning_explains_per_occurrence_renames() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("index.html"),
		"{include card.css}<a class={card}></a><b class={card}></b>",
	)?;
	std::fs::write(tmp.path().join("card.css"), ".card {}\n.card:hover {}\n")?;

	common::csscope_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("csscope::duplicate_class"))
		.stderr(predicates::str::contains("each occurrence gets its own salt"))
		.stderr(predicates::str::contains("only the first").not());

	let style = std::fs::read_to_string(tmp.path().join("card.build.css"))?;
	assert!(!style.contains(".card {"));
	assert!(!style.contains(".card:hover"));

	Ok(())
}
