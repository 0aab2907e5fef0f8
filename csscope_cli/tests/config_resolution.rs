mod common;

use csscope_core::AnyEmptyResult;

#[test]
fn config_post_fix_and_salt_length_apply() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;
	std::fs::write(
		tmp.path().join("csscope.toml"),
		"post_fix = \".out\"\nsalt_length = 8\n",
	)?;

	common::csscope_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert!(tmp.path().join("index.out.html").exists());
	let style = std::fs::read_to_string(tmp.path().join("card.out.css"))?;
	let start = style.find(".card__card__").unwrap_or_default() + ".card__card__".len();
	let salt: String = style[start..]
		.chars()
		.take_while(char::is_ascii_alphanumeric)
		.collect();
	assert_eq!(salt.len(), 8);

	Ok(())
}

#[test]
fn cli_flags_override_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;
	std::fs::write(tmp.path().join("csscope.toml"), "post_fix = \".out\"\n")?;

	common::csscope_cmd()
		.arg("build")
		.arg("--post-fix")
		.arg(".dist")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert!(tmp.path().join("index.dist.html").exists());
	assert!(!tmp.path().join("index.out.html").exists());

	Ok(())
}

#[test]
fn config_include_path_is_relative_to_project() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("styles"))?;
	std::fs::create_dir_all(tmp.path().join("pages"))?;
	std::fs::write(tmp.path().join("styles/card.css"), ".card {}\n")?;
	std::fs::write(
		tmp.path().join("pages/index.html"),
		"{include card.css}<div class={card}></div>",
	)?;
	std::fs::write(
		tmp.path().join("csscope.toml"),
		"include_path = \"styles/\"\n",
	)?;

	common::csscope_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert!(tmp.path().join("styles/card.build.css").exists());
	assert!(tmp.path().join("pages/index.build.html").exists());

	Ok(())
}

#[test]
fn dot_config_location_is_discovered() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(
		tmp.path().join(".config/csscope.toml"),
		"post_fix = \".cfg\"\n",
	)?;

	common::csscope_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert!(tmp.path().join("index.cfg.html").exists());

	Ok(())
}

#[test]
fn unknown_config_keys_fail() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_card(tmp.path())?;
	std::fs::write(tmp.path().join("csscope.toml"), "salt = 3\n")?;

	common::csscope_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2);

	Ok(())
}
