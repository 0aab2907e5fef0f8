mod common;

use csscope_core::AnyEmptyResult;
use csscope_core::CsscopeConfig;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::csscope_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created"))
		.stdout(predicates::str::contains("Next steps:"));

	let content = std::fs::read_to_string(tmp.path().join("csscope.toml"))?;
	assert!(content.contains("salt_length"));

	// The sample config only holds comments, so it parses to the defaults.
	let config = CsscopeConfig::parse(&content)?;
	assert_eq!(config.salt_length, None);

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	let existing = tmp.path().join(".config/csscope.toml");
	std::fs::write(&existing, "salt_length = 8\n")?;

	common::csscope_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert_eq!(std::fs::read_to_string(&existing)?, "salt_length = 8\n");
	assert!(!tmp.path().join("csscope.toml").exists());

	Ok(())
}
