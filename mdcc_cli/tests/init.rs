use mdcc_core::AnyEmptyResult;
use mdcc_core::AttributeSyntax;
use mdcc_core::MdccConfig;

mod common;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::mdcc_cmd(tmp.path())
		.arg("init")
		.assert()
		.success()
		.stdout(predicates::str::contains("Created"));

	let config = MdccConfig::load(tmp.path())?.expect("config was written");
	assert_eq!(config, MdccConfig::default());
	assert_eq!(config.syntax, AttributeSyntax::Json);

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let config_path = tmp.path().join(".mdcc.toml");
	std::fs::write(&config_path, "existing config")?;

	common::mdcc_cmd(tmp.path())
		.arg("init")
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert_eq!(std::fs::read_to_string(&config_path)?, "existing config");
	assert!(!tmp.path().join("mdcc.toml").exists());

	Ok(())
}
