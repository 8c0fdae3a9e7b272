use std::path::Path;

use assert_cmd::Command;

pub fn mdcc_cmd(root: &Path) -> Command {
	let mut cmd = Command::cargo_bin("mdcc").expect("the mdcc binary is built for tests");
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG").arg("--path").arg(root);
	cmd
}
