use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn csscope_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("csscope"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// Write a template and its stylesheet into `dir`.
#[allow(dead_code)]
pub fn write_card(dir: &Path) -> std::io::Result<()> {
	std::fs::write(
		dir.join("index.html"),
		"{include card.css}\n<div class={card}>\n  <h2 class={title}>Hi</h2>\n</div>\n",
	)?;
	std::fs::write(
		dir.join("card.css"),
		".card { padding: 1rem; }\n.title { font-weight: bold; }\n",
	)
}
