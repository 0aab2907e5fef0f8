use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use crate::CsscopeError;
use crate::CsscopeResult;

/// Insert `post_fix` before the final extension of `path`.
///
/// `pages/index.html` with `.build` becomes `pages/index.build.html`. Paths
/// whose file name has no extension (including dotfiles like `.html`) are
/// rejected.
pub fn build_artifact_path(path: &Path, post_fix: &str) -> CsscopeResult<PathBuf> {
	let (Some(stem), Some(extension)) = (path.file_stem(), path.extension()) else {
		return Err(CsscopeError::MissingExtension {
			path: path.display().to_string(),
		});
	};

	let mut file_name = OsString::from(stem);
	file_name.push(post_fix);
	file_name.push(".");
	file_name.push(extension);

	Ok(path.with_file_name(file_name))
}

/// Whether the file name of `path` already carries the build postfix.
pub fn is_build_artifact(path: &Path, post_fix: &str) -> bool {
	if post_fix.is_empty() {
		return false;
	}

	path.file_name()
		.and_then(|name| name.to_str())
		.is_some_and(|name| name.contains(post_fix))
}
