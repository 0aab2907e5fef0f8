use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use crate::CsscopeError;
use crate::CsscopeResult;

/// Resolve the stylesheet referenced by an include tag.
///
/// With an `include_root` the relative path is appended to the root as-is,
/// without inserting a separator or normalizing `./` and `../`. Without one
/// the last segment of the markup path is replaced by the relative path, so
/// the result always stays next to the markup file, even for a payload
/// starting with `/`.
pub fn resolve_include(markup_path: &Path, relative: &str, include_root: Option<&Path>) -> PathBuf {
	if let Some(root) = include_root {
		let mut joined = OsString::from(root.as_os_str());
		joined.push(relative);
		return PathBuf::from(joined);
	}

	match markup_path.parent() {
		Some(dir) if !dir.as_os_str().is_empty() => {
			let mut joined = OsString::from(dir.as_os_str());
			joined.push("/");
			joined.push(relative);
			PathBuf::from(joined)
		}
		_ => PathBuf::from(relative),
	}
}

/// Derive the scope namespace from an include path: the final segment, cut at
/// its first `.`.
///
/// `../styles/card.module.css` gives `card`.
pub fn scope_namespace(relative: &str) -> CsscopeResult<String> {
	let file_name = relative
		.rsplit(['/', '\\'])
		.next()
		.unwrap_or(relative);

	match file_name.split_once('.') {
		Some((namespace, _)) if !namespace.is_empty() => Ok(namespace.to_string()),
		_ => {
			Err(CsscopeError::InvalidNamespace {
				include: relative.to_string(),
			})
		}
	}
}
