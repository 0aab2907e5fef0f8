use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::CsscopeError;
use crate::CsscopeResult;
use crate::output::is_build_artifact;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"csscope.toml",
	".csscope.toml",
	".config/csscope.toml",
];

/// Default number of characters in a generated salt.
pub const DEFAULT_SALT_LENGTH: usize = 4;

/// Default marker inserted before the extension of build artifacts.
pub const DEFAULT_POST_FIX: &str = ".build";

/// Default extensions treated as markup.
pub const DEFAULT_MARKUP_EXTENSIONS: [&str; 1] = [".html"];

/// Options for a localize run.
///
/// Use [`LocalizeOptions::default()`] for the built-in defaults or
/// [`LocalizeOptions::from_config`] to layer a loaded [`CsscopeConfig`] on
/// top of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizeOptions {
	/// Length of the salt appended to every scoped class name.
	pub salt_length: usize,
	/// Marker inserted before the extension of written files.
	pub post_fix: String,
	/// File name suffixes that identify markup files.
	pub markup_extensions: Vec<String>,
	/// Root that include paths are appended to. When `None`, includes resolve
	/// next to the markup file.
	pub include_path: Option<PathBuf>,
	/// Wrap scoped names written into markup in double quotes.
	pub quote_class_values: bool,
	/// Seed for salt generation. `None` uses fresh randomness on every run.
	pub seed: Option<u64>,
	/// Gitignore-style patterns skipped while walking the tree.
	pub exclude_patterns: Vec<String>,
}

impl Default for LocalizeOptions {
	fn default() -> Self {
		Self {
			salt_length: DEFAULT_SALT_LENGTH,
			post_fix: DEFAULT_POST_FIX.to_string(),
			markup_extensions: DEFAULT_MARKUP_EXTENSIONS
				.iter()
				.map(ToString::to_string)
				.collect(),
			include_path: None,
			quote_class_values: false,
			seed: None,
			exclude_patterns: Vec::new(),
		}
	}
}

impl LocalizeOptions {
	/// Construct [`LocalizeOptions`] from an optional [`CsscopeConfig`].
	/// Keys missing from the config keep their defaults.
	pub fn from_config(config: Option<&CsscopeConfig>) -> Self {
		let mut options = Self::default();
		let Some(config) = config else {
			return options;
		};

		if let Some(salt_length) = config.salt_length {
			options.salt_length = salt_length;
		}
		if let Some(post_fix) = &config.post_fix {
			options.post_fix.clone_from(post_fix);
		}
		if let Some(extensions) = &config.markup_extensions {
			options.markup_extensions.clone_from(extensions);
		}
		if config.include_path.is_some() {
			options.include_path.clone_from(&config.include_path);
		}
		if let Some(quote) = config.quote_class_values {
			options.quote_class_values = quote;
		}
		if config.seed.is_some() {
			options.seed = config.seed;
		}
		options
			.exclude_patterns
			.clone_from(&config.exclude.patterns);

		options
	}

	/// Reject option combinations that would make a run destructive or
	/// meaningless.
	pub fn validate(&self) -> CsscopeResult<()> {
		if self.post_fix.is_empty() {
			return Err(CsscopeError::InvalidOption {
				name: "post_fix".to_string(),
				reason: "an empty postfix would overwrite the source files".to_string(),
			});
		}

		if self.post_fix.contains(['/', '\\']) {
			return Err(CsscopeError::InvalidOption {
				name: "post_fix".to_string(),
				reason: "the postfix cannot contain path separators".to_string(),
			});
		}

		if let Some(extension) = self
			.markup_extensions
			.iter()
			.find(|extension| normalize_extension(extension) == ".")
		{
			return Err(CsscopeError::InvalidOption {
				name: "markup_extensions".to_string(),
				reason: format!("`{extension}` is not a file extension"),
			});
		}

		Ok(())
	}

	/// Whether `path` names a markup file that should be localized. Files that
	/// already carry the postfix are build artifacts and never match.
	pub fn is_markup_file(&self, path: &Path) -> bool {
		let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
			return false;
		};

		if is_build_artifact(path, &self.post_fix) {
			return false;
		}

		// Artifacts are named from the stem and extension, so dotfiles like
		// `.html` cannot be built.
		if path.extension().is_none() {
			return false;
		}

		self.markup_extensions
			.iter()
			.any(|extension| name.ends_with(&normalize_extension(extension)))
	}
}

fn normalize_extension(extension: &str) -> String {
	let trimmed = extension.trim();
	if trimmed.starts_with('.') {
		trimmed.to_string()
	} else {
		format!(".{trimmed}")
	}
}

/// Configuration loaded from a `csscope.toml` file.
///
/// ```toml
/// salt_length = 6
/// post_fix = ".build"
/// markup_extensions = [".html", ".hbs"]
/// include_path = "styles/"
/// quote_class_values = false
/// seed = 42
///
/// [exclude]
/// patterns = ["vendor/", "dist/"]
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CsscopeConfig {
	/// Length of generated salts.
	#[serde(default)]
	pub salt_length: Option<usize>,
	/// Marker inserted before the extension of build artifacts.
	#[serde(default)]
	pub post_fix: Option<String>,
	/// Extensions identifying markup files.
	#[serde(default)]
	pub markup_extensions: Option<Vec<String>>,
	/// Root for include resolution. A relative value is taken relative to the
	/// project root. Include paths are appended to it verbatim, so it usually
	/// ends with a `/`.
	#[serde(default)]
	pub include_path: Option<PathBuf>,
	/// Wrap scoped names written into markup in double quotes.
	#[serde(default)]
	pub quote_class_values: Option<bool>,
	/// Fixed seed for reproducible salts.
	#[serde(default)]
	pub seed: Option<u64>,
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
}

/// Configuration for excluding files from the tree walk.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcludeConfig {
	/// Gitignore-style patterns relative to the project root.
	#[serde(default)]
	pub patterns: Vec<String>,
}

impl CsscopeConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> CsscopeResult<Option<CsscopeConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let mut config = Self::parse(&content)?;

		if let Some(include_path) = config.include_path.take() {
			config.include_path = Some(if include_path.is_absolute() {
				include_path
			} else {
				root.join(include_path)
			});
		}

		Ok(Some(config))
	}

	/// Parse config file contents without touching the filesystem.
	pub fn parse(content: &str) -> CsscopeResult<CsscopeConfig> {
		toml::from_str(content).map_err(|e| CsscopeError::ConfigParse(e.to_string()))
	}
}
