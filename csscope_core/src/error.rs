use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum CsscopeError {
	#[error(transparent)]
	#[diagnostic(code(csscope::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to read `{path}`: {reason}")]
	#[diagnostic(
		code(csscope::read_file),
		help("check that the file exists and that include paths point at a real stylesheet")
	)]
	ReadFile { path: String, reason: String },

	#[error("failed to write `{path}`: {reason}")]
	#[diagnostic(
		code(csscope::write_file),
		help("check that the output directory exists and is writable")
	)]
	WriteFile { path: String, reason: String },

	#[error("no tags found in `{path}`")]
	#[diagnostic(
		code(csscope::malformed_document),
		help("a markup file needs at least an `{{include <stylesheet>}}` tag to be localized")
	)]
	MalformedDocument { path: String },

	#[error("{path}:{line}:{column}: include tags need to be the first tag")]
	#[diagnostic(
		code(csscope::include_order),
		help("move the `{{include ...}}` tag before every class tag in this file")
	)]
	IncludeOrderViolation {
		path: String,
		line: usize,
		column: usize,
	},

	#[error("class `{class}` in `{path}` is used before any stylesheet was included")]
	#[diagnostic(
		code(csscope::missing_include),
		help("add `{{include <stylesheet>}}` as the first tag of this file")
	)]
	MissingInclude { path: String, class: String },

	#[error("{path}:{line}:{column}: tags cannot contain a `{{`")]
	#[diagnostic(
		code(csscope::nested_brace),
		help("close the previous tag with `}}` before opening a new one")
	)]
	NestedBrace {
		path: String,
		line: usize,
		column: usize,
	},

	#[error("cannot derive a scope namespace from include `{include}`")]
	#[diagnostic(
		code(csscope::invalid_namespace),
		help("the included file name needs a name and an extension, e.g. `styles.css`")
	)]
	InvalidNamespace { include: String },

	#[error("cannot name build artifact for `{path}`: the file has no extension")]
	#[diagnostic(code(csscope::missing_extension))]
	MissingExtension { path: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(csscope::config_parse),
		help("check that csscope.toml is valid TOML and only uses known keys")
	)]
	ConfigParse(String),

	#[error("invalid option `{name}`: {reason}")]
	#[diagnostic(code(csscope::invalid_option))]
	InvalidOption { name: String, reason: String },

	#[error("invalid exclude pattern `{pattern}`: {reason}")]
	#[diagnostic(code(csscope::invalid_exclude_pattern))]
	InvalidExcludePattern { pattern: String, reason: String },

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(csscope::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },
}

pub type CsscopeResult<T> = Result<T, CsscopeError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
