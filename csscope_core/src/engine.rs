use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::ClassScoper;
use crate::CsscopeError;
use crate::CsscopeResult;
use crate::LocalizeOptions;
use crate::MarkupDocument;
use crate::Position;
use crate::ScopeWarning;
use crate::ScopedClass;
use crate::StyleDocument;
use crate::Tag;
use crate::build_artifact_path;
use crate::resolve_include;
use crate::salt::TokenSource;
use crate::scan_tags;
use crate::scope_namespace;

/// A markup file and its stylesheet after localization, ready to be written.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedDocument {
	/// The source markup file.
	pub markup_path: PathBuf,
	/// Where the rewritten markup is written.
	pub markup_output: PathBuf,
	/// The rewritten markup.
	pub markup: String,
	/// The stylesheet resolved from the include tag.
	pub style_path: PathBuf,
	/// Where the rewritten stylesheet is written.
	pub style_output: PathBuf,
	/// The rewritten stylesheet.
	pub style: String,
	/// Prefix shared by every scoped class in this document.
	pub namespace: String,
	/// Every class tag in document order.
	pub classes: Vec<ScopedClass>,
	/// Non-fatal problems found while scoping.
	pub warnings: Vec<ScopeWarning>,
	/// Where the include tag sat in the source markup.
	pub include_position: Position,
}

/// Check the tag layout of a document: the first tag has to be the include
/// and no other tag may be one.
fn validate_tags<'t>(markup_path: &Path, tags: &'t [Tag]) -> CsscopeResult<(&'t Tag, &'t [Tag])> {
	let Some((first, rest)) = tags.split_first() else {
		return Err(CsscopeError::MalformedDocument {
			path: markup_path.display().to_string(),
		});
	};

	if let Some(misplaced) = rest.iter().find(|tag| tag.is_include()) {
		return Err(CsscopeError::IncludeOrderViolation {
			path: markup_path.display().to_string(),
			line: misplaced.position.line,
			column: misplaced.position.column,
		});
	}

	if !first.is_include() {
		return Err(CsscopeError::MissingInclude {
			path: markup_path.display().to_string(),
			class: first.payload().to_string(),
		});
	}

	Ok((first, rest))
}

/// Localize one markup document.
///
/// `markup` is the content of the file at `markup_path`. The stylesheet named
/// by the include tag is obtained through `load_style`, which receives the
/// resolved stylesheet path. Nothing is written to disk.
pub fn localize_document<F>(
	markup_path: &Path,
	markup: &str,
	options: &LocalizeOptions,
	source: &mut dyn TokenSource,
	load_style: F,
) -> CsscopeResult<LocalizedDocument>
where
	F: FnOnce(&Path) -> CsscopeResult<String>,
{
	let tags = scan_tags(markup).map_err(|e| e.into_error(markup_path))?;
	let (include, class_tags) = validate_tags(markup_path, &tags)?;

	let relative = include.payload();
	let style_path = resolve_include(markup_path, relative, options.include_path.as_deref());
	let namespace = scope_namespace(relative)?;
	let markup_output = build_artifact_path(markup_path, &options.post_fix)?;
	let style_output = build_artifact_path(&style_path, &options.post_fix)?;

	tracing::debug!(
		stylesheet = %style_path.display(),
		namespace = %namespace,
		classes = class_tags.len(),
		"resolved include"
	);

	let mut markup = MarkupDocument::new(markup);
	markup.replace_first(&include.raw, "");
	let mut style = StyleDocument::new(load_style(&style_path)?);

	let mut scoper = ClassScoper::new(
		markup_path,
		&namespace,
		options.salt_length,
		options.quote_class_values,
		source,
	);
	let classes = class_tags
		.iter()
		.map(|tag| scoper.scope(tag, &mut markup, &mut style))
		.collect();
	let warnings = scoper.finish();

	Ok(LocalizedDocument {
		markup_path: markup_path.to_path_buf(),
		markup_output,
		markup: markup.into_inner(),
		style_path,
		style_output,
		style: style.into_inner(),
		namespace,
		classes,
		warnings,
		include_position: include.position,
	})
}

/// Read a file as UTF-8 text, reporting the path on failure.
pub fn read_file(path: &Path) -> CsscopeResult<String> {
	std::fs::read_to_string(path).map_err(|e| {
		CsscopeError::ReadFile {
			path: path.display().to_string(),
			reason: e.to_string(),
		}
	})
}

/// Read and localize the markup file at `path` together with its stylesheet.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn localize_file(
	path: &Path,
	options: &LocalizeOptions,
	source: &mut dyn TokenSource,
) -> CsscopeResult<LocalizedDocument> {
	let markup = read_file(path)?;
	localize_document(path, &markup, options, source, read_file)
}

/// Write both build artifacts of a localized document.
pub fn write_localized(document: &LocalizedDocument) -> CsscopeResult<()> {
	write_file(&document.markup_output, &document.markup)?;
	write_file(&document.style_output, &document.style)
}

fn write_file(path: &Path, content: &str) -> CsscopeResult<()> {
	std::fs::write(path, content).map_err(|e| {
		CsscopeError::WriteFile {
			path: path.display().to_string(),
			reason: e.to_string(),
		}
	})
}
