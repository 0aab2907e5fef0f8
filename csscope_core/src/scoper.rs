use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::MarkupDocument;
use crate::StyleDocument;
use crate::salt::TokenSource;
use crate::salt::generate_token;
use crate::scanner::Tag;

/// Separator between the parts of a scoped class name.
pub const SCOPE_SEPARATOR: &str = "__";

/// The kind of warning raised while scoping classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum ScopeWarningKind {
	/// No unscoped `.{class}` selector was left in the stylesheet, so only the
	/// markup was rewritten.
	UnresolvedSelector { class: String },
	/// The class was already scoped earlier in the same document and received
	/// a second, different name.
	DuplicateClass { class: String },
	/// Another markup file in the same run includes this stylesheet. Both
	/// write the same stylesheet artifact and the later one wins.
	SharedStylesheet {
		stylesheet: PathBuf,
		first_markup: PathBuf,
	},
}

/// A non-fatal problem found while scoping a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeWarning {
	/// The markup file the warning belongs to.
	pub file: PathBuf,
	pub kind: ScopeWarningKind,
	/// 1-indexed line of the offending tag.
	pub line: usize,
	/// 1-indexed column of the offending tag.
	pub column: usize,
}

impl ScopeWarning {
	/// A warning anchored at `tag` in `file`.
	pub fn at(file: &Path, tag: &Tag, kind: ScopeWarningKind) -> Self {
		Self {
			file: file.to_path_buf(),
			kind,
			line: tag.position.line,
			column: tag.position.column,
		}
	}

	/// Emit this warning through `tracing`.
	pub fn log(&self) {
		tracing::warn!(
			file = %self.file.display(),
			line = self.line,
			column = self.column,
			code = self.code(),
			"{}",
			self.message()
		);
	}

	/// Human-readable message for this warning.
	pub fn message(&self) -> String {
		match &self.kind {
			ScopeWarningKind::UnresolvedSelector { class } => {
				format!("no unscoped `.{class}` selector left in the stylesheet")
			}
			ScopeWarningKind::DuplicateClass { class } => {
				format!(
					"class `{class}` is used more than once and gets a separate scoped name each \
					 time"
				)
			}
			ScopeWarningKind::SharedStylesheet {
				stylesheet,
				first_markup,
			} => {
				format!(
					"stylesheet `{}` is also included by `{}`; its build artifact is overwritten",
					stylesheet.display(),
					first_markup.display()
				)
			}
		}
	}

	/// Short code identifying the warning kind.
	pub fn code(&self) -> &'static str {
		match self.kind {
			ScopeWarningKind::UnresolvedSelector { .. } => "csscope::unresolved_selector",
			ScopeWarningKind::DuplicateClass { .. } => "csscope::duplicate_class",
			ScopeWarningKind::SharedStylesheet { .. } => "csscope::shared_stylesheet",
		}
	}
}

/// A class tag after scoping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopedClass {
	/// The class name as written in the tag.
	pub class: String,
	/// `{namespace}__{class}__{salt}`.
	pub scoped_name: String,
	pub salt: String,
	/// Whether a stylesheet selector was renamed for this tag.
	pub selector_renamed: bool,
}

/// Build a scoped class name.
pub fn scoped_class_name(namespace: &str, class: &str, salt: &str) -> String {
	format!("{namespace}{SCOPE_SEPARATOR}{class}{SCOPE_SEPARATOR}{salt}")
}

/// Rewrites class tags in a markup document and the matching selectors in its
/// stylesheet, one tag at a time.
pub struct ClassScoper<'a> {
	file: &'a Path,
	namespace: &'a str,
	salt_length: usize,
	quote_class_values: bool,
	source: &'a mut dyn TokenSource,
	seen: HashSet<String>,
	warnings: Vec<ScopeWarning>,
}

impl<'a> ClassScoper<'a> {
	pub fn new(
		file: &'a Path,
		namespace: &'a str,
		salt_length: usize,
		quote_class_values: bool,
		source: &'a mut dyn TokenSource,
	) -> Self {
		Self {
			file,
			namespace,
			salt_length,
			quote_class_values,
			source,
			seen: HashSet::new(),
			warnings: Vec::new(),
		}
	}

	/// Scope a single class tag.
	///
	/// Only the first remaining occurrence of the tag in `markup` and the
	/// first remaining `.{class}` selector in `style` are rewritten. Each
	/// call draws a fresh salt, even for a class seen before.
	pub fn scope(
		&mut self,
		tag: &Tag,
		markup: &mut MarkupDocument,
		style: &mut StyleDocument,
	) -> ScopedClass {
		let class = tag.payload();
		let salt = generate_token(&mut *self.source, self.salt_length);
		let scoped_name = scoped_class_name(self.namespace, class, &salt);

		if !self.seen.insert(class.to_string()) {
			self.warn(
				tag,
				ScopeWarningKind::DuplicateClass {
					class: class.to_string(),
				},
			);
		}

		let replacement = if self.quote_class_values {
			format!("\"{scoped_name}\"")
		} else {
			scoped_name.clone()
		};
		let replaced = markup.replace_first(&tag.raw, &replacement);
		debug_assert!(replaced, "tag `{}` is missing from the markup", tag.raw);

		let selector_renamed = style.rename_selector(class, &scoped_name);
		if !selector_renamed {
			self.warn(
				tag,
				ScopeWarningKind::UnresolvedSelector {
					class: class.to_string(),
				},
			);
		}

		tracing::debug!(class, scoped = %scoped_name, selector_renamed, "scoped class");

		ScopedClass {
			class: class.to_string(),
			scoped_name,
			salt,
			selector_renamed,
		}
	}

	/// Consume the scoper and return the warnings it collected.
	pub fn finish(self) -> Vec<ScopeWarning> {
		self.warnings
	}

	fn warn(&mut self, tag: &Tag, kind: ScopeWarningKind) {
		let warning = ScopeWarning::at(self.file, tag, kind);
		warning.log();
		self.warnings.push(warning);
	}
}
