use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;
use serde::Serialize;

use crate::CsscopeError;
use crate::CsscopeResult;
use crate::LocalizeOptions;
use crate::LocalizedDocument;
use crate::ScopeWarning;
use crate::ScopeWarningKind;
use crate::localize_file;
use crate::salt::TokenSource;
use crate::salt::token_source;
use crate::write_localized;

/// Result of localizing every markup file below a root.
#[derive(Debug, Clone, Serialize)]
pub struct BuildResult {
	/// One entry per markup file, in sorted path order.
	pub documents: Vec<LocalizedDocument>,
	/// Warnings that involve more than one document.
	pub warnings: Vec<ScopeWarning>,
}

impl BuildResult {
	/// Number of class tags scoped across all documents.
	pub fn class_count(&self) -> usize {
		self.documents
			.iter()
			.map(|document| document.classes.len())
			.sum()
	}

	/// Every warning from every document, followed by the cross-document
	/// warnings.
	pub fn all_warnings(&self) -> impl Iterator<Item = &ScopeWarning> {
		self.documents
			.iter()
			.flat_map(|document| document.warnings.iter())
			.chain(self.warnings.iter())
	}

	/// The paths that [`write_builds`] writes, in write order.
	pub fn output_paths(&self) -> Vec<&Path> {
		self.documents
			.iter()
			.flat_map(|document| {
				[
					document.markup_output.as_path(),
					document.style_output.as_path(),
				]
			})
			.collect()
	}
}

/// Localize every markup file below `root` and write the build artifacts.
///
/// Every document is computed before anything is written, so a fatal error
/// in any file leaves the tree untouched.
pub fn localize_tree(root: &Path, options: &LocalizeOptions) -> CsscopeResult<BuildResult> {
	let result = compute_builds(root, options)?;
	write_builds(&result)?;
	Ok(result)
}

/// Localize every markup file below `root` without writing anything. Salts
/// come from [`token_source`] for `options.seed`.
pub fn compute_builds(root: &Path, options: &LocalizeOptions) -> CsscopeResult<BuildResult> {
	let mut source = token_source(options.seed);
	compute_builds_with_source(root, options, source.as_mut())
}

/// Localize every markup file below `root` drawing salts from `source`.
pub fn compute_builds_with_source(
	root: &Path,
	options: &LocalizeOptions,
	source: &mut dyn TokenSource,
) -> CsscopeResult<BuildResult> {
	options.validate()?;

	let files = collect_markup_files(root, options)?;
	tracing::debug!(root = %root.display(), files = files.len(), "collected markup files");

	let mut documents = Vec::with_capacity(files.len());
	let mut warnings = Vec::new();
	let mut stylesheet_owners: HashMap<PathBuf, PathBuf> = HashMap::new();

	for file in files {
		let document = localize_file(&file, options, source)?;

		if let Some(first_markup) = stylesheet_owners.get(&document.style_output) {
			let warning = ScopeWarning {
				file: document.markup_path.clone(),
				kind: ScopeWarningKind::SharedStylesheet {
					stylesheet: document.style_path.clone(),
					first_markup: first_markup.clone(),
				},
				line: document.include_position.line,
				column: document.include_position.column,
			};
			warning.log();
			warnings.push(warning);
		} else {
			stylesheet_owners.insert(
				document.style_output.clone(),
				document.markup_path.clone(),
			);
		}

		documents.push(document);
	}

	Ok(BuildResult {
		documents,
		warnings,
	})
}

/// Write the build artifacts of every computed document.
pub fn write_builds(result: &BuildResult) -> CsscopeResult<()> {
	for document in &result.documents {
		write_localized(document)?;
		tracing::debug!(
			markup = %document.markup_output.display(),
			style = %document.style_output.display(),
			"wrote build artifacts"
		);
	}
	Ok(())
}

/// Collect every markup file below `root` that should be localized, sorted
/// by path. Build artifacts and files matched by the exclude patterns are
/// skipped. When `root` is itself a file it is returned on its own if it is
/// a markup file.
pub fn collect_markup_files(root: &Path, options: &LocalizeOptions) -> CsscopeResult<Vec<PathBuf>> {
	if root.is_file() {
		return Ok(if options.is_markup_file(root) {
			vec![root.to_path_buf()]
		} else {
			Vec::new()
		});
	}

	let exclude = build_exclude_matcher(root, &options.exclude_patterns)?;
	let mut files = Vec::new();
	let mut visited_dirs = HashSet::new();

	walk_dir(root, options, &exclude, &mut files, &mut visited_dirs)?;
	// Sort for deterministic ordering.
	files.sort();
	Ok(files)
}

/// Build a `Gitignore` matcher from the configured exclude patterns.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> CsscopeResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			CsscopeError::InvalidExcludePattern {
				pattern: pattern.clone(),
				reason: e.to_string(),
			}
		})?;
	}
	builder.build().map_err(|e| {
		CsscopeError::InvalidExcludePattern {
			pattern: patterns.join(", "),
			reason: e.to_string(),
		}
	})
}

fn is_ignored_directory_name(name: &str) -> bool {
	name.starts_with('.') || name == "node_modules"
}

fn walk_dir(
	dir: &Path,
	options: &LocalizeOptions,
	exclude: &Gitignore,
	files: &mut Vec<PathBuf>,
	visited_dirs: &mut HashSet<PathBuf>,
) -> CsscopeResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	// Detect symlink cycles by tracking canonical paths.
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if !visited_dirs.insert(canonical) {
		return Err(CsscopeError::SymlinkCycle {
			path: dir.display().to_string(),
		});
	}

	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();
		let is_dir = path.is_dir();

		if exclude.matched(&path, is_dir).is_ignore() {
			continue;
		}

		if is_dir {
			let hidden = path
				.file_name()
				.and_then(|name| name.to_str())
				.is_some_and(is_ignored_directory_name);
			if !hidden {
				walk_dir(&path, options, exclude, files, visited_dirs)?;
			}
		} else if options.is_markup_file(&path) {
			files.push(path);
		}
	}

	Ok(())
}
