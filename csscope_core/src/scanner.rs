use std::path::Path;

use serde::Serialize;

use crate::CsscopeError;

/// The literal that marks a tag as an include directive.
pub const INCLUDE_PREFIX: &str = "include ";

/// A location in a markup document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
	/// 1-indexed line number.
	pub line: usize,
	/// 1-indexed column number, counted in bytes.
	pub column: usize,
	/// Byte offset from the start of the document.
	pub offset: usize,
}

/// What a tag asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum TagKind {
	/// `{include <path>}`: the stylesheet paired with this document.
	Include(String),
	/// `{<class>}`: a class name to scope.
	Class(String),
}

/// A single `{...}` occurrence in a markup document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
	/// The tag text including both braces.
	pub raw: String,
	pub kind: TagKind,
	/// Where the opening brace sits in the document.
	pub position: Position,
}

impl Tag {
	pub fn is_include(&self) -> bool {
		matches!(self.kind, TagKind::Include(_))
	}

	/// The include path or class name carried by this tag.
	pub fn payload(&self) -> &str {
		match &self.kind {
			TagKind::Include(path) => path,
			TagKind::Class(name) => name,
		}
	}
}

/// Failures detected while scanning for tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanError {
	/// A `{` appeared before the tag opened earlier was closed.
	NestedBrace(Position),
}

impl ScanError {
	/// Attach the document path to produce a reportable error.
	pub fn into_error(self, path: &Path) -> CsscopeError {
		match self {
			Self::NestedBrace(position) => {
				CsscopeError::NestedBrace {
					path: path.display().to_string(),
					line: position.line,
					column: position.column,
				}
			}
		}
	}
}

/// Pre-computed line starts for offset to line/column conversion.
struct LineTable {
	line_starts: Vec<usize>,
}

impl LineTable {
	fn new(content: &str) -> Self {
		let mut line_starts = vec![0];
		for (i, byte) in content.bytes().enumerate() {
			if byte == b'\n' {
				line_starts.push(i + 1);
			}
		}
		Self { line_starts }
	}

	fn position(&self, offset: usize) -> Position {
		let line_idx = match self.line_starts.binary_search(&offset) {
			Ok(exact) => exact,
			Err(insert) => insert.saturating_sub(1),
		};

		Position {
			line: line_idx + 1,
			column: offset - self.line_starts[line_idx] + 1,
			offset,
		}
	}
}

/// Classify the body of a tag (the text between the braces).
pub fn classify(body: &str) -> TagKind {
	match body.strip_prefix(INCLUDE_PREFIX) {
		Some(path) => TagKind::Include(path.to_string()),
		None => TagKind::Class(body.to_string()),
	}
}

/// Extract every tag from `content` in document order.
///
/// A tag runs from a `{` to the first `}` after it. Empty braces (`{}`) and a
/// trailing `{` that is never closed are plain text. A `{` inside an open
/// tag is rejected, since tags cannot contain braces.
pub fn scan_tags(content: &str) -> Result<Vec<Tag>, ScanError> {
	let line_table = LineTable::new(content);
	let mut tags = Vec::new();
	let mut open: Option<usize> = None;

	for (offset, byte) in content.bytes().enumerate() {
		match byte {
			b'{' => {
				if open.is_some() {
					return Err(ScanError::NestedBrace(line_table.position(offset)));
				}
				open = Some(offset);
			}
			b'}' => {
				let Some(start) = open.take() else {
					continue;
				};

				// Braces are ASCII so these offsets are always char boundaries.
				let body = &content[start + 1..offset];
				if body.is_empty() {
					continue;
				}

				tags.push(Tag {
					raw: content[start..=offset].to_string(),
					kind: classify(body),
					position: line_table.position(start),
				});
			}
			_ => {}
		}
	}

	Ok(tags)
}
