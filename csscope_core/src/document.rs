use derive_more::Deref;
use derive_more::DerefMut;

/// The text of a markup template, rewritten in place while it is localized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct MarkupDocument(String);

impl MarkupDocument {
	pub fn new(content: impl Into<String>) -> Self {
		Self(content.into())
	}

	pub fn into_inner(self) -> String {
		self.0
	}

	/// Replace the first occurrence of `from` with `to`. Returns `false` when
	/// `from` does not occur.
	pub fn replace_first(&mut self, from: &str, to: &str) -> bool {
		replace_first(&mut self.0, from, to)
	}
}

/// The text of the stylesheet paired with a markup template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct StyleDocument(String);

impl StyleDocument {
	pub fn new(content: impl Into<String>) -> Self {
		Self(content.into())
	}

	pub fn into_inner(self) -> String {
		self.0
	}

	/// Rename the first `.{class}` selector to `.{scoped}`.
	///
	/// The match has to end on a class name boundary, so renaming `box` leaves
	/// `.boxed` alone. Returns `false` when no selector is left to rename.
	pub fn rename_selector(&mut self, class: &str, scoped: &str) -> bool {
		let needle = format!(".{class}");
		let mut from = 0;

		while let Some(found) = self.0[from..].find(&needle) {
			let start = from + found;
			let end = start + needle.len();
			let at_boundary = self.0[end..]
				.chars()
				.next()
				.is_none_or(|c| !is_class_name_char(c));

			if at_boundary {
				self.0.replace_range(start..end, &format!(".{scoped}"));
				return true;
			}

			// The needle starts with `.`, so one byte on is a char boundary.
			from = start + 1;
		}

		false
	}
}

fn replace_first(content: &mut String, from: &str, to: &str) -> bool {
	let Some(start) = content.find(from) else {
		return false;
	};

	content.replace_range(start..start + from.len(), to);
	true
}

fn is_class_name_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_' || c == '-'
}
