use std::collections::HashMap;

/// Unnamed first column holding the first name.
pub const FIRST_NAME: &str = "";
pub const LAST_NAME: &str = "Nom";
pub const CATEGORY: &str = "Catégorie";
pub const DESCRIPTION: &str = "Description";
/// Newline-delimited list of group names.
pub const GROUPS: &str = "Association avec un groupe?";

/// One data row, keyed by header name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
	cells: HashMap<String, String>,
}

impl Row {
	/// Value of `column`, or `None` if the row has no such cell.
	pub fn get(&self, column: &str) -> Option<&str> {
		self.cells.get(column).map(String::as_str)
	}

	/// Value of `column` when present and non-empty. No trimming is applied.
	pub fn non_empty(&self, column: &str) -> Option<&str> {
		self.get(column).filter(|v| !v.is_empty())
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			cells: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}
