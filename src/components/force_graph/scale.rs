//! Ordinal colour scale: each new key takes the next colour in the range.

use std::collections::HashMap;

/// The ten-colour categorical palette.
pub const CATEGORY10: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

#[derive(Clone, Debug)]
pub struct OrdinalScale {
	range: &'static [&'static str],
	domain: HashMap<String, usize>,
}

impl Default for OrdinalScale {
	fn default() -> Self {
		Self::new(CATEGORY10)
	}
}

impl OrdinalScale {
	pub fn new(range: &'static [&'static str]) -> Self {
		Self {
			range,
			domain: HashMap::new(),
		}
	}

	/// Colour for `key`, assigning one on first sight. Wraps once the range
	/// is exhausted.
	pub fn color(&mut self, key: &str) -> &'static str {
		let next = self.domain.len();
		let slot = *self.domain.entry(key.to_owned()).or_insert(next);
		match self.range.len() {
			0 => "#000000",
			len => self.range[slot % len],
		}
	}
}
