use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::text::tokenize;

/// A set of distinct symbols with a fixed, documented ordering.
///
/// Generation policies need an ordering on top of the set: sequential
/// generation cycles through it and Zipf generation assigns rank 1 to its
/// first element. The ordering is always lexicographic (`Ord` on `String`),
/// whatever order the symbols were supplied in.
///
/// # Invariants
/// - `symbols` is sorted and contains no duplicates
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
	symbols: Vec<String>,
}

impl Vocabulary {
	/// Creates a vocabulary from any collection of symbols.
	///
	/// Duplicates are dropped and the symbols are sorted.
	pub fn new<I, S>(symbols: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let set: BTreeSet<String> = symbols.into_iter().map(Into::into).collect();
		Self { symbols: set.into_iter().collect() }
	}

	/// Builds a vocabulary from an already sorted, deduplicated slice.
	pub(crate) fn from_sorted_prefix(symbols: &[String]) -> Self {
		Self { symbols: symbols.to_vec() }
	}

	/// Distinct whitespace-separated tokens of `text`.
	pub fn from_text(text: &str) -> Self {
		Self::new(tokenize(text))
	}

	/// Symbols in their fixed (lexicographic) order.
	pub fn symbols(&self) -> &[String] {
		&self.symbols
	}

	/// Number of symbols.
	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	/// True if there is no symbol to draw from.
	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	/// Symbol at position `index` of the fixed ordering.
	pub fn get(&self, index: usize) -> Option<&str> {
		self.symbols.get(index).map(String::as_str)
	}

	/// Symbol holding Zipf rank `rank` (1-based).
	pub fn by_rank(&self, rank: usize) -> Option<&str> {
		rank.checked_sub(1).and_then(|index| self.get(index))
	}

	/// True if `symbol` belongs to the vocabulary.
	pub fn contains(&self, symbol: &str) -> bool {
		self.symbols.binary_search_by(|s| s.as_str().cmp(symbol)).is_ok()
	}
}

impl<S: Into<String>> FromIterator<S> for Vocabulary {
	fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
		Self::new(iter)
	}
}

impl From<Vec<String>> for Vocabulary {
	fn from(symbols: Vec<String>) -> Self {
		Self::new(symbols)
	}
}

impl From<Vocabulary> for Vec<String> {
	fn from(vocabulary: Vocabulary) -> Self {
		vocabulary.symbols
	}
}
