use std::collections::BTreeSet;

use crate::error::{GenerationError, GenerationResult};
use super::vocabulary::Vocabulary;

/// Letters the alphabet is built from.
pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Permutation length used by the sweep tooling by default.
///
/// Gives 26 + 26 * 25 = 676 symbols.
pub const DEFAULT_NGRAM_LENGTH: usize = 2;

/// Builds the set of symbols used as the experiment universe.
///
/// The set contains the 26 lowercase letters and every ordered arrangement
/// of `ngram_length` distinct letters joined into one string
/// (permutations, not combinations: `"ab"` and `"ba"` are both present,
/// `"aa"` is not).
///
/// # Errors
/// Returns `InvalidNgramLength` if `ngram_length` is 0 or greater than 26.
///
/// # Notes
/// - The number of permutations is `26! / (26 - n)!`, anything above 3 or 4
///   grows quickly.
/// - `BTreeSet` keeps the result in lexicographic order, which is the order
///   vocabularies are sliced in.
pub fn build_alphabet(ngram_length: usize) -> GenerationResult<BTreeSet<String>> {
	let letters: Vec<char> = LETTERS.chars().collect();
	if ngram_length == 0 || ngram_length > letters.len() {
		return Err(GenerationError::InvalidNgramLength(ngram_length));
	}

	let mut alphabet: BTreeSet<String> = letters.iter().map(|c| c.to_string()).collect();

	let mut used = vec![false; letters.len()];
	let mut current = String::with_capacity(ngram_length);
	push_permutations(&letters, ngram_length, &mut used, &mut current, &mut alphabet);

	Ok(alphabet)
}

/// Depth-first enumeration of ordered arrangements without repetition.
fn push_permutations(
	letters: &[char],
	remaining: usize,
	used: &mut [bool],
	current: &mut String,
	out: &mut BTreeSet<String>,
) {
	if remaining == 0 {
		out.insert(current.clone());
		return;
	}

	for (i, letter) in letters.iter().enumerate() {
		if used[i] {
			continue;
		}
		used[i] = true;
		current.push(*letter);
		push_permutations(letters, remaining - 1, used, current, out);
		current.pop();
		used[i] = false;
	}
}

/// Immutable, sorted symbol universe.
///
/// # Invariants
/// - `symbols` is sorted lexicographically and contains no duplicates
/// - `symbols` never changes after construction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
	ngram_length: usize,
	symbols: Vec<String>,
}

impl Alphabet {
	/// Builds the alphabet for the given permutation length.
	///
	/// # Errors
	/// See [`build_alphabet`].
	pub fn new(ngram_length: usize) -> GenerationResult<Self> {
		let symbols: Vec<String> = build_alphabet(ngram_length)?.into_iter().collect();
		log::debug!("Built alphabet of {} symbols (ngram length {})", symbols.len(), ngram_length);
		Ok(Self { ngram_length, symbols })
	}

	/// Permutation length the alphabet was built with.
	pub fn ngram_length(&self) -> usize {
		self.ngram_length
	}

	/// Number of symbols, i.e. the largest vocabulary that can be sliced.
	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	/// True if the alphabet holds no symbol. Never the case after `new`.
	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	/// All symbols in lexicographic order.
	pub fn symbols(&self) -> &[String] {
		&self.symbols
	}

	/// Returns the vocabulary made of the first `size` symbols.
	///
	/// The same `size` always selects the same symbols.
	///
	/// # Errors
	/// Returns `VocabularyTooLarge` if `size` exceeds the alphabet length.
	/// The alphabet is never grown on demand, callers that need more symbols
	/// build an alphabet with a longer `ngram_length`.
	pub fn vocabulary(&self, size: usize) -> GenerationResult<Vocabulary> {
		if size > self.symbols.len() {
			return Err(GenerationError::VocabularyTooLarge {
				requested: size,
				available: self.symbols.len(),
			});
		}
		Ok(Vocabulary::from_sorted_prefix(&self.symbols[..size]))
	}
}

impl Default for Alphabet {
	fn default() -> Self {
		// 26 + 650 symbols, ngram length 2 is always valid
		let symbols = build_alphabet(DEFAULT_NGRAM_LENGTH)
			.map(|set| set.into_iter().collect())
			.unwrap_or_default();
		Self { ngram_length: DEFAULT_NGRAM_LENGTH, symbols }
	}
}
