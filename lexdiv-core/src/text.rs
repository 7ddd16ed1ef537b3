use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Splits a text into tokens on any Unicode whitespace.
///
/// Leading, trailing and repeated whitespace never produce empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
	text.split_whitespace().map(str::to_owned).collect()
}

/// Serializes a token sequence as a single string.
///
/// Tokens are joined by one space with nothing before the first or after
/// the last, so an empty sequence gives an empty string.
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
	tokens.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(" ")
}

/// Token and type counts of a tokenized text.
///
/// These are raw counts only, any ratio built from them belongs to the
/// measure library consuming the tokens.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextStats {
	/// Number of tokens.
	pub tokens: usize,
	/// Number of distinct tokens.
	pub types: usize,
}

impl TextStats {
	/// Counts tokens and distinct types.
	pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
		let types = tokens.iter().map(AsRef::as_ref).collect::<HashSet<&str>>().len();
		Self { tokens: tokens.len(), types }
	}

	/// Tokenizes `text` on whitespace and counts it.
	pub fn from_text(text: &str) -> Self {
		Self::from_tokens(&tokenize(text))
	}
}
