//! Error types for lexdiv-core.

use thiserror::Error;

/// Errors raised while building alphabets or generating texts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
	/// A generation policy was asked to draw from an empty vocabulary.
	#[error("vocabulary is empty, at least one symbol is required")]
	EmptyVocabulary,

	/// The Zipf weighting step was asked to start at rank 0.
	#[error("zipf ranks must start at 1, rank 0 would divide by zero")]
	ZeroRank,

	/// The Zipf rank range is inverted.
	#[error("invalid rank range [{min}, {max}]")]
	InvalidRankRange {
		/// Lowest rank (inclusive).
		min: usize,
		/// Highest rank (inclusive).
		max: usize,
	},

	/// The skew exponent is not a finite positive number.
	#[error("skew exponent must be finite and > 0, got {0}")]
	InvalidSkew(f64),

	/// Permutation length outside of `1..=26`.
	#[error("ngram length must be between 1 and 26, got {0}")]
	InvalidNgramLength(usize),

	/// More symbols were requested than the alphabet holds.
	#[error("vocabulary size {requested} exceeds alphabet capacity {available}")]
	VocabularyTooLarge {
		/// Requested vocabulary size.
		requested: usize,
		/// Number of symbols in the alphabet.
		available: usize,
	},

	/// A policy name could not be parsed.
	#[error("unknown generation policy: {0}. Use: sequential, random, zipf")]
	UnknownPolicy(String),
}

/// Result type alias using [`GenerationError`].
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Errors raised while validating or running a sweep.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
	/// A maximum bound is lower than its minimum.
	#[error("maximum {name} ({max}) should be higher than the minimum ({min})")]
	InvalidBounds {
		/// Which axis is inverted.
		name: &'static str,
		/// Lower bound.
		min: usize,
		/// Upper bound.
		max: usize,
	},

	/// The vocabulary axis starts at 0 symbols.
	#[error("vocabulary size must be at least 1")]
	EmptyVocabularyRange,

	/// A sweep setting exceeds its upper limit.
	#[error("{name} {value} exceeds the limit of {limit}")]
	TooLarge {
		/// Which setting is too large.
		name: &'static str,
		/// Requested value.
		value: usize,
		/// Largest accepted value.
		limit: usize,
	},

	/// `smoothing_runs` is 0.
	#[error("smoothing runs must be at least 1")]
	NoSmoothingRuns,

	/// No measure was requested.
	#[error("at least one measure is required")]
	NoMeasures,

	/// Generation failed for a sweep point.
	#[error(transparent)]
	Generation(#[from] GenerationError),

	/// A parallel worker died before reporting.
	#[error("sweep worker failed: {0}")]
	Worker(String),
}

/// Result type alias using [`SweepError`].
pub type SweepResult<T> = Result<T, SweepError>;
