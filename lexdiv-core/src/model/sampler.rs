use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, GenerationResult};
use crate::text::join_tokens;
use super::sampler_config::SamplerConfig;
use super::vocabulary::Vocabulary;
use super::zipf::ZipfDistribution;

/// Lowest Zipf rank, held by the first symbol of the vocabulary.
const ZIPF_MIN_RANK: usize = 1;

/// Strategy used to pick each token of a generated text.
///
/// # Variants
/// - `Sequential`: cycle through the vocabulary in order, no randomness.
/// - `UniformRandom`: every token is an independent uniform pick.
/// - `ZipfRandom`: every token is an independent pick where the symbol of
///   rank `r` has probability proportional to `r^(-a)`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GenerationPolicy {
	#[default]
	#[serde(rename = "sequential")]
	Sequential,
	#[serde(rename = "random", alias = "uniform")]
	UniformRandom,
	#[serde(rename = "zipf", alias = "zipf-distribution")]
	ZipfRandom,
}

impl GenerationPolicy {
	/// All policies, in menu order.
	pub const ALL: [GenerationPolicy; 3] = [Self::Sequential, Self::UniformRandom, Self::ZipfRandom];

	/// Short name used on the wire and in logs.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Sequential => "sequential",
			Self::UniformRandom => "random",
			Self::ZipfRandom => "zipf",
		}
	}
}

impl fmt::Display for GenerationPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(self.as_str())
	}
}

impl FromStr for GenerationPolicy {
	type Err = GenerationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"sequential" => Ok(Self::Sequential),
			"random" | "uniform" => Ok(Self::UniformRandom),
			"zipf" | "zipf-distribution" => Ok(Self::ZipfRandom),
			_ => Err(GenerationError::UnknownPolicy(s.to_owned())),
		}
	}
}

/// Generates token sequences over a vocabulary.
///
/// # Responsibilities
/// - Produce exactly `length` tokens, all taken from the vocabulary
/// - Keep the three policies independent, none of them keeps state
/// - Draw randomness only from the random source passed by the caller
///
/// The random source is explicit: pass a seeded `StdRng` for reproducible
/// output, or `rand::rng()` for the unseeded, thread-wide behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextSampler {
	config: SamplerConfig,
}

impl TextSampler {
	/// Creates a sampler with the given configuration.
	///
	/// # Errors
	/// Returns `InvalidSkew` if the configuration does not validate.
	pub fn new(config: SamplerConfig) -> GenerationResult<Self> {
		config.validate()?;
		Ok(Self { config })
	}

	/// Returns the sampling configuration.
	pub fn config(&self) -> &SamplerConfig {
		&self.config
	}

	/// Round-robin generation.
	///
	/// Token `i` is `vocabulary[i mod |vocabulary|]`, so every symbol appears
	/// `length / |vocabulary|` times, or once more.
	///
	/// # Errors
	/// Returns `EmptyVocabulary` if there is nothing to cycle through.
	pub fn generate_sequential(&self, vocabulary: &Vocabulary, length: usize) -> GenerationResult<Vec<String>> {
		if vocabulary.is_empty() {
			return Err(GenerationError::EmptyVocabulary);
		}
		let symbols = vocabulary.symbols();
		Ok(symbols.iter().cycle().take(length).cloned().collect())
	}

	/// Uniform random generation.
	///
	/// Draws `length` indices uniformly from `[0, |vocabulary|)` with
	/// replacement and returns the matching symbols in draw order.
	///
	/// # Errors
	/// Returns `EmptyVocabulary` if the vocabulary is empty.
	pub fn generate_uniform_random<R: Rng + ?Sized>(
		&self,
		vocabulary: &Vocabulary,
		length: usize,
		rng: &mut R,
	) -> GenerationResult<Vec<String>> {
		if vocabulary.is_empty() {
			return Err(GenerationError::EmptyVocabulary);
		}
		let symbols = vocabulary.symbols();
		Ok((0..length)
			.map(|_| symbols[rng.random_range(0..symbols.len())].clone())
			.collect())
	}

	/// Zipf-distributed random generation.
	///
	/// Ranks `1..=|vocabulary|` are weighted by `r^(-skew_exponent)`,
	/// `length` ranks are drawn with replacement and rank `r` maps to the
	/// `(r - 1)`-th symbol of the vocabulary.
	///
	/// # Errors
	/// - `EmptyVocabulary` if the vocabulary is empty (the rank range would be empty).
	/// - `InvalidSkew` if the configured exponent is invalid.
	///
	/// # Notes
	/// - With `length == 0` the distribution is not built and the random
	///   source is not touched.
	pub fn generate_zipf_random<R: Rng + ?Sized>(
		&self,
		vocabulary: &Vocabulary,
		length: usize,
		rng: &mut R,
	) -> GenerationResult<Vec<String>> {
		if vocabulary.is_empty() {
			return Err(GenerationError::EmptyVocabulary);
		}
		if length == 0 {
			return Ok(Vec::new());
		}

		let zipf = ZipfDistribution::new(self.config.skew_exponent(), ZIPF_MIN_RANK, vocabulary.len())?;
		zipf.sample_n(rng, length)
			.into_iter()
			.map(|rank| {
				vocabulary
					.by_rank(rank)
					.map(str::to_owned)
					.ok_or(GenerationError::InvalidRankRange { min: ZIPF_MIN_RANK, max: vocabulary.len() })
			})
			.collect()
	}

	/// Generates `length` tokens with the given policy.
	pub fn generate<R: Rng + ?Sized>(
		&self,
		policy: GenerationPolicy,
		vocabulary: &Vocabulary,
		length: usize,
		rng: &mut R,
	) -> GenerationResult<Vec<String>> {
		match policy {
			GenerationPolicy::Sequential => self.generate_sequential(vocabulary, length),
			GenerationPolicy::UniformRandom => self.generate_uniform_random(vocabulary, length, rng),
			GenerationPolicy::ZipfRandom => self.generate_zipf_random(vocabulary, length, rng),
		}
	}

	/// Same as [`TextSampler::generate`], serialized as one space-joined string.
	pub fn generate_text<R: Rng + ?Sized>(
		&self,
		policy: GenerationPolicy,
		vocabulary: &Vocabulary,
		length: usize,
		rng: &mut R,
	) -> GenerationResult<String> {
		Ok(join_tokens(&self.generate(policy, vocabulary, length, rng)?))
	}

	/// Generates a text shaped like `reference`.
	///
	/// The vocabulary is the set of distinct whitespace tokens of `reference`
	/// and the length is its token count.
	///
	/// # Errors
	/// Returns `EmptyVocabulary` if `reference` holds no token.
	pub fn generate_like<R: Rng + ?Sized>(
		&self,
		policy: GenerationPolicy,
		reference: &str,
		rng: &mut R,
	) -> GenerationResult<Vec<String>> {
		let length = reference.split_whitespace().count();
		let vocabulary = Vocabulary::from_text(reference);
		self.generate(policy, &vocabulary, length, rng)
	}
}

/// Round-robin generation with the default sampler.
pub fn generate_sequential(vocabulary: &Vocabulary, length: usize) -> GenerationResult<Vec<String>> {
	TextSampler::default().generate_sequential(vocabulary, length)
}

/// Uniform random generation on the thread-local random source.
pub fn generate_uniform_random(vocabulary: &Vocabulary, length: usize) -> GenerationResult<Vec<String>> {
	TextSampler::default().generate_uniform_random(vocabulary, length, &mut rand::rng())
}

/// Zipf random generation (skew 1.2) on the thread-local random source.
pub fn generate_zipf_random(vocabulary: &Vocabulary, length: usize) -> GenerationResult<Vec<String>> {
	TextSampler::default().generate_zipf_random(vocabulary, length, &mut rand::rng())
}
