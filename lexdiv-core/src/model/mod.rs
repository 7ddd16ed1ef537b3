//! Top-level module for synthetic text generation.
//!
//! This module provides:
//! - The symbol universe (`Alphabet`) and its sorted slices (`Vocabulary`)
//! - A truncated Zipf sampler over ranks (`ZipfDistribution`)
//! - Sampling configuration (`SamplerConfig`)
//! - The three generation policies (`TextSampler`)
//! - A sweep engine averaging external measures (`Sweep`)

/// Deterministic symbol universe built from letters and letter permutations.
///
/// Built once per session, then sliced into vocabularies.
pub mod alphabet;

/// Sorted, deduplicated set of symbols eligible for generation.
pub mod vocabulary;

/// Truncated Zipf distribution over an inclusive rank range.
///
/// Uses inverse-CDF sampling over a normalized power-law mass function.
pub mod zipf;

/// Sampling parameters (skew exponent).
pub mod sampler_config;

/// Sequential, uniform random and Zipf random text generation.
pub mod sampler;

/// Vocabulary-size / text-length sweeps with smoothing and aggregation.
///
/// Supports sequential runs on a caller-supplied random source and
/// parallel runs with one independent random stream per worker.
pub mod sweep;
