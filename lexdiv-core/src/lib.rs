//! Synthetic text generation for lexical-diversity experiments.
//!
//! This crate provides the sampling side of a lexical-diversity workbench:
//! - A deterministic symbol alphabet (letters plus letter permutations)
//! - Sorted vocabularies sliced from that alphabet
//! - Sequential, uniform and Zipf-distributed text generation
//! - A sweep engine that averages external measure scores over smoothing runs
//!
//! Diversity formulas themselves (TTR, MATTR, HDD, MTLD...) are not part of
//! this crate. They plug into the sweep through the [`model::sweep::Measure`]
//! trait.

/// Alphabet, vocabulary, sampling and sweep logic.
pub mod model;

/// Error types shared by the generation and sweep layers.
pub mod error;

/// Whitespace tokenization and token sequence serialization.
pub mod text;
