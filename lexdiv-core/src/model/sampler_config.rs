use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, GenerationResult};

/// Default Zipf skew exponent.
pub const DEFAULT_SKEW_EXPONENT: f64 = 1.2;

/// Tunable sampling parameters.
///
/// Only Zipf generation reads it for now. Sequential and uniform generation
/// have no parameter.
///
/// # Invariants
/// - `skew_exponent` is finite and strictly positive when set through
///   [`SamplerConfig::set_skew_exponent`] or checked with
///   [`SamplerConfig::validate`]
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct SamplerConfig {
	/// Exponent `a` of the rank weight `r^(-a)`. Higher values sharpen the skew.
	skew_exponent: f64,
}

impl Default for SamplerConfig {
	fn default() -> Self {
		Self { skew_exponent: DEFAULT_SKEW_EXPONENT }
	}
}

impl SamplerConfig {
	/// Creates a configuration with a custom skew exponent.
	///
	/// # Errors
	/// Returns `InvalidSkew` if the exponent is not finite or not > 0.
	pub fn with_skew_exponent(skew_exponent: f64) -> GenerationResult<Self> {
		let mut config = Self::default();
		config.set_skew_exponent(skew_exponent)?;
		Ok(config)
	}

	/// Returns the skew exponent.
	pub fn skew_exponent(&self) -> f64 {
		self.skew_exponent
	}

	/// Sets the skew exponent.
	///
	/// # Errors
	/// Returns `InvalidSkew` if the value is not finite or not > 0.
	/// The previous value is kept on error.
	pub fn set_skew_exponent(&mut self, skew_exponent: f64) -> GenerationResult<()> {
		check_skew_exponent(skew_exponent)?;
		self.skew_exponent = skew_exponent;
		Ok(())
	}

	/// Checks a configuration that came from deserialization.
	pub fn validate(&self) -> GenerationResult<()> {
		check_skew_exponent(self.skew_exponent)
	}
}

/// Skew must be finite and strictly positive.
fn check_skew_exponent(skew_exponent: f64) -> GenerationResult<()> {
	if !skew_exponent.is_finite() || skew_exponent <= 0.0 {
		return Err(GenerationError::InvalidSkew(skew_exponent));
	}
	Ok(())
}
