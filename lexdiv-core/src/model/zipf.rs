use rand::Rng;
use rand::distr::Distribution;

use crate::error::{GenerationError, GenerationResult};

/// Zipf-like distribution truncated to the inclusive rank range `[min, max]`.
///
/// Each rank `r` gets the weight `r^(-exponent)`, weights are normalized into
/// a probability mass function and ranks are drawn by inverse-CDF lookup:
/// a uniform `u` in `[0, 1)` selects the first rank whose cumulative
/// probability exceeds `u`.
///
/// # Invariants
/// - `min >= 1`
/// - `min <= max`
/// - `cdf` is non-decreasing, has `max - min + 1` entries and ends at 1.0
#[derive(Clone, Debug, PartialEq)]
pub struct ZipfDistribution {
	exponent: f64,
	min: usize,
	max: usize,
	cdf: Vec<f64>,
}

impl ZipfDistribution {
	/// Builds the distribution over `[min, max]` with skew `exponent`.
	///
	/// # Errors
	/// - `ZeroRank` if `min` is 0. Checked before any weight is computed,
	///   rank 0 would divide by zero.
	/// - `InvalidRankRange` if `max < min`.
	/// - `InvalidSkew` if `exponent` is not finite or not strictly positive.
	pub fn new(exponent: f64, min: usize, max: usize) -> GenerationResult<Self> {
		if min == 0 {
			return Err(GenerationError::ZeroRank);
		}
		if max < min {
			return Err(GenerationError::InvalidRankRange { min, max });
		}
		if !exponent.is_finite() || exponent <= 0.0 {
			return Err(GenerationError::InvalidSkew(exponent));
		}

		let weights: Vec<f64> = (min..=max).map(|rank| 1.0 / (rank as f64).powf(exponent)).collect();
		let total: f64 = weights.iter().sum();

		let mut cdf = Vec::with_capacity(weights.len());
		let mut acc = 0.0;
		for weight in &weights {
			acc += weight / total;
			cdf.push(acc);
		}
		// Rounding can leave the tail slightly below 1.0
		if let Some(last) = cdf.last_mut() {
			*last = 1.0;
		}

		Ok(Self { exponent, min, max, cdf })
	}

	/// Skew exponent.
	pub fn exponent(&self) -> f64 {
		self.exponent
	}

	/// Lowest rank (inclusive).
	pub fn min(&self) -> usize {
		self.min
	}

	/// Highest rank (inclusive).
	pub fn max(&self) -> usize {
		self.max
	}

	/// Probability of drawing `rank`, 0.0 outside of the range.
	pub fn probability(&self, rank: usize) -> f64 {
		if rank < self.min || rank > self.max {
			return 0.0;
		}
		let index = rank - self.min;
		let previous = if index == 0 { 0.0 } else { self.cdf[index - 1] };
		self.cdf[index] - previous
	}

	/// Draws `size` independent ranks, with replacement.
	pub fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, size: usize) -> Vec<usize> {
		(0..size).map(|_| self.sample(rng)).collect()
	}
}

impl Distribution<usize> for ZipfDistribution {
	fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
		let u: f64 = rng.random();
		let index = self.cdf.partition_point(|&c| c <= u).min(self.cdf.len() - 1);
		self.min + index
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn zero_rank_is_a_domain_error() {
		assert_eq!(ZipfDistribution::new(1.2, 0, 10), Err(GenerationError::ZeroRank));
		// Guard fires even when the range is otherwise invalid
		assert_eq!(ZipfDistribution::new(1.2, 0, 0), Err(GenerationError::ZeroRank));
	}

	#[test]
	fn inverted_range_fails() {
		assert_eq!(
			ZipfDistribution::new(1.2, 5, 4),
			Err(GenerationError::InvalidRankRange { min: 5, max: 4 })
		);
	}

	#[test]
	fn invalid_skew_fails() {
		assert!(matches!(ZipfDistribution::new(0.0, 1, 4), Err(GenerationError::InvalidSkew(_))));
		assert!(matches!(ZipfDistribution::new(f64::NAN, 1, 4), Err(GenerationError::InvalidSkew(_))));
	}

	#[test]
	fn pmf_follows_power_law() {
		let zipf = ZipfDistribution::new(1.2, 1, 5).unwrap();
		let total: f64 = (1..=5).map(|r| 1.0 / (r as f64).powf(1.2)).sum();
		for rank in 1..=5 {
			let expected = 1.0 / (rank as f64).powf(1.2) / total;
			assert!((zipf.probability(rank) - expected).abs() < 1e-12);
		}
		assert_eq!(zipf.probability(0), 0.0);
		assert_eq!(zipf.probability(6), 0.0);
	}

	#[test]
	fn single_rank_always_drawn() {
		let zipf = ZipfDistribution::new(1.2, 3, 3).unwrap();
		let mut rng = StdRng::seed_from_u64(7);
		assert!(zipf.sample_n(&mut rng, 50).iter().all(|&r| r == 3));
	}

	#[test]
	fn samples_stay_in_range_and_skew_low() {
		let zipf = ZipfDistribution::new(1.2, 1, 20).unwrap();
		let mut rng = StdRng::seed_from_u64(42);
		let draws = zipf.sample_n(&mut rng, 10_000);

		let mut counts = [0usize; 21];
		for rank in draws {
			assert!((1..=20).contains(&rank));
			counts[rank] += 1;
		}
		assert!(counts[1] > counts[2]);
		assert!(counts[1] > counts[20] * 5);
	}
}
