use std::collections::BTreeMap;
use std::sync::mpsc;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, SweepError, SweepResult};
use crate::text::{TextStats, tokenize};
use super::alphabet::Alphabet;
use super::sampler::{GenerationPolicy, TextSampler};
use super::sampler_config::SamplerConfig;

/// A score computed on a tokenized text.
///
/// This is where lexical-diversity formulas plug into a sweep. The crate
/// only ships the raw counters [`TokenCount`] and [`TypeCount`].
pub trait Measure: Send + Sync {
	/// Column name of the measure in sweep results.
	fn name(&self) -> &str;

	/// Scores one tokenized text.
	fn score(&self, tokens: &[String]) -> f64;
}

/// A named closure used as a [`Measure`].
pub struct FnMeasure<F> {
	name: String,
	score: F,
}

impl<F> FnMeasure<F>
where
	F: Fn(&[String]) -> f64 + Send + Sync,
{
	/// Wraps `score` under the column name `name`.
	pub fn new(name: impl Into<String>, score: F) -> Self {
		Self { name: name.into(), score }
	}
}

impl<F> Measure for FnMeasure<F>
where
	F: Fn(&[String]) -> f64 + Send + Sync,
{
	fn name(&self) -> &str {
		&self.name
	}

	fn score(&self, tokens: &[String]) -> f64 {
		(self.score)(tokens)
	}
}

/// Number of tokens in the text.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenCount;

impl Measure for TokenCount {
	fn name(&self) -> &str {
		"tokens"
	}

	fn score(&self, tokens: &[String]) -> f64 {
		tokens.len() as f64
	}
}

/// Number of distinct tokens in the text.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypeCount;

impl Measure for TypeCount {
	fn name(&self) -> &str {
		"types"
	}

	fn score(&self, tokens: &[String]) -> f64 {
		TextStats::from_tokens(tokens).types as f64
	}
}

/// Longest text a sweep generates.
pub const MAX_TEXT_LENGTH: usize = 500;

/// Most smoothing runs per sweep point.
pub const MAX_SMOOTHING_RUNS: usize = 50;

/// Most generate-and-score cycles in one sweep.
pub const MAX_TOTAL_CYCLES: usize = 5_000_000;

/// Variable plotted on the x axis of a sweep.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SweepAxis {
	/// x is the vocabulary size, text length is usually constant.
	#[default]
	VocabularySize,
	/// x is the text length, vocabulary size is usually constant.
	TextLength,
}

/// Bounds and settings of a sweep.
///
/// Both ranges are inclusive. Every `(vocab_size, text_length)` pair of the
/// cartesian product is evaluated, vocabulary size first.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SweepPlan {
	pub axis: SweepAxis,
	pub min_vocab_size: usize,
	pub max_vocab_size: usize,
	pub min_text_length: usize,
	pub max_text_length: usize,
	/// Number of texts generated and scored per pair, scores are averaged.
	pub smoothing_runs: usize,
	pub policy: GenerationPolicy,
	pub sampler: SamplerConfig,
}

impl Default for SweepPlan {
	fn default() -> Self {
		Self::vary_vocabulary(10, 50, 50)
	}
}

impl SweepPlan {
	/// Vocabulary sizes `min..=max` at a constant text length.
	pub fn vary_vocabulary(min_vocab_size: usize, max_vocab_size: usize, text_length: usize) -> Self {
		Self {
			axis: SweepAxis::VocabularySize,
			min_vocab_size,
			max_vocab_size,
			min_text_length: text_length,
			max_text_length: text_length,
			smoothing_runs: 10,
			policy: GenerationPolicy::Sequential,
			sampler: SamplerConfig::default(),
		}
	}

	/// Text lengths `min..=max` at a constant vocabulary size.
	pub fn vary_text_length(vocab_size: usize, min_text_length: usize, max_text_length: usize) -> Self {
		Self {
			axis: SweepAxis::TextLength,
			min_vocab_size: vocab_size,
			max_vocab_size: vocab_size,
			min_text_length,
			max_text_length,
			..Self::vary_vocabulary(vocab_size, vocab_size, min_text_length)
		}
	}

	/// Sets the generation policy.
	pub fn with_policy(mut self, policy: GenerationPolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Sets the number of smoothing runs.
	pub fn with_smoothing_runs(mut self, smoothing_runs: usize) -> Self {
		self.smoothing_runs = smoothing_runs;
		self
	}

	/// Sets the sampler configuration.
	pub fn with_sampler(mut self, sampler: SamplerConfig) -> Self {
		self.sampler = sampler;
		self
	}

	/// Checks bounds against an alphabet of `capacity` symbols.
	///
	/// # Errors
	/// - `InvalidBounds` if a maximum is lower than its minimum.
	/// - `EmptyVocabularyRange` if the vocabulary range starts at 0.
	/// - `NoSmoothingRuns` if `smoothing_runs` is 0.
	/// - `Generation(VocabularyTooLarge)` if the largest vocabulary does not fit.
	/// - `TooLarge` if the text length exceeds [`MAX_TEXT_LENGTH`], the runs
	///   exceed [`MAX_SMOOTHING_RUNS`] or the cycle count exceeds
	///   [`MAX_TOTAL_CYCLES`].
	/// - `Generation(InvalidSkew)` if the sampler configuration is invalid.
	pub fn validate(&self, capacity: usize) -> SweepResult<()> {
		if self.max_vocab_size < self.min_vocab_size {
			return Err(SweepError::InvalidBounds {
				name: "vocabulary size",
				min: self.min_vocab_size,
				max: self.max_vocab_size,
			});
		}
		if self.max_text_length < self.min_text_length {
			return Err(SweepError::InvalidBounds {
				name: "text length",
				min: self.min_text_length,
				max: self.max_text_length,
			});
		}
		if self.min_vocab_size == 0 {
			return Err(SweepError::EmptyVocabularyRange);
		}
		if self.smoothing_runs == 0 {
			return Err(SweepError::NoSmoothingRuns);
		}
		if self.max_vocab_size > capacity {
			return Err(GenerationError::VocabularyTooLarge {
				requested: self.max_vocab_size,
				available: capacity,
			}
			.into());
		}
		if self.max_text_length > MAX_TEXT_LENGTH {
			return Err(SweepError::TooLarge {
				name: "text length",
				value: self.max_text_length,
				limit: MAX_TEXT_LENGTH,
			});
		}
		if self.smoothing_runs > MAX_SMOOTHING_RUNS {
			return Err(SweepError::TooLarge {
				name: "smoothing runs",
				value: self.smoothing_runs,
				limit: MAX_SMOOTHING_RUNS,
			});
		}
		let cycles = self.checked_total_cycles().unwrap_or(usize::MAX);
		if cycles > MAX_TOTAL_CYCLES {
			return Err(SweepError::TooLarge { name: "total cycles", value: cycles, limit: MAX_TOTAL_CYCLES });
		}
		self.sampler.validate()?;
		Ok(())
	}

	/// Number of `(vocab_size, text_length)` pairs, saturating at `usize::MAX`.
	pub fn point_count(&self) -> usize {
		self.checked_point_count().unwrap_or(usize::MAX)
	}

	/// Number of generate-and-score cycles the sweep performs, saturating at
	/// `usize::MAX`.
	pub fn total_cycles(&self) -> usize {
		self.checked_total_cycles().unwrap_or(usize::MAX)
	}

	fn checked_point_count(&self) -> Option<usize> {
		let vocab_sizes = self.max_vocab_size.saturating_sub(self.min_vocab_size).checked_add(1)?;
		let text_lengths = self.max_text_length.saturating_sub(self.min_text_length).checked_add(1)?;
		vocab_sizes.checked_mul(text_lengths)
	}

	fn checked_total_cycles(&self) -> Option<usize> {
		self.checked_point_count()?.checked_mul(self.smoothing_runs)
	}

	/// All pairs in evaluation order.
	///
	/// Only meant for plans that passed [`SweepPlan::validate`].
	pub fn pairs(&self) -> Vec<(usize, usize)> {
		let mut pairs = Vec::with_capacity(self.point_count().min(MAX_TOTAL_CYCLES));
		for vocab_size in self.min_vocab_size..=self.max_vocab_size {
			for text_length in self.min_text_length..=self.max_text_length {
				pairs.push((vocab_size, text_length));
			}
		}
		pairs
	}

	fn x_of(&self, vocab_size: usize, text_length: usize) -> usize {
		match self.axis {
			SweepAxis::VocabularySize => vocab_size,
			SweepAxis::TextLength => text_length,
		}
	}
}

/// Averaged scores for one `(vocab_size, text_length)` pair.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SweepPoint {
	/// Value on the sweep axis.
	pub x: usize,
	pub vocab_size: usize,
	pub text_length: usize,
	/// Mean score per measure name.
	pub scores: BTreeMap<String, f64>,
}

impl SweepPoint {
	/// Mean score of the measure called `name`.
	pub fn score(&self, name: &str) -> Option<f64> {
		self.scores.get(name).copied()
	}
}

/// A configured sweep over an alphabet.
///
/// # Responsibilities
/// - Slice the alphabet into the vocabulary of each pair
/// - Generate `smoothing_runs` texts per pair and score each with every measure
/// - Average the scores per measure
///
/// # Notes
/// - Texts are serialized then re-tokenized on whitespace before scoring,
///   measures see exactly what an external scorer reading the text would see.
pub struct Sweep<'a> {
	alphabet: &'a Alphabet,
	plan: SweepPlan,
	sampler: TextSampler,
	measures: Vec<Box<dyn Measure + 'a>>,
}

impl<'a> Sweep<'a> {
	/// Creates a sweep, validating `plan` against the alphabet.
	///
	/// # Errors
	/// See [`SweepPlan::validate`].
	pub fn new(alphabet: &'a Alphabet, plan: SweepPlan) -> SweepResult<Self> {
		plan.validate(alphabet.len())
			.inspect_err(|e| log::warn!("Rejected sweep plan: {e}"))?;
		let sampler = TextSampler::new(plan.sampler)?;
		Ok(Self { alphabet, plan, sampler, measures: Vec::new() })
	}

	/// Adds a measure, builder style.
	pub fn with_measure<M: Measure + 'a>(mut self, measure: M) -> Self {
		self.add_measure(measure);
		self
	}

	/// Adds a measure.
	pub fn add_measure<M: Measure + 'a>(&mut self, measure: M) {
		self.measures.push(Box::new(measure));
	}

	/// Returns the plan.
	pub fn plan(&self) -> &SweepPlan {
		&self.plan
	}

	/// Names of the registered measures, in registration order.
	pub fn measure_names(&self) -> Vec<&str> {
		self.measures.iter().map(|m| m.name()).collect()
	}

	/// Runs the sweep on the given random source.
	pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SweepResult<Vec<SweepPoint>> {
		self.run_with_progress(rng, |_, _| ())
	}

	/// Runs the sweep, calling `progress(completed, total)` after each cycle.
	///
	/// # Errors
	/// - `NoMeasures` if no measure was added.
	/// - `Generation` if a text could not be generated.
	pub fn run_with_progress<R, P>(&self, rng: &mut R, mut progress: P) -> SweepResult<Vec<SweepPoint>>
	where
		R: Rng + ?Sized,
		P: FnMut(usize, usize),
	{
		if self.measures.is_empty() {
			return Err(SweepError::NoMeasures);
		}

		let total = self.plan.total_cycles();
		log::info!(
			"Sweep started: {} policy, {} points, {} cycles",
			self.plan.policy,
			self.plan.point_count(),
			total
		);

		let mut done = 0;
		let mut points = Vec::with_capacity(self.plan.point_count());
		for vocab_size in self.plan.min_vocab_size..=self.plan.max_vocab_size {
			for text_length in self.plan.min_text_length..=self.plan.max_text_length {
				let point = self.evaluate(vocab_size, text_length, rng, &mut || {
					done += 1;
					progress(done, total);
				})?;
				points.push(point);
			}
		}

		log::info!("Sweep finished: {} points", points.len());
		Ok(points)
	}

	/// Runs the sweep on `num_cpus` threads.
	///
	/// Each pair gets its own `StdRng`, seeded in sweep order from a master
	/// generator built from `seed`. The result is the same for a given seed
	/// whatever the number of threads, and no two workers share a stream.
	///
	/// # Errors
	/// Same as [`Sweep::run_with_progress`], plus `Worker` if a thread panics.
	pub fn run_parallel(&self, seed: u64) -> SweepResult<Vec<SweepPoint>> {
		if self.measures.is_empty() {
			return Err(SweepError::NoMeasures);
		}

		let mut master = StdRng::seed_from_u64(seed);
		let jobs: Vec<(usize, (usize, usize), u64)> = self
			.plan
			.pairs()
			.into_iter()
			.enumerate()
			.map(|(index, pair)| (index, pair, master.random::<u64>()))
			.collect();
		let job_count = jobs.len();

		let workers = num_cpus::get().clamp(1, job_count.max(1));
		let chunk_size = job_count.div_ceil(workers).max(1);
		log::info!(
			"Parallel sweep started: {} policy, {} points on {} workers",
			self.plan.policy,
			job_count,
			workers
		);

		let mut slots: Vec<Option<SweepPoint>> = vec![None; job_count];
		thread::scope(|scope| -> SweepResult<()> {
			let (tx, rx) = mpsc::channel();
			let mut handles = Vec::new();
			for chunk in jobs.chunks(chunk_size) {
				let tx = tx.clone();
				handles.push(scope.spawn(move || {
					for &(index, (vocab_size, text_length), point_seed) in chunk {
						let mut rng = StdRng::seed_from_u64(point_seed);
						let point = self.evaluate(vocab_size, text_length, &mut rng, &mut || ());
						// Receiver outlives every worker
						if tx.send((index, point)).is_err() {
							return;
						}
					}
				}));
			}
			drop(tx);

			for (index, point) in rx.iter() {
				slots[index] = Some(point?);
			}
			for handle in handles {
				handle
					.join()
					.map_err(|_| SweepError::Worker("worker thread panicked".to_owned()))?;
			}
			Ok(())
		})?;

		let points: Vec<SweepPoint> = slots.into_iter().flatten().collect();
		if points.len() != job_count {
			return Err(SweepError::Worker(format!("{} of {} points missing", job_count - points.len(), job_count)));
		}
		log::info!("Parallel sweep finished: {} points", points.len());
		Ok(points)
	}

	/// Scores a user-supplied text for overlay on the sweep curve.
	///
	/// `x` is the token count when sweeping text length and the number of
	/// distinct types when sweeping vocabulary size. Returns `None` for a
	/// text without tokens.
	pub fn custom_text_point(&self, text: &str) -> Option<SweepPoint> {
		let tokens = tokenize(text);
		if tokens.is_empty() {
			return None;
		}
		let stats = TextStats::from_tokens(&tokens);
		let scores = self
			.measures
			.iter()
			.map(|m| (m.name().to_owned(), m.score(&tokens)))
			.collect();
		Some(SweepPoint {
			x: self.plan.x_of(stats.types, stats.tokens),
			vocab_size: stats.types,
			text_length: stats.tokens,
			scores,
		})
	}

	/// Generates and scores `smoothing_runs` texts for one pair.
	fn evaluate<R: Rng + ?Sized>(
		&self,
		vocab_size: usize,
		text_length: usize,
		rng: &mut R,
		tick: &mut dyn FnMut(),
	) -> SweepResult<SweepPoint> {
		let vocabulary = self.alphabet.vocabulary(vocab_size)?;
		let runs = self.plan.smoothing_runs;

		let mut sums = vec![0.0; self.measures.len()];
		for _ in 0..runs {
			let text = self.sampler.generate_text(self.plan.policy, &vocabulary, text_length, rng)?;
			let tokens = tokenize(&text);
			for (sum, measure) in sums.iter_mut().zip(&self.measures) {
				*sum += measure.score(&tokens);
			}
			tick();
		}

		let scores: BTreeMap<String, f64> = self
			.measures
			.iter()
			.zip(sums)
			.map(|(measure, sum)| (measure.name().to_owned(), sum / runs as f64))
			.collect();
		log::debug!("Sweep point K={vocab_size} L={text_length}: {scores:?}");

		Ok(SweepPoint {
			x: self.plan.x_of(vocab_size, text_length),
			vocab_size,
			text_length,
			scores,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ttr(tokens: &[String]) -> f64 {
		if tokens.is_empty() {
			return 0.0;
		}
		TextStats::from_tokens(tokens).types as f64 / tokens.len() as f64
	}

	#[test]
	fn default_plan_matches_form_defaults() {
		let plan = SweepPlan::default();
		assert_eq!(plan.axis, SweepAxis::VocabularySize);
		assert_eq!((plan.min_vocab_size, plan.max_vocab_size), (10, 50));
		assert_eq!((plan.min_text_length, plan.max_text_length), (50, 50));
		assert_eq!(plan.smoothing_runs, 10);
		assert_eq!(plan.total_cycles(), 41 * 10);
	}

	#[test]
	fn inverted_bounds_are_rejected() {
		let alphabet = Alphabet::default();
		let plan = SweepPlan::vary_vocabulary(20, 10, 50);
		assert!(matches!(
			Sweep::new(&alphabet, plan).err(),
			Some(SweepError::InvalidBounds { name: "vocabulary size", min: 20, max: 10 })
		));

		let plan = SweepPlan::vary_text_length(5, 100, 10);
		assert!(matches!(
			Sweep::new(&alphabet, plan).err(),
			Some(SweepError::InvalidBounds { name: "text length", .. })
		));
	}

	#[test]
	fn other_invalid_plans() {
		let alphabet = Alphabet::default();
		assert_eq!(
			Sweep::new(&alphabet, SweepPlan::default().with_smoothing_runs(0)).err(),
			Some(SweepError::NoSmoothingRuns)
		);
		assert_eq!(
			Sweep::new(&alphabet, SweepPlan::vary_vocabulary(0, 3, 10)).err(),
			Some(SweepError::EmptyVocabularyRange)
		);
		assert_eq!(
			Sweep::new(&alphabet, SweepPlan::vary_vocabulary(1, 700, 10)).err(),
			Some(SweepError::Generation(GenerationError::VocabularyTooLarge { requested: 700, available: 676 }))
		);
	}

	#[test]
	fn oversized_plans_are_rejected() {
		let alphabet = Alphabet::default();

		let plan = SweepPlan::vary_text_length(5, 0, usize::MAX);
		assert_eq!(plan.point_count(), usize::MAX);
		assert_eq!(plan.total_cycles(), usize::MAX);
		assert_eq!(
			Sweep::new(&alphabet, plan).err(),
			Some(SweepError::TooLarge { name: "text length", value: usize::MAX, limit: MAX_TEXT_LENGTH })
		);

		let plan = SweepPlan::vary_text_length(5, 1, 501);
		assert!(matches!(
			Sweep::new(&alphabet, plan).err(),
			Some(SweepError::TooLarge { name: "text length", value: 501, .. })
		));

		let plan = SweepPlan::default().with_smoothing_runs(51);
		assert!(matches!(
			Sweep::new(&alphabet, plan).err(),
			Some(SweepError::TooLarge { name: "smoothing runs", value: 51, .. })
		));

		let plan = SweepPlan::vary_text_length(5, 0, MAX_TEXT_LENGTH).with_smoothing_runs(MAX_SMOOTHING_RUNS);
		assert!(Sweep::new(&alphabet, plan).is_ok());
	}

	#[test]
	fn sampler_settings_reach_the_sweep() {
		let alphabet = Alphabet::default();
		let steep = SamplerConfig::with_skew_exponent(4.0).unwrap();
		let plan = SweepPlan::vary_vocabulary(20, 20, 200)
			.with_policy(GenerationPolicy::ZipfRandom)
			.with_sampler(steep)
			.with_smoothing_runs(1);
		assert_eq!(plan.sampler.skew_exponent(), 4.0);
		let sweep = Sweep::new(&alphabet, plan).unwrap().with_measure(TypeCount);
		let points = sweep.run(&mut StdRng::seed_from_u64(4)).unwrap();
		// a=4 puts ~92% of the mass on rank 1, far fewer than 20 types show up
		assert!(points[0].score("types").unwrap() < 20.0);
	}

	#[test]
	fn sweep_requires_a_measure() {
		let alphabet = Alphabet::default();
		let sweep = Sweep::new(&alphabet, SweepPlan::default()).unwrap();
		assert_eq!(sweep.run(&mut rand::rng()).err(), Some(SweepError::NoMeasures));
		assert_eq!(sweep.run_parallel(1).err(), Some(SweepError::NoMeasures));
	}

	#[test]
	fn sequential_vocabulary_sweep_scores() {
		let alphabet = Alphabet::default();
		let plan = SweepPlan::vary_vocabulary(1, 5, 10).with_smoothing_runs(3);
		let sweep = Sweep::new(&alphabet, plan)
			.unwrap()
			.with_measure(FnMeasure::new("ttr", ttr))
			.with_measure(TypeCount);
		assert_eq!(sweep.measure_names(), vec!["ttr", "types"]);

		let points = sweep.run(&mut StdRng::seed_from_u64(0)).unwrap();
		assert_eq!(points.len(), 5);
		for (i, point) in points.iter().enumerate() {
			let k = i + 1;
			assert_eq!(point.x, k);
			assert_eq!(point.text_length, 10);
			assert_eq!(point.score("types"), Some(k as f64));
			let mean_ttr = point.score("ttr").unwrap();
			assert!((mean_ttr - k as f64 / 10.0).abs() < 1e-9);
		}
	}

	#[test]
	fn text_length_sweep_uses_length_axis() {
		let alphabet = Alphabet::default();
		let plan = SweepPlan::vary_text_length(4, 2, 6)
			.with_policy(GenerationPolicy::UniformRandom)
			.with_smoothing_runs(2);
		let sweep = Sweep::new(&alphabet, plan).unwrap().with_measure(TokenCount);
		let points = sweep.run(&mut StdRng::seed_from_u64(3)).unwrap();
		let xs: Vec<usize> = points.iter().map(|p| p.x).collect();
		assert_eq!(xs, vec![2, 3, 4, 5, 6]);
		assert!(points.iter().all(|p| p.vocab_size == 4));
		assert!(points.iter().all(|p| p.score("tokens") == Some(p.text_length as f64)));
	}

	#[test]
	fn progress_reaches_total_cycles() {
		let alphabet = Alphabet::default();
		let plan = SweepPlan::vary_vocabulary(3, 6, 20)
			.with_policy(GenerationPolicy::ZipfRandom)
			.with_smoothing_runs(4);
		let sweep = Sweep::new(&alphabet, plan).unwrap().with_measure(TypeCount);

		let mut seen = Vec::new();
		sweep.run_with_progress(&mut StdRng::seed_from_u64(1), |done, total| seen.push((done, total))).unwrap();
		assert_eq!(seen.len(), 16);
		assert_eq!(seen.first(), Some(&(1, 16)));
		assert_eq!(seen.last(), Some(&(16, 16)));
	}

	#[test]
	fn parallel_sweep_is_reproducible() {
		let alphabet = Alphabet::default();
		let plan = SweepPlan::vary_vocabulary(5, 30, 40)
			.with_policy(GenerationPolicy::ZipfRandom)
			.with_smoothing_runs(3);
		let sweep = Sweep::new(&alphabet, plan).unwrap().with_measure(FnMeasure::new("ttr", ttr));

		let first = sweep.run_parallel(77).unwrap();
		let second = sweep.run_parallel(77).unwrap();
		assert_eq!(first, second);
		let xs: Vec<usize> = first.iter().map(|p| p.x).collect();
		assert_eq!(xs, (5..=30).collect::<Vec<_>>());
	}

	#[test]
	fn custom_text_overlay_axis() {
		let alphabet = Alphabet::default();
		let text = "a rose is a rose is a rose";

		let by_vocab = Sweep::new(&alphabet, SweepPlan::default()).unwrap().with_measure(TypeCount);
		let point = by_vocab.custom_text_point(text).unwrap();
		assert_eq!(point.x, 3);
		assert_eq!(point.text_length, 8);

		let by_length = Sweep::new(&alphabet, SweepPlan::vary_text_length(10, 1, 20))
			.unwrap()
			.with_measure(TypeCount);
		let point = by_length.custom_text_point(text).unwrap();
		assert_eq!(point.x, 8);
		assert_eq!(point.score("types"), Some(3.0));

		assert!(by_length.custom_text_point(" \n ").is_none());
	}

	#[test]
	fn plan_deserializes_with_defaults() {
		let plan: SweepPlan = serde_json::from_str(
			r#"{"axis":"text_length","min_vocab_size":7,"max_vocab_size":7,"min_text_length":1,"max_text_length":9,"policy":"zipf"}"#,
		)
		.unwrap();
		assert_eq!(plan.axis, SweepAxis::TextLength);
		assert_eq!(plan.policy, GenerationPolicy::ZipfRandom);
		assert_eq!(plan.smoothing_runs, 10);
		assert_eq!(plan.sampler, SamplerConfig::default());
	}
}
