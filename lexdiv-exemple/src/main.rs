use lexdiv_core::model::alphabet::Alphabet;
use lexdiv_core::model::sampler::{GenerationPolicy, TextSampler};
use lexdiv_core::model::sampler_config::SamplerConfig;
use lexdiv_core::model::sweep::{FnMeasure, Sweep, SweepPlan, TypeCount};
use lexdiv_core::model::vocabulary::Vocabulary;
use lexdiv_core::text::{join_tokens, TextStats};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug prints every sweep point
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Build the symbol universe once: 26 letters + every ordered pair of
    // distinct letters ("ab", "ba", ...), sorted lexicographically
    let alphabet = Alphabet::new(2)?;
    println!("Alphabet size: {}", alphabet.len());

    // Asking for more symbols than the alphabet holds is an error,
    // the alphabet is never grown on demand
    match alphabet.vocabulary(1_000) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Expected error: {e}"),
    }

    // A vocabulary is always the same prefix of the sorted alphabet
    let vocabulary = alphabet.vocabulary(5)?;
    println!("Vocabulary: {:?}", vocabulary.symbols());

    // The random source is explicit: a seeded StdRng gives reproducible texts,
    // rand::rng() gives the unseeded behaviour
    let mut rng = StdRng::seed_from_u64(42);
    let sampler = TextSampler::default();
    for policy in GenerationPolicy::ALL {
        let text = sampler.generate_text(policy, &vocabulary, 20, &mut rng)?;
        println!("{policy:>10}: {text}");
    }

    // The Zipf skew defaults to 1.2, a steeper exponent favours the
    // first symbols even more
    let steep = TextSampler::new(SamplerConfig::with_skew_exponent(2.5)?)?;
    let text = steep.generate_text(GenerationPolicy::ZipfRandom, &vocabulary, 20, &mut rng)?;
    println!("zipf (a=2.5): {text}");

    // Generate a text with the vocabulary and length of a reference text
    let reference = "the quick brown fox jumps over the lazy dog the end";
    let like = sampler.generate_like(GenerationPolicy::ZipfRandom, reference, &mut rng)?;
    println!("Like reference: {}", join_tokens(&like));
    println!("Reference stats: {:?}", TextStats::from_text(reference));
    println!("Generated stats: {:?}", TextStats::from_tokens(&like));

    // Empty vocabularies are rejected by every policy
    match sampler.generate_sequential(&Vocabulary::default(), 10) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Expected error: {e}"),
    }

    // Sweep vocabulary sizes 5..=25 at a text length of 100, averaging
    // 10 smoothing runs per point. Diversity formulas come from outside,
    // a plain type/token ratio closure stands in for one here.
    // The sampler settings travel with the plan
    let plan = SweepPlan::vary_vocabulary(5, 25, 100)
        .with_policy(GenerationPolicy::ZipfRandom)
        .with_sampler(SamplerConfig::with_skew_exponent(1.5)?)
        .with_smoothing_runs(10);

    // Plans are capped (text length, smoothing runs, total cycles)
    match Sweep::new(&alphabet, SweepPlan::vary_text_length(5, 1, 100_000)) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Expected error: {e}"),
    }
    let sweep = Sweep::new(&alphabet, plan)?
        .with_measure(TypeCount)
        .with_measure(FnMeasure::new("type_token_ratio", |tokens: &[String]| {
            TextStats::from_tokens(tokens).types as f64 / tokens.len().max(1) as f64
        }));

    let points = sweep.run_with_progress(&mut rng, |done, total| {
        if done == total {
            println!("{done}/{total} cycles complete");
        }
    })?;
    for point in &points {
        println!("K={:>3} L={:>3} {:?}", point.vocab_size, point.text_length, point.scores);
    }

    // Same sweep spread over all cores, reproducible for a given seed
    let parallel = sweep.run_parallel(7)?;
    println!("Parallel sweep: {} points", parallel.len());

    // Overlay a custom text on the curve (x = number of distinct types here)
    if let Some(point) = sweep.custom_text_point(reference) {
        println!("Custom text at x={}: {:?}", point.x, point.scores);
    }

    Ok(())
}
