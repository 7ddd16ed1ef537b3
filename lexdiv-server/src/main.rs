use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use lexdiv_core::model::alphabet::{Alphabet, DEFAULT_NGRAM_LENGTH};
use lexdiv_core::model::sampler::{GenerationPolicy, TextSampler};
use lexdiv_core::model::sampler_config::SamplerConfig;
use lexdiv_core::model::sweep::{Sweep, SweepPlan, SweepPoint, TokenCount, TypeCount, MAX_TEXT_LENGTH};
use lexdiv_core::text::{join_tokens, TextStats};

/// Server settings, read from flags or environment.
#[derive(Parser, Debug)]
#[command(name = "lexdiv-server", version, about = "Synthetic text generation API for lexical-diversity sweeps")]
struct Settings {
	/// Address to bind.
	#[arg(long, env = "LEXDIV_HOST", default_value = "127.0.0.1")]
	host: String,

	/// Port to bind.
	#[arg(long, env = "LEXDIV_PORT", default_value_t = 5000)]
	port: u16,

	/// Permutation length of the alphabet (2 gives 676 symbols).
	#[arg(long, env = "LEXDIV_NGRAM_LENGTH", default_value_t = DEFAULT_NGRAM_LENGTH)]
	ngram_length: usize,

	/// Seed of the shared random source. Entropy-seeded when absent.
	#[arg(long, env = "LEXDIV_SEED")]
	seed: Option<u64>,

	/// Longest text `/v1/generate` and `/v1/compare` will produce.
	#[arg(long, env = "LEXDIV_MAX_LENGTH", default_value_t = MAX_TEXT_LENGTH)]
	max_length: usize,
}

/// Alphabet built once at startup, plus the shared random source used by
/// requests that do not carry their own seed.
struct SharedData {
	alphabet: Alphabet,
	rng: Mutex<StdRng>,
	max_length: usize,
}

impl SharedData {
	fn new(alphabet: Alphabet, seed: Option<u64>, max_length: usize) -> Self {
		let rng = match seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		Self { alphabet, rng: Mutex::new(rng), max_length }
	}
}

/// Query parameters of `/v1/generate`.
#[derive(Deserialize)]
struct GenerateParams {
	policy: Option<String>,
	vocab_size: Option<usize>,
	length: Option<usize>,
	skew_exponent: Option<f64>,
	seed: Option<u64>,
}

impl GenerateParams {
	fn policy(&self) -> Result<GenerationPolicy, String> {
		match &self.policy {
			None => Ok(GenerationPolicy::Sequential),
			Some(s) => s.parse().map_err(|e| format!("{e}")),
		}
	}

	fn sampler(&self) -> Result<TextSampler, String> {
		let config = match self.skew_exponent {
			Some(skew) => SamplerConfig::with_skew_exponent(skew).map_err(|e| e.to_string())?,
			None => SamplerConfig::default(),
		};
		TextSampler::new(config).map_err(|e| e.to_string())
	}
}

#[derive(Serialize)]
struct AlphabetResponse<'a> {
	ngram_length: usize,
	size: usize,
	symbols: &'a [String],
}

/// Body of `/v1/sweep`: a plan plus optional seed and overlay text.
#[derive(Deserialize)]
struct SweepRequest {
	#[serde(flatten)]
	plan: SweepPlan,
	seed: Option<u64>,
	custom_text: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
struct SweepResponse {
	seed: u64,
	total_cycles: usize,
	points: Vec<SweepPoint>,
	custom: Option<SweepPoint>,
}

/// Body of `/v1/compare`.
#[derive(Deserialize)]
struct CompareRequest {
	texts: BTreeMap<String, String>,
	generate: Option<String>,
	seed: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug)]
struct GeneratedText {
	policy: GenerationPolicy,
	text: String,
}

#[derive(Serialize, Deserialize, Debug)]
struct CompareResponse {
	stats: BTreeMap<String, TextStats>,
	generated: Option<GeneratedText>,
}

/// Reference text used to shape the generated comparison text.
const COMPARE_REFERENCE_ID: &str = "text1";

fn bad_request(e: impl Display) -> HttpResponse {
	HttpResponse::BadRequest().body(e.to_string())
}

/// Rejects generation requests longer than the configured maximum.
fn check_length(data: &SharedData, length: usize) -> Result<(), HttpResponse> {
	if length > data.max_length {
		return Err(bad_request(format!("length {length} exceeds the limit of {}", data.max_length)));
	}
	Ok(())
}

/// Draws a fresh seed from the shared random source.
fn next_seed(data: &SharedData) -> Result<u64, HttpResponse> {
	match data.rng.lock() {
		Ok(mut rng) => Ok(rng.random()),
		Err(_) => Err(HttpResponse::InternalServerError().body("Random source lock failed")),
	}
}

/// HTTP GET endpoint `/v1/alphabet`
///
/// Returns the sorted symbol universe as JSON.
#[get("/v1/alphabet")]
async fn get_alphabet(data: web::Data<SharedData>) -> impl Responder {
	HttpResponse::Ok().json(AlphabetResponse {
		ngram_length: data.alphabet.ngram_length(),
		size: data.alphabet.len(),
		symbols: data.alphabet.symbols(),
	})
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates one text over the first `vocab_size` symbols of the alphabet.
/// Returns the space-joined text as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let vocab_size = query.vocab_size.unwrap_or(10);
	let length = query.length.unwrap_or(50);
	if let Err(response) = check_length(&data, length) {
		return response;
	}

	let policy = match query.policy() {
		Ok(p) => p,
		Err(e) => return bad_request(e),
	};
	let sampler = match query.sampler() {
		Ok(s) => s,
		Err(e) => return bad_request(e),
	};
	let vocabulary = match data.alphabet.vocabulary(vocab_size) {
		Ok(v) => v,
		Err(e) => return bad_request(e),
	};

	let result = match query.seed {
		Some(seed) => sampler.generate(policy, &vocabulary, length, &mut StdRng::seed_from_u64(seed)),
		None => match data.rng.lock() {
			Ok(mut rng) => sampler.generate(policy, &vocabulary, length, &mut *rng),
			Err(_) => return HttpResponse::InternalServerError().body("Random source lock failed"),
		},
	};

	match result {
		Ok(tokens) => HttpResponse::Ok().body(join_tokens(&tokens)),
		Err(e) => bad_request(e),
	}
}

/// HTTP POST endpoint `/v1/sweep`
///
/// Runs a sweep scored with the `tokens` and `types` counters. Diversity
/// measures are computed by the client from the same texts.
#[post("/v1/sweep")]
async fn post_sweep(data: web::Data<SharedData>, body: web::Json<SweepRequest>) -> impl Responder {
	let request = body.into_inner();
	let seed = match request.seed {
		Some(seed) => seed,
		None => match next_seed(&data) {
			Ok(seed) => seed,
			Err(response) => return response,
		},
	};

	let shared = data.into_inner();
	let outcome = web::block(move || {
		let sweep = Sweep::new(&shared.alphabet, request.plan)?
			.with_measure(TokenCount)
			.with_measure(TypeCount);
		let points = sweep.run_parallel(seed)?;
		let custom = request.custom_text.as_deref().and_then(|text| sweep.custom_text_point(text));
		Ok::<_, lexdiv_core::error::SweepError>(SweepResponse {
			seed,
			total_cycles: sweep.plan().total_cycles(),
			points,
			custom,
		})
	})
	.await;

	match outcome {
		Ok(Ok(response)) => HttpResponse::Ok().json(response),
		Ok(Err(e)) => bad_request(e),
		Err(e) => HttpResponse::InternalServerError().body(format!("Sweep failed: {e}")),
	}
}

/// HTTP POST endpoint `/v1/compare`
///
/// Counts tokens and types of each non-empty text. When `generate` names a
/// policy, also generates a text with the vocabulary and length of `text1`.
#[post("/v1/compare")]
async fn post_compare(data: web::Data<SharedData>, body: web::Json<CompareRequest>) -> impl Responder {
	let request = body.into_inner();

	let stats: BTreeMap<String, TextStats> = request
		.texts
		.iter()
		.map(|(id, text)| (id.clone(), TextStats::from_text(text)))
		.filter(|(_, stats)| stats.tokens > 0)
		.collect();

	let generated = match &request.generate {
		None => None,
		Some(name) => {
			let policy: GenerationPolicy = match name.parse() {
				Ok(p) => p,
				Err(e) => return bad_request(e),
			};
			let reference = request.texts.get(COMPARE_REFERENCE_ID).map(String::as_str).unwrap_or_default();
			if let Err(response) = check_length(&data, reference.split_whitespace().count()) {
				return response;
			}
			let seed = match request.seed {
				Some(seed) => seed,
				None => match next_seed(&data) {
					Ok(seed) => seed,
					Err(response) => return response,
				},
			};
			let mut rng = StdRng::seed_from_u64(seed);
			match TextSampler::default().generate_like(policy, reference, &mut rng) {
				Ok(tokens) => Some(GeneratedText { policy, text: join_tokens(&tokens) }),
				Err(e) => return bad_request(format!("Cannot generate like {COMPARE_REFERENCE_ID}: {e}")),
			}
		}
	};

	HttpResponse::Ok().json(CompareResponse { stats, generated })
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_alphabet)
		.service(get_generated)
		.service(post_sweep)
		.service(post_compare);
}

/// Main entry point for the server.
///
/// Builds the alphabet once, shares it with the random source between
/// workers and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let settings = Settings::parse();

	let alphabet = Alphabet::new(settings.ngram_length)
		.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
	log::info!(
		"Alphabet ready: {} symbols (ngram length {})",
		alphabet.len(),
		alphabet.ngram_length()
	);

	let shared_data = web::Data::new(SharedData::new(alphabet, settings.seed, settings.max_length));

	log::info!("Listening on {}:{}", settings.host, settings.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.configure(configure)
	})
		.bind((settings.host.as_str(), settings.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::test;

	fn shared() -> web::Data<SharedData> {
		web::Data::new(SharedData::new(Alphabet::default(), Some(1), MAX_TEXT_LENGTH))
	}

	#[actix_web::test]
	async fn alphabet_endpoint_lists_symbols() {
		let app = test::init_service(App::new().app_data(shared()).configure(configure)).await;
		let req = test::TestRequest::get().uri("/v1/alphabet").to_request();
		let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body["size"], 676);
		assert_eq!(body["ngram_length"], 2);
		assert_eq!(body["symbols"][0], "a");
	}

	#[actix_web::test]
	async fn generate_sequential_text() {
		let app = test::init_service(App::new().app_data(shared()).configure(configure)).await;
		let req = test::TestRequest::get()
			.uri("/v1/generate?policy=sequential&vocab_size=3&length=7")
			.to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "a ab ac a ab ac a");
	}

	#[actix_web::test]
	async fn seeded_generation_is_reproducible() {
		let app = test::init_service(App::new().app_data(shared()).configure(configure)).await;
		let uri = "/v1/generate?policy=zipf&vocab_size=20&length=30&seed=12";
		let first = test::call_and_read_body(&app, test::TestRequest::get().uri(uri).to_request()).await;
		let second = test::call_and_read_body(&app, test::TestRequest::get().uri(uri).to_request()).await;
		assert_eq!(first, second);
		assert_eq!(std::str::from_utf8(&first).unwrap().split(' ').count(), 30);
	}

	#[actix_web::test]
	async fn generate_rejects_bad_input() {
		let app = test::init_service(App::new().app_data(shared()).configure(configure)).await;
		for uri in [
			"/v1/generate?policy=markov",
			"/v1/generate?vocab_size=1000",
			"/v1/generate?vocab_size=0",
			"/v1/generate?policy=zipf&skew_exponent=-1",
		] {
			let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
			assert_eq!(resp.status(), 400, "{uri}");
		}
	}

	#[actix_web::test]
	async fn generate_rejects_oversized_length() {
		let app = test::init_service(App::new().app_data(shared()).configure(configure)).await;
		let uri = format!("/v1/generate?vocab_size=3&length={}", usize::MAX);
		let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
		assert_eq!(resp.status(), 400);

		let uri = format!("/v1/generate?vocab_size=3&length={}", MAX_TEXT_LENGTH + 1);
		let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
		assert_eq!(resp.status(), 400);

		let uri = format!("/v1/generate?vocab_size=3&length={MAX_TEXT_LENGTH}");
		let body = test::call_and_read_body(&app, test::TestRequest::get().uri(&uri).to_request()).await;
		assert_eq!(std::str::from_utf8(&body).unwrap().split(' ').count(), MAX_TEXT_LENGTH);
	}

	#[actix_web::test]
	async fn sweep_rejects_oversized_plan() {
		let app = test::init_service(App::new().app_data(shared()).configure(configure)).await;
		for body in [
			serde_json::json!({ "axis": "text_length", "min_vocab_size": 5, "max_vocab_size": 5,
				"min_text_length": 0, "max_text_length": usize::MAX }),
			serde_json::json!({ "smoothing_runs": 1000 }),
		] {
			let req = test::TestRequest::post().uri("/v1/sweep").set_json(body).to_request();
			let resp = test::call_service(&app, req).await;
			assert_eq!(resp.status(), 400);
		}
	}

	#[actix_web::test]
	async fn sweep_endpoint_returns_points() {
		let app = test::init_service(App::new().app_data(shared()).configure(configure)).await;
		let req = test::TestRequest::post()
			.uri("/v1/sweep")
			.set_json(serde_json::json!({
				"axis": "vocabulary_size",
				"min_vocab_size": 2,
				"max_vocab_size": 4,
				"min_text_length": 12,
				"max_text_length": 12,
				"smoothing_runs": 2,
				"policy": "sequential",
				"seed": 5,
				"custom_text": "one two two three"
			}))
			.to_request();
		let body: SweepResponse = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body.seed, 5);
		assert_eq!(body.total_cycles, 6);
		assert_eq!(body.points.len(), 3);
		assert_eq!(body.points[2].score("types"), Some(4.0));
		let custom = body.custom.unwrap();
		assert_eq!(custom.x, 3);
		assert_eq!(custom.score("tokens"), Some(4.0));
	}

	#[actix_web::test]
	async fn sweep_rejects_inverted_bounds() {
		let app = test::init_service(App::new().app_data(shared()).configure(configure)).await;
		let req = test::TestRequest::post()
			.uri("/v1/sweep")
			.set_json(serde_json::json!({ "min_vocab_size": 9, "max_vocab_size": 3 }))
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), 400);
	}

	#[actix_web::test]
	async fn compare_counts_and_generates() {
		let app = test::init_service(App::new().app_data(shared()).configure(configure)).await;
		let req = test::TestRequest::post()
			.uri("/v1/compare")
			.set_json(serde_json::json!({
				"texts": { "text1": "the cat saw the dog", "text2": "   " },
				"generate": "random",
				"seed": 3
			}))
			.to_request();
		let body: CompareResponse = test::call_and_read_body_json(&app, req).await;
		assert_eq!(body.stats.len(), 1);
		assert_eq!(body.stats["text1"], TextStats { tokens: 5, types: 4 });
		let generated = body.generated.unwrap();
		assert_eq!(generated.policy, GenerationPolicy::UniformRandom);
		assert_eq!(generated.text.split(' ').count(), 5);
	}

	#[actix_web::test]
	async fn compare_without_reference_fails() {
		let app = test::init_service(App::new().app_data(shared()).configure(configure)).await;
		let req = test::TestRequest::post()
			.uri("/v1/compare")
			.set_json(serde_json::json!({ "texts": { "text2": "a b" }, "generate": "zipf" }))
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), 400);
	}
}
