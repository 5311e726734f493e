use std::path::{Path, PathBuf};
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use rs_chain_core::io::{corpus_name, list_files};
use rs_chain_core::model::corpus::build_chain;
use rs_chain_core::model::{Chain, RngSource};
use rs_chain_core::text::trim_to_sentence;

const CORPUS_DIR: &str = "./texts";
const CORPUS_EXT: &str = "txt";
const DEFAULT_PREFIX: usize = 2;
const DEFAULT_WORDS: usize = 35;
const MAX_WORDS: usize = 10_000;

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	words: Option<usize>,
	seed: Option<u64>,
	raw: Option<bool>,
}

#[derive(Deserialize)]
struct CorpusQuery {
	names: Option<String>,
	prefix: Option<usize>,
}

/// Model shared by every worker.
///
/// Generation only takes the read lock; reloading swaps the chain under
/// the write lock once the new one is fully built.
struct SharedData {
	corpus_dir: PathBuf,
	chain: Chain,
	corpora: Vec<String>,
}

impl SharedData {
	fn new(corpus_dir: PathBuf, chain: Chain) -> Self {
		Self { corpus_dir, chain, corpora: Vec::new() }
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates text from the loaded chain. Trimmed to the last full sentence
/// unless `raw=true`. A `seed` makes the output reproducible.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let words = query.words.unwrap_or(DEFAULT_WORDS);
	if words > MAX_WORDS {
		return HttpResponse::BadRequest().body(format!("words must be <= {MAX_WORDS}"));
	}

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let text = match query.seed {
		Some(seed) => shared_data.chain.generate(words, &mut RngSource::new(StdRng::seed_from_u64(seed))),
		None => shared_data.chain.generate(words, &mut RngSource::new(rand::rng())),
	};

	if query.raw.unwrap_or(false) {
		HttpResponse::Ok().body(text)
	} else {
		HttpResponse::Ok().body(trim_to_sentence(&text))
	}
}

/// HTTP GET endpoint `/v1/corpora`: documents available in the corpus folder.
#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let corpus_dir = match data.read() {
		Ok(m) => m.corpus_dir.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let names: Vec<String> = match list_files(&corpus_dir, CORPUS_EXT) {
		Ok(files) => files.iter().filter_map(|f| corpus_name(Path::new(f)).ok()).collect(),
		Err(_) => return HttpResponse::InternalServerError().body("Failed to list corpora"),
	};
	HttpResponse::Ok().body(names.join("\n"))
}

#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.corpora.join("\n"))
}

/// HTTP PUT endpoint `/v1/load_corpora?names=a,b&prefix=N`
///
/// Builds a new chain from the named documents and replaces the current one.
/// Answers 404 without touching the loaded chain if any name has no
/// document in the corpus folder.
#[put("/v1/load_corpora")]
async fn put_corpora(data: web::Data<RwLock<SharedData>>, query: web::Query<CorpusQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let names: Vec<String> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.map(str::to_owned)
		.collect();

	if names.iter().any(|n| n.contains(['/', '\\']) || n.starts_with('.')) {
		return HttpResponse::BadRequest().body("Corpus names must be plain file names");
	}

	let prefix = query.prefix.unwrap_or(DEFAULT_PREFIX);
	let corpus_dir = match data.read() {
		Ok(m) => m.corpus_dir.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let files: Vec<PathBuf> = names.iter().map(|n| corpus_dir.join(format!("{n}.{CORPUS_EXT}"))).collect();
	let missing: Vec<&str> = names
		.iter()
		.zip(&files)
		.filter(|(_, file)| !file.is_file())
		.map(|(name, _)| name.as_str())
		.collect();
	if !missing.is_empty() {
		return HttpResponse::NotFound().body(format!("Unknown corpora: {}", missing.join(", ")));
	}

	let chain = match web::block(move || build_chain(prefix, &files)).await {
		Ok(Ok(chain)) => chain,
		Ok(Err(e)) => return HttpResponse::BadRequest().body(format!("Failed to build chain: {e}")),
		Err(_) => return HttpResponse::InternalServerError().body("Corpus worker failed"),
	};

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	tracing::info!(corpora = ?names, prefix, keys = chain.len(), "chain reloaded");
	shared_data.chain = chain;
	shared_data.corpora = names;

	HttpResponse::Ok().body("Corpora loaded successfully")
}

/// Main entry point for the server.
///
/// Wraps the chain in a `RwLock` so any number of generations can run
/// while no reload is in progress, and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Corpus documents are read from `./texts/*.txt`; the chain starts
///   empty until `/v1/load_corpora` is called.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new("rs_chain_server=info,rs_chain_core=info"));
	tracing_subscriber::fmt().with_env_filter(filter).init();

	let chain = Chain::new(DEFAULT_PREFIX).map_err(std::io::Error::other)?;
	let shared_data = web::Data::new(RwLock::new(SharedData::new(PathBuf::from(CORPUS_DIR), chain)));
	tracing::info!("listening on 127.0.0.1:5000");

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_corpora)
			.service(put_corpora)
			.service(get_loaded_corpora)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
