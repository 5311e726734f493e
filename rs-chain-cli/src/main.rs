mod cli;
mod config;
mod logging;

use std::io::Write;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_chain_core::io::resolve_folder;
use rs_chain_core::model::corpus::{build_chain, build_chain_from_dir};
use rs_chain_core::model::{Chain, RngSource};
use rs_chain_core::text::trim_to_sentence;
use tracing::info;

use crate::cli::Cli;
use crate::config::{ChainConfig, Settings};

fn main() {
	let cli = Cli::parse();
	logging::init(cli.verbose);

	if let Err(e) = run(&cli) {
		eprintln!("Error: {e:#}");
		process::exit(1);
	}
}

fn run(cli: &Cli) -> Result<()> {
	let config = match &cli.config {
		Some(path) => ChainConfig::load(path)?,
		None => ChainConfig::default(),
	};
	let settings = Settings::resolve(cli, config)?;

	let chain = load_chain(&settings)?;
	info!(keys = chain.len(), words = chain.word_count(), "chain ready");

	let rng = match settings.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};
	let mut source = RngSource::new(rng);

	let stdout = std::io::stdout();
	let mut out = stdout.lock();
	for _ in 0..settings.count {
		let text = chain.generate(settings.words, &mut source);
		let text = if settings.raw { text } else { trim_to_sentence(&text) };
		writeln!(out, "{text}")?;
	}

	Ok(())
}

/// Builds the chain from the named files, or from the whole corpus folder.
fn load_chain(settings: &Settings) -> Result<Chain> {
	let corpus_dir = resolve_folder(&settings.corpus_dir);
	let chain = if settings.files.is_empty() {
		build_chain_from_dir(settings.prefix, &corpus_dir, &settings.ext)
			.with_context(|| format!("failed to load corpus {}", corpus_dir.display()))?
	} else {
		let files: Vec<PathBuf> = settings.files.iter().map(|f| corpus_dir.join(f)).collect();
		build_chain(settings.prefix, &files).context("failed to load corpus files")?
	};
	Ok(chain)
}
