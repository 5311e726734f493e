use std::path::PathBuf;

use clap::Parser;

/// Markov chain text generator.
///
/// Trains a word-level chain on a folder of documents and prints
/// generated text.
#[derive(Parser, Debug)]
#[command(name = "rs-chain", version, about = "Markov chain text generator")]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug, -vvv trace).
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Path to an optional TOML configuration file.
	#[arg(short, long)]
	pub config: Option<PathBuf>,

	/// Maximum number of words to generate.
	#[arg(short, long)]
	pub words: Option<usize>,

	/// Prefix length in words.
	#[arg(short, long)]
	pub prefix: Option<usize>,

	/// Folder containing the corpus documents.
	#[arg(long)]
	pub corpus: Option<PathBuf>,

	/// Extension of corpus documents when no file is named.
	#[arg(long)]
	pub ext: Option<String>,

	/// Corpus document to ingest, relative to the corpus folder (repeatable).
	#[arg(short, long = "file")]
	pub files: Vec<String>,

	/// RNG seed for reproducible output.
	#[arg(short, long)]
	pub seed: Option<u64>,

	/// Number of texts to generate.
	#[arg(short = 'n', long)]
	pub count: Option<usize>,

	/// Print generated text as is, without trimming to the last sentence.
	#[arg(long)]
	pub raw: bool,
}
