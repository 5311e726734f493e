use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::cli::Cli;

/// Top-level configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
	/// Generation settings.
	#[serde(default)]
	pub generate: GenerateToml,

	/// Corpus settings.
	#[serde(default)]
	pub corpus: CorpusToml,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateToml {
	pub words: Option<usize>,
	pub prefix: Option<usize>,
	pub seed: Option<u64>,
	pub count: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorpusToml {
	pub dir: Option<PathBuf>,
	pub ext: Option<String>,
	#[serde(default)]
	pub files: Vec<String>,
}

impl ChainConfig {
	/// Reads and parses a TOML configuration file.
	pub fn load(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path)
			.with_context(|| format!("failed to read config {}", path.display()))?;
		toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
	}
}

/// Fully resolved run settings.
///
/// Precedence: command line, then config file, then defaults.
#[derive(Debug, PartialEq)]
pub struct Settings {
	pub words: usize,
	pub prefix: usize,
	pub seed: Option<u64>,
	pub count: usize,
	pub corpus_dir: PathBuf,
	pub ext: String,
	pub files: Vec<String>,
	pub raw: bool,
}

pub const DEFAULT_WORDS: usize = 35;
pub const DEFAULT_PREFIX: usize = 2;
pub const DEFAULT_CORPUS_DIR: &str = "texts";
pub const DEFAULT_EXT: &str = "txt";

impl Settings {
	pub fn resolve(cli: &Cli, config: ChainConfig) -> Result<Self> {
		let ChainConfig { generate, corpus } = config;

		let prefix = cli.prefix.or(generate.prefix).unwrap_or(DEFAULT_PREFIX);
		if prefix == 0 {
			bail!("prefix length must be >= 1");
		}

		let files = if cli.files.is_empty() { corpus.files } else { cli.files.clone() };

		Ok(Self {
			words: cli.words.or(generate.words).unwrap_or(DEFAULT_WORDS),
			prefix,
			seed: cli.seed.or(generate.seed),
			count: cli.count.or(generate.count).unwrap_or(1),
			corpus_dir: cli
				.corpus
				.clone()
				.or(corpus.dir)
				.unwrap_or_else(|| PathBuf::from(DEFAULT_CORPUS_DIR)),
			ext: cli.ext.clone().or(corpus.ext).unwrap_or_else(|| DEFAULT_EXT.to_owned()),
			files,
			raw: cli.raw,
		})
	}
}
