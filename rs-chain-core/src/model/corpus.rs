use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use super::chain::Chain;
use crate::error::ChainError;
use crate::io::list_files;

/// Builds a chain from a list of corpus files.
///
/// # Parameters
/// - `prefix_len`: Number of words of context per key.
/// - `files`: Documents to ingest, in order.
///
/// # Behavior
/// - Splits the file list into chunks (based on CPU cores * factor).
/// - Spawns one thread per chunk, each building a partial chain with one
///   `build` call per file.
/// - Merges partial chains in chunk order, so the result is identical to
///   building every file sequentially into one chain.
///
/// # Notes
/// - Files that cannot be opened are logged and skipped: a missing
///   document contributes nothing, like an empty one.
///
/// # Errors
/// - `InvalidPrefixLen` if `prefix_len == 0`.
/// - `WorkerFailed` if a worker thread panicked.
pub fn build_chain<P: AsRef<Path>>(prefix_len: usize, files: &[P]) -> Result<Chain, ChainError> {
	let mut final_chain = Chain::new(prefix_len)?;
	if files.is_empty() {
		return Ok(final_chain);
	}

	let paths: Vec<PathBuf> = files.iter().map(|p| p.as_ref().to_path_buf()).collect();
	let cpus = num_cpus::get();
	let factor = 8;
	let chunks = cpus * factor;
	let chunk_size = paths.len().div_ceil(chunks);

	let (tx, rx) = mpsc::channel();
	let mut expected = 0usize;
	for (index, chunk) in paths.chunks(chunk_size).enumerate() {
		let tx = tx.clone();
		let chunk: Vec<PathBuf> = chunk.to_vec();
		expected += 1;

		thread::spawn(move || {
			// Cannot fail: prefix_len was validated above
			let Ok(mut partial) = Chain::new(prefix_len) else { return };
			for path in &chunk {
				ingest_file(&mut partial, path);
			}
			// The receiver outlives every worker
			let _ = tx.send((index, partial));
		});
	}
	drop(tx);

	let mut partials: Vec<(usize, Chain)> = rx.iter().collect();
	if partials.len() != expected {
		return Err(ChainError::WorkerFailed {
			missing: expected - partials.len(),
			expected,
		});
	}

	partials.sort_by_key(|(index, _)| *index);
	for (_, partial) in &partials {
		final_chain.merge(partial)?;
	}

	tracing::info!(
		files = paths.len(),
		keys = final_chain.len(),
		words = final_chain.word_count(),
		"corpus loaded"
	);
	Ok(final_chain)
}

/// Builds a chain from every file with extension `extension` in `dir`.
///
/// Files are ingested in sorted name order.
///
/// # Errors
/// - `NotADirectory` if `dir` is not a directory.
/// - `Io` if the directory cannot be listed.
pub fn build_chain_from_dir<P: AsRef<Path>>(
	prefix_len: usize,
	dir: P,
	extension: &str,
) -> Result<Chain, ChainError> {
	let dir = dir.as_ref();
	if !dir.is_dir() {
		return Err(ChainError::NotADirectory { path: dir.to_path_buf() });
	}

	let files: Vec<PathBuf> = list_files(dir, extension)?
		.into_iter()
		.map(|name| dir.join(name))
		.collect();
	tracing::debug!(dir = %dir.display(), count = files.len(), "corpus files listed");

	build_chain(prefix_len, &files)
}

fn ingest_file(chain: &mut Chain, path: &Path) {
	match File::open(path) {
		Ok(file) => chain.build(file),
		Err(e) => tracing::warn!(path = %path.display(), "skipping unreadable corpus file: {e}"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn no_files_gives_empty_chain() {
		let chain = build_chain::<PathBuf>(2, &[]).unwrap();
		assert!(chain.is_empty());
		assert_eq!(chain.prefix_len(), 2);
	}

	#[test]
	fn zero_prefix_len_is_rejected() {
		assert!(matches!(
			build_chain::<PathBuf>(0, &[]),
			Err(ChainError::InvalidPrefixLen { prefix_len: 0 })
		));
	}

	#[test]
	fn missing_file_is_skipped() {
		let dir = tempfile::tempdir().expect("create temp dir");
		let present = dir.path().join("present.txt");
		fs::write(&present, "a b").unwrap();
		let missing = dir.path().join("missing.txt");

		let chain = build_chain(1, &[missing, present]).unwrap();
		assert_eq!(chain.suffixes(""), ["a"]);
		assert_eq!(chain.suffixes("a"), ["b"]);
	}

	#[test]
	fn dir_that_is_a_file_is_rejected() {
		let dir = tempfile::tempdir().expect("create temp dir");
		let file = dir.path().join("scum.txt");
		fs::write(&file, "x").unwrap();
		assert!(matches!(
			build_chain_from_dir(1, &file, "txt"),
			Err(ChainError::NotADirectory { .. })
		));
	}
}
