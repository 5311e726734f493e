//! Error types for the rs-chain-core crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the rs-chain-core crate.
///
/// Building and generating never fail; errors only come from invalid
/// configuration and from the corpus loading helpers.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
	/// Returned when a chain is created with a zero-word prefix.
	#[error("prefix length must be >= 1, got {prefix_len}")]
	InvalidPrefixLen {
		/// The invalid prefix length.
		prefix_len: usize,
	},

	/// Returned when merging chains built with different prefix lengths.
	#[error("prefix length mismatch: {left} vs {right}")]
	PrefixLenMismatch {
		/// Prefix length of the receiving chain.
		left: usize,
		/// Prefix length of the merged chain.
		right: usize,
	},

	/// Returned when a corpus folder does not exist or is a file.
	#[error("expected a directory, got: {}", .path.display())]
	NotADirectory {
		/// The offending path.
		path: PathBuf,
	},

	/// Listing a corpus folder failed.
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),

	/// A corpus worker thread died before reporting its partial chain.
	#[error("{missing} of {expected} corpus workers did not report")]
	WorkerFailed {
		/// Number of partial chains never received.
		missing: usize,
		/// Number of partial chains expected.
		expected: usize,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn error_invalid_prefix_len() {
		let e = ChainError::InvalidPrefixLen { prefix_len: 0 };
		assert_eq!(e.to_string(), "prefix length must be >= 1, got 0");
	}

	#[test]
	fn error_prefix_len_mismatch() {
		let e = ChainError::PrefixLenMismatch { left: 2, right: 3 };
		assert_eq!(e.to_string(), "prefix length mismatch: 2 vs 3");
	}

	#[test]
	fn error_not_a_directory() {
		let e = ChainError::NotADirectory { path: PathBuf::from("texts/scum.txt") };
		assert_eq!(e.to_string(), "expected a directory, got: texts/scum.txt");
	}

	#[test]
	fn error_io_wraps_source() {
		let e = ChainError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
		assert_eq!(e.to_string(), "i/o error: gone");
	}

	#[test]
	fn error_worker_failed() {
		let e = ChainError::WorkerFailed { missing: 1, expected: 4 };
		assert_eq!(e.to_string(), "1 of 4 corpus workers did not report");
	}

	#[test]
	fn error_is_std_error() {
		fn assert_impl<T: std::error::Error>() {}
		assert_impl::<ChainError>();
	}

	#[test]
	fn error_is_send_and_sync() {
		fn assert_impl<T: Send + Sync>() {}
		assert_impl::<ChainError>();
	}
}
