use std::collections::HashMap;
use std::io::{BufReader, Read};
use std::num::NonZeroUsize;

use crate::error::ChainError;
use super::prefix::Prefix;
use super::source::IndexSource;
use super::tokens::Words;

/// Word-level Markov chain.
///
/// Maps the key of every `prefix_len`-word context seen in training text
/// to the list of words that followed it. A word observed `k` times after
/// a context appears `k` times in that list, so picking a uniform index
/// into the list is a frequency-weighted draw.
///
/// # Responsibilities
/// - Ingest text streams word by word (`build`)
/// - Walk the table with an injected index source (`generate`)
/// - Merge with another chain of the same prefix length (`merge`)
///
/// # Invariants
/// - `prefix_len >= 1` and never changes
/// - Suffix lists only grow; no entry is ever removed or reordered
/// - Every stored suffix list is non-empty
#[derive(Clone, Debug)]
pub struct Chain {
	/// Number of words of context per key.
	prefix_len: NonZeroUsize,

	/// Prefix key -> suffixes in observation order.
	/// Example: { "the": ["cat", "mat"], "cat": ["sat"] }
	table: HashMap<String, Vec<String>>,
}

impl Chain {
	/// Creates an empty chain keyed on `prefix_len` words.
	///
	/// # Errors
	/// Returns `InvalidPrefixLen` if `prefix_len == 0`.
	pub fn new(prefix_len: usize) -> Result<Self, ChainError> {
		let prefix_len =
			NonZeroUsize::new(prefix_len).ok_or(ChainError::InvalidPrefixLen { prefix_len })?;
		Ok(Self { prefix_len, table: HashMap::new() })
	}

	pub fn prefix_len(&self) -> usize {
		self.prefix_len.get()
	}

	/// Number of distinct prefix keys.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Total number of recorded transitions (sum of all suffix list lengths).
	pub fn word_count(&self) -> usize {
		self.table.values().map(Vec::len).sum()
	}

	/// Suffixes recorded after `key`, in observation order.
	///
	/// Returns an empty slice for unknown keys.
	pub fn suffixes(&self, key: &str) -> &[String] {
		self.table.get(key).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Iterates over `(key, suffixes)` pairs in arbitrary order.
	pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.table.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
	}

	/// Reads whitespace-separated words from `reader` into the table.
	///
	/// Every call starts from the empty prefix, so the first words of each
	/// document are learned as text openers. Documents are added to one
	/// another, never chained end to end.
	///
	/// # Notes
	/// - Stops at end of stream.
	/// - A read error is treated as end of stream: the words read so far
	///   are kept and nothing is reported to the caller.
	pub fn build<R: Read>(&mut self, reader: R) {
		let mut prefix = Prefix::new(self.prefix_len);
		let mut ingested = 0usize;

		for word in Words::new(BufReader::new(reader)) {
			let key = prefix.key();
			prefix.shift(&word);
			self.table.entry(key).or_default().push(word);
			ingested += 1;
		}

		tracing::debug!(words = ingested, keys = self.table.len(), "document ingested");
	}

	/// Same as [`Chain::build`] for an in-memory document.
	pub fn build_str(&mut self, text: &str) {
		self.build(text.as_bytes());
	}

	/// Generates at most `max_words` words by walking the table.
	///
	/// Starts from the empty prefix and, at each step, draws one suffix of
	/// the current key using `source`. Stops early when the current key has
	/// no recorded suffix.
	///
	/// Returns the chosen words joined with single spaces; may be empty.
	pub fn generate<S: IndexSource + ?Sized>(&self, max_words: usize, source: &mut S) -> String {
		let mut prefix = Prefix::new(self.prefix_len);
		let mut words: Vec<&str> = Vec::with_capacity(max_words.min(1024));

		for _ in 0..max_words {
			let choices = self.suffixes(&prefix.key());
			if choices.is_empty() {
				break;
			}
			let next = choices[source.next_index(choices.len())].as_str();
			words.push(next);
			prefix.shift(next);
		}

		words.join(" ")
	}

	/// Merges another chain into this one.
	///
	/// # Notes
	/// - Suffixes of `other` are appended after the ones already stored,
	///   so merging partial chains in document order gives the same table
	///   as building those documents one after the other.
	///
	/// # Errors
	/// Returns `PrefixLenMismatch` if the prefix lengths differ.
	pub fn merge(&mut self, other: &Self) -> Result<(), ChainError> {
		if self.prefix_len != other.prefix_len {
			return Err(ChainError::PrefixLenMismatch {
				left: self.prefix_len(),
				right: other.prefix_len(),
			});
		}

		for (key, suffixes) in &other.table {
			self.table.entry(key.clone()).or_default().extend(suffixes.iter().cloned());
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Replays a fixed list of indices, cycling when exhausted.
	struct Scripted {
		picks: Vec<usize>,
		pos: usize,
	}

	impl Scripted {
		fn new(picks: &[usize]) -> Self {
			Self { picks: picks.to_vec(), pos: 0 }
		}
	}

	impl IndexSource for Scripted {
		fn next_index(&mut self, bound: usize) -> usize {
			let pick = self.picks[self.pos % self.picks.len()];
			self.pos += 1;
			pick % bound
		}
	}

	fn chain(prefix_len: usize, text: &str) -> Chain {
		let mut chain = Chain::new(prefix_len).unwrap();
		chain.build_str(text);
		chain
	}

	#[test]
	fn zero_prefix_len_is_rejected() {
		assert!(matches!(Chain::new(0), Err(ChainError::InvalidPrefixLen { prefix_len: 0 })));
	}

	#[test]
	fn new_chain_is_empty() {
		let chain = Chain::new(2).unwrap();
		assert!(chain.is_empty());
		assert_eq!(chain.len(), 0);
		assert_eq!(chain.word_count(), 0);
		assert_eq!(chain.prefix_len(), 2);
	}

	#[test]
	fn build_the_cat_sat_on_the_mat() {
		let chain = chain(1, "the cat sat on the mat");
		assert_eq!(chain.suffixes(""), ["the"]);
		assert_eq!(chain.suffixes("the"), ["cat", "mat"]);
		assert_eq!(chain.suffixes("cat"), ["sat"]);
		assert_eq!(chain.suffixes("sat"), ["on"]);
		assert_eq!(chain.suffixes("on"), ["the"]);
		assert!(chain.suffixes("mat").is_empty());
		assert_eq!(chain.len(), 5);
		assert_eq!(chain.word_count(), 6);
	}

	#[test]
	fn build_with_two_word_prefix_uses_padded_start_keys() {
		let chain = chain(2, "a b c");
		assert_eq!(chain.suffixes(" "), ["a"]);
		assert_eq!(chain.suffixes(" a"), ["b"]);
		assert_eq!(chain.suffixes("a b"), ["c"]);
		assert_eq!(chain.len(), 3);
	}

	/// Hands out its bytes, then fails.
	struct Truncated(&'static [u8]);

	impl Read for Truncated {
		fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
			if self.0.is_empty() {
				return Err(std::io::Error::other("connection reset"));
			}
			let n = buf.len().min(self.0.len());
			buf[..n].copy_from_slice(&self.0[..n]);
			self.0 = &self.0[n..];
			Ok(n)
		}
	}

	#[test]
	fn build_keeps_words_read_before_error() {
		let mut chain = Chain::new(1).unwrap();
		chain.build(Truncated(b"a b c "));
		assert_eq!(chain.suffixes(""), ["a"]);
		assert_eq!(chain.suffixes("b"), ["c"]);
		assert_eq!(chain.word_count(), 3);

		let mut cut = Chain::new(1).unwrap();
		cut.build(Truncated(b"a b ca"));
		assert_eq!(cut.suffixes("a"), ["b"]);
		assert!(cut.suffixes("b").is_empty());
	}

	#[test]
	fn build_ignores_whitespace_layout() {
		let compact = chain(1, "x y z");
		let spread = chain(1, "\n  x\t\ty \r\n z  \n");
		for key in ["", "x", "y"] {
			assert_eq!(compact.suffixes(key), spread.suffixes(key));
		}
	}

	#[test]
	fn generate_stops_when_no_suffix() {
		let chain = chain(1, "a b");
		let mut source = Scripted::new(&[0]);
		assert_eq!(chain.generate(10, &mut source), "a b");
	}

	#[test]
	fn generate_respects_max_words() {
		let chain = chain(1, "a a a a a a");
		let mut source = Scripted::new(&[0]);
		assert_eq!(chain.generate(3, &mut source), "a a a");
	}

	#[test]
	fn generate_zero_words_is_empty() {
		let chain = chain(1, "a b c");
		assert_eq!(chain.generate(0, &mut Scripted::new(&[0])), "");
	}

	#[test]
	fn generate_on_empty_chain_is_empty() {
		let chain = Chain::new(3).unwrap();
		for n in [0, 1, 10, 1000] {
			assert_eq!(chain.generate(n, &mut Scripted::new(&[0])), "");
		}
	}

	#[test]
	fn generate_follows_scripted_picks() {
		// "the" -> ["cat", "mat"]
		let chain = chain(1, "the cat sat on the mat");
		assert_eq!(chain.generate(10, &mut Scripted::new(&[0, 1])), "the mat");
		assert_eq!(
			chain.generate(10, &mut Scripted::new(&[0, 0, 0, 0, 0, 1])),
			"the cat sat on the mat"
		);
	}

	#[test]
	fn generate_is_deterministic_for_same_script() {
		let chain = chain(1, "a b a c a d b c d a");
		let picks = [3, 1, 4, 1, 5, 9, 2, 6];
		let first = chain.generate(20, &mut Scripted::new(&picks));
		let second = chain.generate(20, &mut Scripted::new(&picks));
		assert_eq!(first, second);
	}

	#[test]
	fn generate_with_two_word_prefix_reproduces_single_path() {
		let text = "one two three four five";
		let chain = chain(2, text);
		assert_eq!(chain.generate(100, &mut Scripted::new(&[0])), text);
	}

	#[test]
	fn generate_accepts_dyn_source() {
		let chain = chain(1, "p q");
		let mut scripted = Scripted::new(&[0]);
		let source: &mut dyn IndexSource = &mut scripted;
		assert_eq!(chain.generate(5, source), "p q");
	}

	#[test]
	fn build_twice_adds_documents_without_chaining() {
		let mut chain = Chain::new(1).unwrap();
		chain.build_str("a b");
		chain.build_str("c d");
		assert_eq!(chain.suffixes(""), ["a", "c"]);
		assert!(chain.suffixes("b").is_empty());
		assert_eq!(chain.suffixes("a"), ["b"]);
		assert_eq!(chain.suffixes("c"), ["d"]);
	}

	#[test]
	fn merge_appends_in_order() {
		let mut left = chain(1, "a b");
		let right = chain(1, "a c");
		left.merge(&right).unwrap();
		assert_eq!(left.suffixes(""), ["a", "a"]);
		assert_eq!(left.suffixes("a"), ["b", "c"]);
	}

	#[test]
	fn merge_rejects_prefix_len_mismatch() {
		let mut left = Chain::new(1).unwrap();
		let right = Chain::new(2).unwrap();
		assert!(matches!(
			left.merge(&right),
			Err(ChainError::PrefixLenMismatch { left: 1, right: 2 })
		));
	}

	#[test]
	fn entries_cover_whole_table() {
		let chain = chain(1, "x y x z");
		let mut keys: Vec<&str> = chain.entries().map(|(k, _)| k).collect();
		keys.sort_unstable();
		assert_eq!(keys, ["", "x", "y"]);
		assert_eq!(chain.suffixes("x"), ["y", "z"]);
	}
}
