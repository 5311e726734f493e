use std::num::NonZeroUsize;

/// Sliding window over the most recent words of a text.
///
/// A `Prefix` is the context a `Chain` is keyed on: the last `len` words
/// seen, oldest first. Both the builder and the generator own exactly one
/// `Prefix` per call and update it in place with [`Prefix::shift`].
///
/// # Invariants
/// - The number of words never changes after construction
/// - A fresh prefix holds `len` empty strings (the start-of-text state)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prefix {
	words: Vec<String>,
}

impl Prefix {
	/// Creates the start-of-text prefix: `len` empty words.
	pub fn new(len: NonZeroUsize) -> Self {
		Self { words: vec![String::new(); len.get()] }
	}

	/// Creates a prefix from explicit words.
	///
	/// Returns `None` if `words` is empty.
	pub fn from_words<I, S>(words: I) -> Option<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let words: Vec<String> = words.into_iter().map(Into::into).collect();
		if words.is_empty() {
			return None;
		}
		Some(Self { words })
	}

	/// Number of words in the window.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	/// Words of the window, oldest first.
	pub fn words(&self) -> &[String] {
		&self.words
	}

	/// Returns the table key for this prefix: words joined by a single space.
	///
	/// Two prefixes with the same words always produce the same key.
	pub fn key(&self) -> String {
		self.words.join(" ")
	}

	/// Drops the oldest word and appends `word` at the end.
	///
	/// The vector is rotated in place, so the window keeps its allocation
	/// across iterations.
	pub fn shift(&mut self, word: &str) {
		self.words.rotate_left(1);
		// Never empty: constructors reject zero-length windows
		if let Some(last) = self.words.last_mut() {
			last.clear();
			last.push_str(word);
		}
	}
}
