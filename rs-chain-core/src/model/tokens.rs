use std::collections::VecDeque;
use std::io::BufRead;

/// Iterator over whitespace-delimited words of a buffered reader.
///
/// Reads one line at a time as raw bytes and splits it on Unicode
/// whitespace, so words never contain whitespace and are never empty.
///
/// # Notes
/// - Ends on end of stream; a final word without trailing whitespace is
///   complete.
/// - Also ends on the first read error or invalid UTF-8 byte. Every word
///   fully read before that point is still yielded; only a word cut off by
///   the error (no whitespace after it yet) is dropped.
pub(crate) struct Words<R> {
	reader: R,
	line: Vec<u8>,
	pending: VecDeque<String>,
	done: bool,
}

impl<R: BufRead> Words<R> {
	pub(crate) fn new(reader: R) -> Self {
		Self {
			reader,
			line: Vec::new(),
			pending: VecDeque::new(),
			done: false,
		}
	}

	/// Reads lines until at least one word is pending or the stream ends.
	fn fill(&mut self) {
		while self.pending.is_empty() && !self.done {
			self.line.clear();
			match self.reader.read_until(b'\n', &mut self.line) {
				Ok(0) => self.done = true,
				Ok(_) => match std::str::from_utf8(&self.line) {
					Ok(line) => self.pending.extend(line.split_whitespace().map(str::to_owned)),
					Err(e) => {
						tracing::debug!("stopping word stream on invalid utf-8: {e}");
						self.pending.extend(finished_words(&self.line[..e.valid_up_to()]));
						self.done = true;
					}
				},
				Err(e) => {
					// read_until leaves the bytes read before the error in `line`
					tracing::debug!("stopping word stream on read error: {e}");
					let valid = match std::str::from_utf8(&self.line) {
						Ok(s) => s.len(),
						Err(utf8) => utf8.valid_up_to(),
					};
					self.pending.extend(finished_words(&self.line[..valid]));
					self.done = true;
				}
			}
		}
	}
}

impl<R: BufRead> Iterator for Words<R> {
	type Item = String;

	fn next(&mut self) -> Option<String> {
		self.fill();
		self.pending.pop_front()
	}
}

/// Words of an interrupted line that were followed by whitespace.
///
/// `bytes` must be valid UTF-8; the text after the last whitespace is an
/// unfinished word and is left out.
fn finished_words(bytes: &[u8]) -> Vec<String> {
	let Ok(text) = std::str::from_utf8(bytes) else { return Vec::new() };
	let finished = match text.rfind(char::is_whitespace) {
		Some(end) => &text[..end],
		None => "",
	};
	finished.split_whitespace().map(str::to_owned).collect()
}
