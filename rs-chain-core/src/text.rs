//! Post-processing of generated text.

/// Cuts generated text back to its last complete sentence.
///
/// Generation stops after a fixed number of words, usually in the middle of
/// a sentence. Everything after the last `.` is dropped and the result
/// always ends with a single `.`.
///
/// - `"a b. c d. e f"` → `"a b. c d."`
/// - `"no period here"` → `"no period here."` (nothing to cut back to)
/// - `""` → `""`
pub fn trim_to_sentence(text: &str) -> String {
	let text = text.trim();
	if text.is_empty() {
		return String::new();
	}

	let kept = match text.rfind('.') {
		Some(last) => &text[..last],
		None => text,
	};
	let kept = kept.trim_end_matches('.').trim_end();

	format!("{kept}.")
}
