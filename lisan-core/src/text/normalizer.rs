use std::sync::LazyLock;

use regex::Regex;

use crate::language::Language;

// Static patterns, compiled once. Should not panic.
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").unwrap());
// Letters, numbers and `_` only: combining marks (harakat) are removed too
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_\s]").unwrap());
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Arabic tatweel (kashida), a purely typographic elongation.
pub const TATWEEL: char = '\u{0640}';

/// Cleans a raw sentence for modeling.
///
/// Steps, in order:
/// - Remove URLs (`http(s)://...`, `www....`)
/// - English: lowercase
/// - Remove every character that is not a letter, a number, `_` or
///   whitespace (punctuation, symbols, diacritics)
/// - Remove digit runs
/// - Arabic: unify hamza-bearing alefs (`إ أ آ` -> `ا`), map taa marbuta to
///   haa (`ة` -> `ه`) and strip tatweel
/// - Collapse whitespace runs to a single space and trim
///
/// `None` or empty input yields an empty string. The function never fails and
/// is idempotent: normalizing an already normalized string is a no-op.
pub fn normalize(raw: Option<&str>, language: Language) -> String {
	let text = match raw {
		Some(text) if !text.is_empty() => text,
		_ => return String::new(),
	};

	let text = URL.replace_all(text, "");
	// Lowercasing may introduce combining marks (`İ` -> `i̇`), strip them afterwards
	let text = match language {
		Language::English => text.to_lowercase(),
		Language::Arabic => text.into_owned(),
	};
	let text = NON_WORD.replace_all(&text, "");
	let text = DIGITS.replace_all(&text, "");
	// Letter mapping before the whitespace collapse: a word made only of tatweel
	// must not leave a double space
	let text = match language {
		Language::English => text.into_owned(),
		Language::Arabic => normalize_arabic_letters(&text),
	};
	SPACES.replace_all(&text, " ").trim().to_owned()
}

/// Letter-level Arabic normalization.
fn normalize_arabic_letters(text: &str) -> String {
	text.chars()
		.filter(|&c| c != TATWEEL)
		.map(|c| match c {
			'\u{0625}' | '\u{0623}' | '\u{0622}' => '\u{0627}', // إ أ آ -> ا
			'\u{0629}' => '\u{0647}',                           // ة -> ه
			other => other,
		})
		.collect()
}
