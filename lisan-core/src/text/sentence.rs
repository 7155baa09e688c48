use unicode_segmentation::UnicodeSegmentation;

use crate::language::Language;

/// Sentence segmentation backend.
///
/// Runs on raw article text, before normalization strips the punctuation
/// it relies on.
pub trait SentenceSplitter {
	/// Splits an article into sentences, in order.
	fn split(&self, text: &str, language: Language) -> Vec<String>;
}

/// English abbreviations that don't end a sentence.
const ABBREVIATIONS: [&str; 16] = [
	"mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "vs", "etc", "inc", "ltd", "co", "e.g", "i.e", "u.s",
];

/// Splits on Unicode sentence boundaries (UAX #29).
///
/// Sentences end at `.` `!` `?` (and the Arabic `؟`) followed by whitespace,
/// and at line breaks. Runs of terminators and closing quotes stay with their
/// sentence, and periods inside numbers or domains (`3.14`, `bbc.co.uk`) do
/// not split. In English, a period after a known abbreviation or a single
/// capital letter (an initial) does not split either.
#[derive(Clone, Copy, Debug, Default)]
pub struct PunctuationSplitter;

impl PunctuationSplitter {
	pub fn new() -> Self {
		Self
	}

	/// True if the period closing `current` belongs to an abbreviation.
	fn ends_with_abbreviation(current: &str) -> bool {
		let word = current
			.trim_end_matches('.')
			.rsplit(char::is_whitespace)
			.next()
			.unwrap_or("")
			.trim_start_matches(|c: char| !c.is_alphanumeric());
		let mut chars = word.chars();
		if let (Some(c), None) = (chars.next(), chars.next()) {
			return c.is_uppercase();
		}
		ABBREVIATIONS.contains(&word.to_lowercase().as_str())
	}
}

impl SentenceSplitter for PunctuationSplitter {
	fn split(&self, text: &str, language: Language) -> Vec<String> {
		let mut sentences = Vec::new();
		let mut current = String::new();

		for segment in text.split_sentence_bounds() {
			current.push_str(segment);
			let end = current.trim_end();
			let abbreviation = match language {
				Language::English => {
					end.ends_with('.')
						&& !segment.contains(['\n', '\r'])
						&& Self::ends_with_abbreviation(end)
				}
				Language::Arabic => false,
			};
			// "Mr. " is a boundary for UAX #29, glue it to what follows
			if !abbreviation {
				push_sentence(&mut sentences, &mut current);
			}
		}
		push_sentence(&mut sentences, &mut current);
		sentences
	}
}

fn push_sentence(sentences: &mut Vec<String>, current: &mut String) {
	let sentence = current.trim();
	if !sentence.is_empty() {
		sentences.push(sentence.to_owned());
	}
	current.clear();
}
