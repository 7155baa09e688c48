use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;
use crate::language::Language;

use super::Token;

/// Word tokenization backend.
///
/// Implementations must be deterministic for a given `(text, language)`
/// pair. They may fail (e.g. a backend that couldn't be loaded), in which
/// case the caller decides whether the stage is skipped.
pub trait Tokenizer {
	/// Splits one normalized sentence into tokens.
	fn tokenize(&self, text: &str, language: Language) -> Result<Vec<Token>>;
}

/// English clitics split off the end of a word, longest first.
const CLITICS: [&str; 7] = ["n't", "'re", "'ve", "'ll", "'s", "'d", "'m"];

/// Rule-based tokenizer for both supported languages.
///
/// Words are Unicode word segments (UAX #29): punctuation and symbols become
/// separate tokens, combining marks stay on the letter they sit on and
/// whitespace is dropped. English additionally splits trailing clitics
/// (`n't`, `'s`, `'re`, ...) into their own token.
///
/// On normalized input (no punctuation left) both reduce to a whitespace split.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleTokenizer;

impl RuleTokenizer {
	pub fn new() -> Self {
		Self
	}
}

impl Tokenizer for RuleTokenizer {
	fn tokenize(&self, text: &str, language: Language) -> Result<Vec<Token>> {
		let mut tokens = Vec::new();
		for segment in text.split_word_bounds().filter(|s| !s.trim().is_empty()) {
			match language {
				Language::English => split_clitic(segment, &mut tokens),
				Language::Arabic => tokens.push(segment.to_owned()),
			}
		}
		Ok(tokens)
	}
}

/// Tokenizes with [`RuleTokenizer`], taking the language by name.
///
/// # Errors
/// Returns `UnsupportedLanguage` if `language` is not english/arabic.
pub fn tokenize_named(text: &str, language: &str) -> Result<Vec<Token>> {
	RuleTokenizer.tokenize(text, language.parse()?)
}

/// Pushes `word`, splitting a trailing English clitic into its own token.
fn split_clitic(word: &str, tokens: &mut Vec<Token>) {
	let lower = word.to_lowercase();
	for clitic in CLITICS {
		// Only split when something remains in front of the clitic
		if lower.len() == word.len() && lower.ends_with(clitic) && word.len() > clitic.len() {
			let cut = word.len() - clitic.len();
			if word.is_char_boundary(cut) {
				tokens.push(word[..cut].to_owned());
				tokens.push(word[cut..].to_owned());
				return;
			}
		}
	}
	tokens.push(word.to_owned());
}
