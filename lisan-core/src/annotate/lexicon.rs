use std::collections::HashMap;
use std::path::Path;

use log::debug;

use super::{PosTagger, TaggedToken};
use crate::error::{LisanError, Result};
use crate::io;
use crate::language::Language;
use crate::text::Token;

/// POS tagger backed by a pretrained word -> tag lexicon.
///
/// The lexicon is a JSON object (`{"the": "DT", "cat": "NN", ...}`). Lookup
/// tries the token as-is, then lowercased. Unknown tokens get the language's
/// default tag: `NN` (Penn Treebank) for English, `noun` (CAMeL-style) for
/// Arabic.
#[derive(Clone, Debug)]
pub struct LexiconTagger {
	language: Language,
	lexicon: HashMap<String, String>,
}

impl LexiconTagger {
	/// Loads a lexicon file.
	///
	/// # Errors
	/// Returns `CollaboratorUnavailable` if the file is missing or malformed.
	pub fn load<P: AsRef<Path>>(path: P, language: Language) -> Result<Self> {
		let path = path.as_ref();
		let lexicon: HashMap<String, String> =
			io::read_json(path).map_err(|e| LisanError::unavailable("POS tagger", e))?;
		debug!("loaded {} lexicon entries from {}", lexicon.len(), path.display());
		Ok(Self { language, lexicon })
	}

	/// Builds a tagger from in-memory entries.
	pub fn from_entries<I, K, V>(language: Language, entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let lexicon = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
		Self { language, lexicon }
	}

	/// Tag assigned to tokens missing from the lexicon.
	pub fn default_tag(&self) -> &'static str {
		match self.language {
			Language::English => "NN",
			Language::Arabic => "noun",
		}
	}

	fn lookup(&self, token: &str) -> &str {
		self.lexicon
			.get(token)
			.or_else(|| self.lexicon.get(&token.to_lowercase()))
			.map_or(self.default_tag(), String::as_str)
	}
}

impl PosTagger for LexiconTagger {
	fn tag(&self, tokens: &[Token]) -> Result<Vec<TaggedToken>> {
		Ok(tokens.iter().map(|token| TaggedToken::new(token.as_str(), self.lookup(token))).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn tokens(words: &[&str]) -> Vec<Token> {
		words.iter().map(|w| w.to_string()).collect()
	}

	#[test]
	fn tags_known_and_unknown_tokens() {
		let tagger = LexiconTagger::from_entries(Language::English, [("the", "DT"), ("cat", "NN"), ("sat", "VBD")]);
		let tagged = tagger.tag(&tokens(&["The", "cat", "sat", "quietly"])).unwrap();
		assert_eq!(
			tagged,
			vec![
				TaggedToken::new("The", "DT"),
				TaggedToken::new("cat", "NN"),
				TaggedToken::new("sat", "VBD"),
				TaggedToken::new("quietly", "NN"),
			]
		);
	}

	#[test]
	fn arabic_default_tag() {
		let tagger = LexiconTagger::from_entries(Language::Arabic, [("كبير", "adj")]);
		let tagged = tagger.tag(&tokens(&["بيت", "كبير"])).unwrap();
		assert_eq!(tagged[0].tag, "noun");
		assert_eq!(tagged[1].tag, "adj");
	}

	#[test]
	fn loads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, r#"{{"dog": "NN", "ran": "VBD"}}"#).unwrap();
		let tagger = LexiconTagger::load(file.path(), Language::English).unwrap();
		assert_eq!(tagger.tag(&tokens(&["ran"])).unwrap()[0].tag, "VBD");
	}

	#[test]
	fn missing_file_is_unavailable() {
		let dir = tempfile::tempdir().unwrap();
		let err = LexiconTagger::load(dir.path().join("none.json"), Language::English).unwrap_err();
		assert!(matches!(err, LisanError::CollaboratorUnavailable { .. }));
	}
}
