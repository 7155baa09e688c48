use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use log::debug;

use super::{Entity, EntityInput, EntityRecognizer};
use crate::error::{LisanError, Result};
use crate::io;
use crate::language::Language;
use crate::text::{Token, normalize};

/// Named-entity recognizer backed by a pretrained gazetteer.
///
/// The gazetteer is a JSON object mapping an entity type to its surface
/// forms, e.g. `{"GPE": ["London", "New York"], "PERSON": ["Boris Johnson"]}`.
/// Surface forms are normalized like the corpus, then matched against the
/// token stream longest-first, without overlaps.
///
/// Raw text input is normalized and tokenized before matching; token input
/// is expected to be normalized already.
#[derive(Clone, Debug)]
pub struct GazetteerRecognizer {
	language: Language,
	/// Normalized surface form -> entity type
	entries: HashMap<Vec<Token>, String>,
	/// Longest surface form, in tokens
	max_len: usize,
}

impl GazetteerRecognizer {
	/// Loads a gazetteer file.
	///
	/// # Errors
	/// Returns `CollaboratorUnavailable` if the file is missing or malformed.
	pub fn load<P: AsRef<Path>>(path: P, language: Language) -> Result<Self> {
		let path = path.as_ref();
		let gazetteer: BTreeMap<String, Vec<String>> =
			io::read_json(path).map_err(|e| LisanError::unavailable("entity recognizer", e))?;
		let recognizer = Self::from_entries(language, gazetteer);
		debug!("loaded {} gazetteer entries from {}", recognizer.entries.len(), path.display());
		Ok(recognizer)
	}

	/// Builds a recognizer from entity types and their surface forms.
	///
	/// A surface form listed under several types keeps the last one.
	pub fn from_entries<I, L, F, S>(language: Language, gazetteer: I) -> Self
	where
		I: IntoIterator<Item = (L, F)>,
		L: Into<String>,
		F: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut entries = HashMap::new();
		let mut max_len = 0;
		for (label, forms) in gazetteer {
			let label = label.into();
			for form in forms {
				let tokens: Vec<Token> =
					normalize(Some(form.as_ref()), language).split_whitespace().map(str::to_owned).collect();
				if tokens.is_empty() {
					continue;
				}
				max_len = max_len.max(tokens.len());
				entries.insert(tokens, label.clone());
			}
		}
		Self { language, entries, max_len }
	}

	fn find(&self, tokens: &[Token]) -> Vec<Entity> {
		let mut entities = Vec::new();
		let mut i = 0;
		while i < tokens.len() {
			let longest = (1..=self.max_len.min(tokens.len() - i))
				.rev()
				.find_map(|len| self.entries.get(&tokens[i..i + len]).map(|label| (len, label)));
			match longest {
				Some((len, label)) => {
					entities.push(Entity { text: tokens[i..i + len].join(" "), label: label.clone() });
					i += len;
				}
				None => i += 1,
			}
		}
		entities
	}
}

impl EntityRecognizer for GazetteerRecognizer {
	fn recognize(&self, input: EntityInput<'_>) -> Result<Vec<Entity>> {
		match input {
			EntityInput::Tokens(tokens) => Ok(self.find(tokens)),
			EntityInput::Text { text, tokenizer } => {
				let tokens = tokenizer.tokenize(&normalize(Some(text), self.language), self.language)?;
				Ok(self.find(&tokens))
			}
		}
	}
}
