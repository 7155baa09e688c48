use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LisanError, Result};
use crate::io;
use crate::language::Language;

/// Default n-gram order (bigrams).
pub const DEFAULT_N_GRAM_ORDER: usize = 2;

/// Default share of sentences used for training.
pub const DEFAULT_TRAIN_SPLIT_RATIO: f64 = 0.8;

/// Configuration of a pipeline run.
///
/// Every field has a default, so a JSON config file only needs to list
/// the values it overrides.
///
/// # Invariants (checked by [`PipelineConfig::validate`])
/// - `n_gram_order >= 1`
/// - `train_split_ratio` is in `(0, 1]`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
	/// Order N of the language model.
	pub n_gram_order: usize,

	/// Fraction of sentences (prefix) used for training.
	pub train_split_ratio: f64,

	/// JSON array of English articles.
	pub english_path: PathBuf,

	/// JSON array of Arabic articles.
	pub arabic_path: PathBuf,

	/// Optional word -> tag lexicons for the POS stage.
	pub english_lexicon: Option<PathBuf>,
	pub arabic_lexicon: Option<PathBuf>,

	/// Optional entity-type -> surface-forms gazetteers for the NER stage.
	pub english_gazetteer: Option<PathBuf>,
	pub arabic_gazetteer: Option<PathBuf>,

	/// How many tokens / tags / chunks / entity types the report shows.
	pub sample_tokens: usize,
	pub sample_tags: usize,
	pub sample_chunks: usize,
	pub top_entities: usize,

	/// Number of words to generate from the model (0 disables generation).
	pub generate_words: usize,

	/// Seed of the generation RNG.
	pub seed: u64,
}

impl Default for PipelineConfig {
	fn default() -> Self {
		Self {
			n_gram_order: DEFAULT_N_GRAM_ORDER,
			train_split_ratio: DEFAULT_TRAIN_SPLIT_RATIO,
			english_path: PathBuf::from("data/bbc-english-news.json"),
			arabic_path: PathBuf::from("data/arabic-news.json"),
			english_lexicon: None,
			arabic_lexicon: None,
			english_gazetteer: None,
			arabic_gazetteer: None,
			sample_tokens: 10,
			sample_tags: 5,
			sample_chunks: 3,
			top_entities: 5,
			generate_words: 0,
			seed: 42,
		}
	}
}

impl PipelineConfig {
	/// Loads a configuration from a JSON file and validates it.
	///
	/// # Errors
	/// Returns an error if the file can't be read, parsed or is invalid.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let config: Self = io::read_json(path)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks the numeric invariants.
	///
	/// # Errors
	/// Returns `InvalidConfig` if the order is 0 or the ratio is outside `(0, 1]`.
	pub fn validate(&self) -> Result<()> {
		if self.n_gram_order == 0 {
			return Err(LisanError::InvalidConfig("n_gram_order must be >= 1".to_owned()));
		}
		validate_ratio(self.train_split_ratio)
	}

	/// Article file for a language.
	pub fn articles_path(&self, language: Language) -> &Path {
		match language {
			Language::English => &self.english_path,
			Language::Arabic => &self.arabic_path,
		}
	}

	/// Lexicon file for a language, if configured.
	pub fn lexicon_path(&self, language: Language) -> Option<&Path> {
		match language {
			Language::English => self.english_lexicon.as_deref(),
			Language::Arabic => self.arabic_lexicon.as_deref(),
		}
	}

	/// Gazetteer file for a language, if configured.
	pub fn gazetteer_path(&self, language: Language) -> Option<&Path> {
		match language {
			Language::English => self.english_gazetteer.as_deref(),
			Language::Arabic => self.arabic_gazetteer.as_deref(),
		}
	}
}

/// Checks that a split ratio lies in `(0, 1]`.
pub(crate) fn validate_ratio(ratio: f64) -> Result<()> {
	if !(ratio > 0.0 && ratio <= 1.0) {
		return Err(LisanError::InvalidConfig(format!(
			"train_split_ratio must be in (0, 1], got {}",
			ratio
		)));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn defaults_are_valid() {
		let config = PipelineConfig::default();
		assert_eq!(config.n_gram_order, 2);
		assert_eq!(config.train_split_ratio, 0.8);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn rejects_bad_values() {
		let mut config = PipelineConfig::default();
		config.n_gram_order = 0;
		assert!(matches!(config.validate(), Err(LisanError::InvalidConfig(_))));

		for ratio in [0.0, -0.5, 1.5, f64::NAN] {
			let config = PipelineConfig { train_split_ratio: ratio, ..PipelineConfig::default() };
			assert!(config.validate().is_err(), "ratio {} accepted", ratio);
		}
	}

	#[test]
	fn partial_file_keeps_defaults() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, r#"{{ "n_gram_order": 3, "arabic_lexicon": "lex/ar.json" }}"#).unwrap();

		let config = PipelineConfig::from_file(file.path()).unwrap();
		assert_eq!(config.n_gram_order, 3);
		assert_eq!(config.train_split_ratio, DEFAULT_TRAIN_SPLIT_RATIO);
		assert_eq!(config.lexicon_path(Language::Arabic), Some(Path::new("lex/ar.json")));
		assert_eq!(config.lexicon_path(Language::English), None);
	}

	#[test]
	fn invalid_file_is_rejected() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, r#"{{ "train_split_ratio": 2.0 }}"#).unwrap();
		assert!(PipelineConfig::from_file(file.path()).is_err());
	}
}
