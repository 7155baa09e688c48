use std::fmt;

use log::warn;
use serde::Serialize;

use crate::annotate::TaggedToken;
use crate::error::Result;
use crate::evaluation::Perplexity;
use crate::language::Language;
use crate::text::Token;

const RULE: &str = "==================================================";

/// Result of one isolated stage.
///
/// A failed stage keeps its error message so the report can show it while
/// the remaining stages still run.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StageOutcome<T> {
	Completed(T),
	Failed(String),
}

impl<T> StageOutcome<T> {
	/// Converts a stage result, logging failures under the stage name.
	pub fn from_result(stage: &str, result: Result<T>) -> Self {
		match result {
			Ok(value) => StageOutcome::Completed(value),
			Err(e) => {
				warn!("{} stage failed: {}", stage, e);
				StageOutcome::Failed(e.to_string())
			}
		}
	}

	pub fn completed(&self) -> Option<&T> {
		match self {
			StageOutcome::Completed(value) => Some(value),
			StageOutcome::Failed(_) => None,
		}
	}

	pub fn error(&self) -> Option<&str> {
		match self {
			StageOutcome::Completed(_) => None,
			StageOutcome::Failed(message) => Some(message.as_str()),
		}
	}
}

/// Token and sentence counts of the preprocessed corpus.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct CorpusStats {
	pub articles: usize,
	pub sentences: usize,
	pub tokens: usize,
	pub types: usize,
	pub training_sentences: usize,
	pub evaluation_sentences: usize,
}

/// Language-model stage output.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LanguageModelStats {
	pub order: usize,
	pub vocabulary_size: usize,
	pub perplexity: Perplexity,
	/// Sample generated from the model, if generation is enabled.
	pub generated: Option<Vec<Token>>,
}

/// POS tagging and chunking stage output, on one sample sentence.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AnnotationSample {
	pub tokens: Vec<Token>,
	pub tags: Vec<TaggedToken>,
	pub chunks: Vec<String>,
}

/// NER stage output over every article.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct EntityStats {
	pub total: usize,
	/// Most frequent entity types with their counts.
	pub top_types: Vec<(String, usize)>,
}

/// Everything one language run produced.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct LanguageReport {
	pub language: Language,
	pub n_gram_order: usize,
	pub corpus: CorpusStats,
	pub language_model: StageOutcome<LanguageModelStats>,
	pub annotation: StageOutcome<AnnotationSample>,
	pub entities: StageOutcome<EntityStats>,
}

/// Formats `1234567` as `1,234,567`.
fn thousands(n: usize) -> String {
	let digits = n.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, c) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(c);
	}
	out
}

fn quoted<S: AsRef<str>>(items: &[S]) -> String {
	let items: Vec<String> = items.iter().map(|s| format!("'{}'", s.as_ref())).collect();
	format!("[{}]", items.join(", "))
}

impl fmt::Display for LanguageReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = self.language.name().to_uppercase();
		writeln!(f, "{}\nRUNNING {} PIPELINE ({} ARTICLES)\n{}", RULE, name, self.corpus.articles, RULE)?;

		writeln!(f, "1. Preprocessing & Tokenization...")?;
		writeln!(f, "   Total tokens: {}", thousands(self.corpus.tokens))?;
		writeln!(f, "   Unique tokens: {}", thousands(self.corpus.types))?;
		writeln!(f, "   Training sentences: {}", self.corpus.training_sentences)?;
		writeln!(f, "   Evaluation sentences: {}", self.corpus.evaluation_sentences)?;

		writeln!(f, "\n2. Training N={} Model...", self.n_gram_order)?;
		match &self.language_model {
			StageOutcome::Completed(lm) => {
				writeln!(f, "   Vocabulary size: {}", thousands(lm.vocabulary_size))?;
				writeln!(f, "   Perplexity on Test Set: {}", lm.perplexity)?;
				if let Some(generated) = &lm.generated {
					writeln!(f, "   Generated: {}", generated.join(" "))?;
				}
			}
			StageOutcome::Failed(e) => writeln!(f, "   Error during LM/Perplexity calculation: {}", e)?,
		}

		writeln!(f, "\n3. POS Tagging and Chunking...")?;
		match &self.annotation {
			StageOutcome::Completed(sample) => {
				let tags: Vec<String> = sample.tags.iter().map(|t| format!("('{}', '{}')", t.token, t.tag)).collect();
				writeln!(f, "   Sample Tokens: {}...", quoted(&sample.tokens))?;
				writeln!(f, "   Sample POS Tags (First {}): [{}]...", sample.tags.len(), tags.join(", "))?;
				writeln!(f, "   Sample Chunks Extracted: {}...", quoted(&sample.chunks))?;
			}
			StageOutcome::Failed(e) => writeln!(f, "   Error during POS tagging/chunking: {}", e)?,
		}

		writeln!(f, "\n4. Named Entity Recognition (NER)...")?;
		match &self.entities {
			StageOutcome::Completed(stats) => {
				let top: Vec<String> = stats.top_types.iter().map(|(label, n)| format!("('{}', {})", label, n)).collect();
				writeln!(f, "   Total Entities Found: {}", thousands(stats.total))?;
				writeln!(f, "   Top {} Entity Types: [{}]", stats.top_types.len(), top.join(", "))?;
			}
			StageOutcome::Failed(e) => writeln!(f, "   Error during NER: {}", e)?,
		}

		write!(f, "\n{} PIPELINE FINISHED.\n{}", name, RULE)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::LisanError;

	#[test]
	fn thousands_separator() {
		assert_eq!(thousands(0), "0");
		assert_eq!(thousands(999), "999");
		assert_eq!(thousands(1000), "1,000");
		assert_eq!(thousands(1234567), "1,234,567");
	}

	#[test]
	fn outcome_from_result() {
		let ok: StageOutcome<u8> = StageOutcome::from_result("test", Ok(3));
		assert_eq!(ok.completed(), Some(&3));
		assert_eq!(ok.error(), None);

		let failed: StageOutcome<u8> = StageOutcome::from_result("test", Err(LisanError::EmptyTrainingSet));
		assert_eq!(failed.completed(), None);
		assert!(failed.error().unwrap().contains("empty"));
	}

	#[test]
	fn renders_failures_and_successes() {
		let report = LanguageReport {
			language: Language::Arabic,
			n_gram_order: 2,
			corpus: CorpusStats { articles: 3, tokens: 1500, types: 20, ..CorpusStats::default() },
			language_model: StageOutcome::Failed("training set is empty".to_owned()),
			annotation: StageOutcome::Completed(AnnotationSample {
				tokens: vec!["بيت".to_owned()],
				tags: vec![TaggedToken::new("بيت", "noun")],
				chunks: vec!["بيت".to_owned()],
			}),
			entities: StageOutcome::Completed(EntityStats { total: 2, top_types: vec![("LOC".to_owned(), 2)] }),
		};

		let text = report.to_string();
		assert!(text.contains("RUNNING ARABIC PIPELINE (3 ARTICLES)"));
		assert!(text.contains("Total tokens: 1,500"));
		assert!(text.contains("Error during LM/Perplexity calculation: training set is empty"));
		assert!(text.contains("('بيت', 'noun')"));
		assert!(text.contains("Top 1 Entity Types: [('LOC', 2)]"));
		assert!(text.contains("ARABIC PIPELINE FINISHED."));
	}

	#[test]
	fn serializes_to_json() {
		let outcome: StageOutcome<u8> = StageOutcome::Failed("boom".to_owned());
		assert_eq!(serde_json::to_string(&outcome).unwrap(), r#"{"failed":"boom"}"#);
	}
}
