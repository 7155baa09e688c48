//! Batch analysis of one language corpus.
//!
//! Steps, in order:
//! 1. Sentence splitting, normalization and tokenization
//! 2. Positional train/evaluation split and corpus statistics
//! 3. Language-model stage (fit + perplexity)
//! 4. POS tagging and chunking stage (one sample sentence)
//! 5. NER stage (every article)
//!
//! Stages 3 to 5 are isolated: a failure is logged, recorded in the report
//! and does not prevent the other stages from running.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::annotate::chunk::NP_LABEL;
use crate::annotate::{
	Chunker, EntityInput, EntityRecognizer, GazetteerRecognizer, LexiconTagger, NounPhraseChunker, PosTagger,
};
use crate::config::PipelineConfig;
use crate::corpus;
use crate::error::{LisanError, Result};
use crate::evaluation::perplexity;
use crate::io;
use crate::language::Language;
use crate::model::{NGramModel, Vocabulary};
use crate::text::{PunctuationSplitter, RuleTokenizer, Sentence, SentenceSplitter, Tokenizer, normalize};

/// Report types.
pub mod report;

pub use report::{AnnotationSample, CorpusStats, EntityStats, LanguageModelStats, LanguageReport, StageOutcome};

/// One news article. Only `text` is read; other fields are ignored.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Article {
	#[serde(default)]
	pub text: Option<String>,
}

impl Article {
	pub fn new(text: impl Into<String>) -> Self {
		Self { text: Some(text.into()) }
	}
}

/// Loads a JSON array of articles.
///
/// A missing file is not an error: it is logged and yields no articles, so
/// that language is skipped.
///
/// # Errors
/// Returns an error if the file exists but can't be read or parsed.
pub fn load_articles<P: AsRef<Path>>(path: P) -> Result<Vec<Article>> {
	match io::read_json(path) {
		Ok(articles) => Ok(articles),
		Err(LisanError::MissingDataFile(path)) => {
			warn!("data file not found: {}, skipping", path.display());
			Ok(Vec::new())
		}
		Err(e) => Err(e),
	}
}

/// Annotation collaborators of one language.
///
/// A collaborator that failed to initialize is kept as its error, which the
/// matching stage reports instead of running.
pub struct Annotators {
	pub tagger: Result<Box<dyn PosTagger>>,
	pub chunker: Result<Box<dyn Chunker>>,
	pub recognizer: Result<Box<dyn EntityRecognizer>>,
}

impl Annotators {
	/// Wraps ready collaborators.
	pub fn new(
		tagger: Box<dyn PosTagger>,
		chunker: Box<dyn Chunker>,
		recognizer: Box<dyn EntityRecognizer>,
	) -> Self {
		Self { tagger: Ok(tagger), chunker: Ok(chunker), recognizer: Ok(recognizer) }
	}

	/// Loads the configured lexicon tagger and gazetteer recognizer.
	///
	/// Collaborators without a configured file are marked unavailable.
	pub fn load(config: &PipelineConfig, language: Language) -> Self {
		let tagger = match config.lexicon_path(language) {
			Some(path) => LexiconTagger::load(path, language).map(|t| Box::new(t) as Box<dyn PosTagger>),
			None => Err(LisanError::unavailable("POS tagger", format!("no lexicon configured for {}", language))),
		};
		let recognizer = match config.gazetteer_path(language) {
			Some(path) => GazetteerRecognizer::load(path, language).map(|r| Box::new(r) as Box<dyn EntityRecognizer>),
			None => Err(LisanError::unavailable(
				"entity recognizer",
				format!("no gazetteer configured for {}", language),
			)),
		};
		if let Err(e) = &tagger {
			warn!("{}", e);
		}
		if let Err(e) = &recognizer {
			warn!("{}", e);
		}

		Self {
			tagger,
			chunker: Ok(Box::new(NounPhraseChunker::for_language(language))),
			recognizer,
		}
	}
}

/// Re-raises a collaborator initialization failure for a stage.
fn ready<'a, T: ?Sized>(collaborator: &'a Result<Box<T>>) -> Result<&'a T> {
	match collaborator {
		Ok(c) => Ok(c.as_ref()),
		Err(LisanError::CollaboratorUnavailable { collaborator, reason }) => {
			Err(LisanError::unavailable(collaborator.as_str(), reason))
		}
		Err(e) => Err(LisanError::unavailable("collaborator", e)),
	}
}

/// Drives every stage for one language.
pub struct Pipeline {
	config: PipelineConfig,
	splitter: Box<dyn SentenceSplitter>,
	tokenizer: Box<dyn Tokenizer>,
}

impl Pipeline {
	/// Creates a pipeline with the punctuation splitter and rule tokenizer.
	///
	/// # Errors
	/// Returns `InvalidConfig` if the configuration is invalid.
	pub fn new(config: PipelineConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self { config, splitter: Box::new(PunctuationSplitter), tokenizer: Box::new(RuleTokenizer) })
	}

	/// Replaces the word tokenizer.
	pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
		self.tokenizer = tokenizer;
		self
	}

	/// Replaces the sentence splitter.
	pub fn with_splitter(mut self, splitter: Box<dyn SentenceSplitter>) -> Self {
		self.splitter = splitter;
		self
	}

	/// Turns articles into normalized, tokenized, non-empty sentences.
	///
	/// Article and sentence order is preserved.
	///
	/// # Errors
	/// Propagates tokenizer failures.
	pub fn preprocess(&self, articles: &[Article], language: Language) -> Result<Vec<Sentence>> {
		let mut sentences = Vec::new();
		for article in articles {
			let Some(text) = article.text.as_deref() else {
				continue;
			};
			for raw in self.splitter.split(text, language) {
				let cleaned = normalize(Some(&raw), language);
				if cleaned.is_empty() {
					continue;
				}
				let tokens = self.tokenizer.tokenize(&cleaned, language)?;
				if !tokens.is_empty() {
					sentences.push(tokens);
				}
			}
		}
		Ok(sentences)
	}

	/// Runs the whole analysis for one language.
	///
	/// # Errors
	/// Only preprocessing failures are returned; stage failures are recorded
	/// in the report.
	pub fn run(&self, language: Language, articles: &[Article], annotators: &Annotators) -> Result<LanguageReport> {
		info!("running {} pipeline ({} articles)", language, articles.len());

		let sentences = self.preprocess(articles, language)?;
		let (train, eval) = corpus::split(&sentences, self.config.train_split_ratio)?;
		let vocabulary = Vocabulary::from_sentences(&sentences);
		let corpus = CorpusStats {
			articles: articles.len(),
			sentences: sentences.len(),
			tokens: vocabulary.total(),
			types: vocabulary.len(),
			training_sentences: train.len(),
			evaluation_sentences: eval.len(),
		};
		info!(
			"{}: {} sentences, {} tokens, {} types ({} train / {} eval)",
			language,
			corpus.sentences,
			corpus.tokens,
			corpus.types,
			corpus.training_sentences,
			corpus.evaluation_sentences
		);

		let language_model = StageOutcome::from_result("language model", self.language_model_stage(train, eval));

		// Sample the first held-out sentence, or any sentence if none is held out
		let sample = eval.first().or(sentences.first());
		let annotation = StageOutcome::from_result("POS/chunk", self.annotation_stage(sample, annotators));

		let entities = StageOutcome::from_result("NER", self.entity_stage(articles, language, annotators));

		info!("{} pipeline finished", language);
		Ok(LanguageReport {
			language,
			n_gram_order: self.config.n_gram_order,
			corpus,
			language_model,
			annotation,
			entities,
		})
	}

	fn language_model_stage(&self, train: &[Sentence], eval: &[Sentence]) -> Result<LanguageModelStats> {
		info!("training N={} model on {} sentences", self.config.n_gram_order, train.len());
		let model = NGramModel::fit(self.config.n_gram_order, train)?;
		let perplexity = perplexity(&model, eval);
		if !perplexity.is_computable() {
			warn!("evaluation set is empty, perplexity not computable");
		}

		let generated = (self.config.generate_words > 0).then(|| {
			let mut rng = StdRng::seed_from_u64(self.config.seed);
			let context: [&str; 0] = [];
			model.generate(self.config.generate_words, &context, &mut rng)
		});

		Ok(LanguageModelStats {
			order: model.order(),
			vocabulary_size: model.vocabulary_size(),
			perplexity,
			generated,
		})
	}

	fn annotation_stage(&self, sample: Option<&Sentence>, annotators: &Annotators) -> Result<AnnotationSample> {
		let tagger = ready(&annotators.tagger)?;
		let chunker = ready(&annotators.chunker)?;
		let sample = sample.ok_or_else(|| LisanError::unavailable("POS tagger", "no sentence to annotate"))?;

		let tags = tagger.tag(sample)?;
		let tree = chunker.chunk(&tags)?;
		let chunks = tree.chunks(NP_LABEL);

		Ok(AnnotationSample {
			tokens: sample.iter().take(self.config.sample_tokens).cloned().collect(),
			tags: tags.into_iter().take(self.config.sample_tags).collect(),
			chunks: chunks.into_iter().take(self.config.sample_chunks).collect(),
		})
	}

	fn entity_stage(&self, articles: &[Article], language: Language, annotators: &Annotators) -> Result<EntityStats> {
		let recognizer = ready(&annotators.recognizer)?;

		// Label -> (count, rank of first appearance)
		let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
		let mut total = 0;
		for text in articles.iter().filter_map(|a| a.text.as_deref()) {
			let entities = match language {
				Language::English => {
					recognizer.recognize(EntityInput::Text { text, tokenizer: self.tokenizer.as_ref() })?
				}
				Language::Arabic => {
					let tokens = self.tokenizer.tokenize(&normalize(Some(text), language), language)?;
					recognizer.recognize(EntityInput::Tokens(&tokens))?
				}
			};
			total += entities.len();
			for entity in entities {
				let seen = counts.len();
				counts.entry(entity.label).or_insert((0, seen)).0 += 1;
			}
		}

		// Ties keep first-appearance order
		let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
		ranked.sort_by_key(|(_, (count, first))| (Reverse(*count), *first));
		let top_types = ranked
			.into_iter()
			.take(self.config.top_entities)
			.map(|(label, (count, _))| (label, count))
			.collect();
		Ok(EntityStats { total, top_types })
	}
}
