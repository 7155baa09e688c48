use lisan_core::annotate::{
	Entity, EntityInput, EntityRecognizer, GazetteerRecognizer, LexiconTagger, NounPhraseChunker, PosTagger,
	TaggedToken,
};
use lisan_core::config::PipelineConfig;
use lisan_core::evaluation::{Perplexity, perplexity};
use lisan_core::model::NGramModel;
use lisan_core::pipeline::{Annotators, Article, Pipeline, StageOutcome};
use lisan_core::text::{SentenceSplitter, Token, Tokenizer, tokenize_named};
use lisan_core::{Language, LisanError, Result};

fn english_articles() -> Vec<Article> {
	[
		"The BBC reported rain in London. The big storm hit the city.",
		"Boris Johnson visited London today. The cat sat on the mat.",
		"The dog ran in the park. A small cat slept.",
		"The government announced new plans. London welcomed the news.",
		"The old dog sat. The BBC covered the story.",
	]
	.into_iter()
	.map(Article::new)
	.collect()
}

fn english_annotators() -> Annotators {
	Annotators::new(
		Box::new(LexiconTagger::from_entries(
			Language::English,
			[("the", "DT"), ("old", "JJ"), ("dog", "NN"), ("sat", "VBD")],
		)),
		Box::new(NounPhraseChunker::for_language(Language::English)),
		Box::new(GazetteerRecognizer::from_entries(
			Language::English,
			[("GPE", vec!["London"]), ("PERSON", vec!["Boris Johnson"]), ("ORG", vec!["BBC"])],
		)),
	)
}

struct BrokenTagger;

impl PosTagger for BrokenTagger {
	fn tag(&self, _tokens: &[Token]) -> Result<Vec<TaggedToken>> {
		Err(LisanError::unavailable("POS tagger", "model crashed"))
	}
}

struct BrokenTokenizer;

impl Tokenizer for BrokenTokenizer {
	fn tokenize(&self, _text: &str, _language: Language) -> Result<Vec<Token>> {
		Err(LisanError::unavailable("tokenizer", "backend missing"))
	}
}

/// Labels each call with the kind of input it received.
struct InputKindRecognizer;

impl EntityRecognizer for InputKindRecognizer {
	fn recognize(&self, input: EntityInput<'_>) -> Result<Vec<Entity>> {
		let label = match input {
			EntityInput::Text { .. } => "TEXT",
			EntityInput::Tokens(_) => "TOKENS",
		};
		Ok(vec![Entity { text: String::new(), label: label.to_owned() }])
	}
}

/// One token per character.
struct CharTokenizer;

impl Tokenizer for CharTokenizer {
	fn tokenize(&self, text: &str, _language: Language) -> Result<Vec<Token>> {
		Ok(text.chars().filter(|c| !c.is_whitespace()).map(String::from).collect())
	}
}

/// One sentence per line.
struct LineSplitter;

impl SentenceSplitter for LineSplitter {
	fn split(&self, text: &str, _language: Language) -> Vec<String> {
		text.lines().map(str::to_owned).collect()
	}
}

#[test]
fn english_run_completes_every_stage() {
	let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
	let report = pipeline.run(Language::English, &english_articles(), &english_annotators()).unwrap();

	assert_eq!(report.corpus.articles, 5);
	assert_eq!(report.corpus.sentences, 10);
	assert_eq!(report.corpus.training_sentences, 8);
	assert_eq!(report.corpus.evaluation_sentences, 2);

	let lm = report.language_model.completed().unwrap();
	assert_eq!(lm.order, 2);
	let pp = lm.perplexity.value().unwrap();
	assert!(pp.is_finite() && pp > 1.0);
	assert_eq!(lm.generated, None);

	// First held-out sentence
	let sample = report.annotation.completed().unwrap();
	assert_eq!(sample.tokens, vec!["the", "old", "dog", "sat"]);
	assert_eq!(sample.tags[1], TaggedToken::new("old", "JJ"));
	assert_eq!(sample.chunks, vec!["the old dog"]);

	let entities = report.entities.completed().unwrap();
	assert_eq!(entities.total, 6);
	assert_eq!(
		entities.top_types,
		vec![("GPE".to_owned(), 3), ("ORG".to_owned(), 2), ("PERSON".to_owned(), 1)]
	);

	let text = report.to_string();
	assert!(text.contains("RUNNING ENGLISH PIPELINE (5 ARTICLES)"));
	assert!(text.contains("Sample Chunks Extracted: ['the old dog']..."));
}

#[test]
fn failing_tagger_only_fails_its_stage() {
	let mut annotators = english_annotators();
	annotators.tagger = Ok(Box::new(BrokenTagger));

	let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
	let report = pipeline.run(Language::English, &english_articles(), &annotators).unwrap();

	assert!(report.annotation.error().unwrap().contains("model crashed"));
	assert!(report.language_model.completed().is_some());
	assert!(report.entities.completed().is_some());
	assert!(report.to_string().contains("Error during POS tagging/chunking"));
}

#[test]
fn unconfigured_collaborators_are_reported() {
	let config = PipelineConfig::default();
	let annotators = Annotators::load(&config, Language::English);
	let report = Pipeline::new(config).unwrap().run(Language::English, &english_articles(), &annotators).unwrap();

	assert!(report.annotation.error().unwrap().contains("POS tagger unavailable"));
	assert!(report.entities.error().unwrap().contains("entity recognizer unavailable"));
	assert!(report.language_model.completed().is_some());
}

#[test]
fn empty_training_set_only_fails_the_model() {
	// floor(1 * 0.8) = 0 training sentences
	let articles = [Article::new("The cat sat.")];
	let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
	let report = pipeline.run(Language::English, &articles, &english_annotators()).unwrap();

	assert_eq!(report.corpus.training_sentences, 0);
	assert_eq!(report.corpus.evaluation_sentences, 1);
	assert!(matches!(&report.language_model, StageOutcome::Failed(e) if e.contains("training set is empty")));
	assert_eq!(report.annotation.completed().unwrap().tokens, vec!["the", "cat", "sat"]);
	assert!(report.entities.completed().is_some());
}

#[test]
fn no_articles_is_not_fatal() {
	let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
	let report = pipeline.run(Language::English, &[], &english_annotators()).unwrap();

	assert_eq!(report.corpus.sentences, 0);
	assert!(report.language_model.error().is_some());
	assert!(report.annotation.error().is_some());
	let entities = report.entities.completed().unwrap();
	assert_eq!(entities.total, 0);
	assert!(entities.top_types.is_empty());
}

#[test]
fn articles_without_text_are_skipped() {
	let articles = [Article::default(), Article::new("")];
	let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
	let report = pipeline.run(Language::English, &articles, &english_annotators()).unwrap();
	assert_eq!(report.corpus.articles, 2);
	assert_eq!(report.corpus.tokens, 0);
}

#[test]
fn full_training_ratio_makes_perplexity_not_computable() {
	let config = PipelineConfig { train_split_ratio: 1.0, ..PipelineConfig::default() };
	let report = Pipeline::new(config).unwrap().run(Language::English, &english_articles(), &english_annotators()).unwrap();

	let lm = report.language_model.completed().unwrap();
	assert_eq!(lm.perplexity, Perplexity::NotComputable);
	assert!(report.to_string().contains("Perplexity on Test Set: not computable"));
	// No held-out sentence: the first sentence is sampled instead
	assert_eq!(report.annotation.completed().unwrap().tokens[..3], ["the", "bbc", "reported"]);
}

#[test]
fn tokenizer_failure_is_fatal_for_the_language() {
	let pipeline = Pipeline::new(PipelineConfig::default()).unwrap().with_tokenizer(Box::new(BrokenTokenizer));
	let err = pipeline.run(Language::English, &english_articles(), &english_annotators()).unwrap_err();
	assert!(matches!(err, LisanError::CollaboratorUnavailable { .. }));
}

#[test]
fn invalid_config_is_rejected() {
	let config = PipelineConfig { n_gram_order: 0, ..PipelineConfig::default() };
	assert!(matches!(Pipeline::new(config), Err(LisanError::InvalidConfig(_))));
}

#[test]
fn entity_input_depends_on_language() {
	let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
	let annotators = |language| {
		Annotators::new(
			Box::new(LexiconTagger::from_entries(language, Vec::<(String, String)>::new())),
			Box::new(NounPhraseChunker::for_language(language)),
			Box::new(InputKindRecognizer),
		)
	};

	let english = pipeline.run(Language::English, &english_articles(), &annotators(Language::English)).unwrap();
	assert_eq!(english.entities.completed().unwrap().top_types, vec![("TEXT".to_owned(), 5)]);

	let arabic_articles = [Article::new("زار الرئيس القاهرة.")];
	let arabic = pipeline.run(Language::Arabic, &arabic_articles, &annotators(Language::Arabic)).unwrap();
	assert_eq!(arabic.entities.completed().unwrap().top_types, vec![("TOKENS".to_owned(), 1)]);
}

#[test]
fn english_entities_use_the_pipeline_tokenizer() {
	let annotators = || {
		Annotators::new(
			Box::new(LexiconTagger::from_entries(Language::English, Vec::<(String, String)>::new())),
			Box::new(NounPhraseChunker::for_language(Language::English)),
			Box::new(GazetteerRecognizer::from_entries(Language::English, [("ORG", vec!["b b c"])])),
		)
	};

	// "BBC" only reads as "b b c" when split per character
	let pipeline = Pipeline::new(PipelineConfig::default()).unwrap().with_tokenizer(Box::new(CharTokenizer));
	let report = pipeline.run(Language::English, &english_articles(), &annotators()).unwrap();
	let entities = report.entities.completed().unwrap();
	assert_eq!(entities.total, 2);
	assert_eq!(entities.top_types, vec![("ORG".to_owned(), 2)]);

	let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
	let report = pipeline.run(Language::English, &english_articles(), &annotators()).unwrap();
	assert_eq!(report.entities.completed().unwrap().total, 0);
}

#[test]
fn custom_sentence_splitter() {
	let articles = [Article::new("The cat sat. The dog ran.\nA bird flew.")];
	let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
	assert_eq!(pipeline.preprocess(&articles, Language::English).unwrap().len(), 3);

	let pipeline = pipeline.with_splitter(Box::new(LineSplitter));
	let sentences = pipeline.preprocess(&articles, Language::English).unwrap();
	assert_eq!(sentences, vec![vec!["the", "cat", "sat", "the", "dog", "ran"], vec!["a", "bird", "flew"]]);
}

#[test]
fn entity_ties_keep_first_appearance_order() {
	let articles = [Article::new("Paris and the BBC."), Article::new("The BBC in Paris, then Rome.")];
	let annotators = Annotators::new(
		Box::new(LexiconTagger::from_entries(Language::English, Vec::<(String, String)>::new())),
		Box::new(NounPhraseChunker::for_language(Language::English)),
		Box::new(GazetteerRecognizer::from_entries(
			Language::English,
			[("ORG", vec!["BBC"]), ("GPE", vec!["Paris"]), ("LOC", vec!["Rome"])],
		)),
	);
	let report = Pipeline::new(PipelineConfig::default()).unwrap().run(Language::English, &articles, &annotators).unwrap();
	assert_eq!(
		report.entities.completed().unwrap().top_types,
		vec![("GPE".to_owned(), 2), ("ORG".to_owned(), 2), ("LOC".to_owned(), 1)]
	);
}

#[test]
fn arabic_run() {
	let articles = [
		Article::new("زار الرئيس القاهرة أمس. المدينة الكبيرة جميلة."),
		Article::new("وصل الوفد إلى القاهرة؟ نعم وصل الوفد."),
	];
	let annotators = Annotators::new(
		Box::new(LexiconTagger::from_entries(Language::Arabic, [("الكبيره", "adj"), ("جميله", "adj")])),
		Box::new(NounPhraseChunker::for_language(Language::Arabic)),
		Box::new(GazetteerRecognizer::from_entries(Language::Arabic, [("LOC", vec!["القاهرة"])])),
	);
	let report = Pipeline::new(PipelineConfig::default()).unwrap().run(Language::Arabic, &articles, &annotators).unwrap();

	assert_eq!(report.corpus.sentences, 4);
	assert_eq!(report.corpus.training_sentences, 3);
	assert!(report.language_model.completed().unwrap().perplexity.is_computable());
	assert_eq!(report.annotation.completed().unwrap().tokens, vec!["نعم", "وصل", "الوفد"]);
	assert_eq!(report.entities.completed().unwrap().top_types, vec![("LOC".to_owned(), 2)]);
}

#[test]
fn generation_is_reproducible() {
	let config = PipelineConfig { generate_words: 6, seed: 7, ..PipelineConfig::default() };
	let pipeline = Pipeline::new(config).unwrap();
	let run = || {
		let report = pipeline.run(Language::English, &english_articles(), &english_annotators()).unwrap();
		report.language_model.completed().unwrap().generated.clone().unwrap()
	};

	let first = run();
	assert!(first.len() <= 6);
	assert_eq!(first, run());
}

#[test]
fn report_serializes_to_json() {
	let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
	let report = pipeline.run(Language::English, &english_articles(), &english_annotators()).unwrap();
	let json = serde_json::to_value(&report).unwrap();

	assert_eq!(json["language"], "english");
	assert_eq!(json["corpus"]["sentences"], 10);
	assert!(json["language_model"]["completed"]["perplexity"].is_f64());
	assert_eq!(json["entities"]["completed"]["top_types"][0][0], "GPE");
}

#[test]
fn cat_dog_model() {
	let model = NGramModel::fit(2, &[vec!["the", "cat", "sat"], vec!["the", "dog", "ran"]]).unwrap();
	let v = model.vocabulary_size() as f64;

	assert_eq!(model.context_count(&["the"]), 2);
	assert_eq!(model.score("cat", &["the"]), 2.0 / (2.0 + v));
}

#[test]
fn seen_text_is_less_perplexing_than_unseen_text() {
	let train = [vec!["the", "cat", "sat"], vec!["the", "dog", "ran"]];
	let model = NGramModel::fit(2, &train).unwrap();

	let seen = perplexity(&model, &train).value().unwrap();
	let unseen = perplexity(&model, &[vec!["a", "bird", "flew"]]).value().unwrap();
	assert!(seen < unseen);
	assert_eq!(perplexity(&model, &Vec::<Vec<&str>>::new()), Perplexity::NotComputable);
}

#[test]
fn unsupported_language_name() {
	assert!(matches!(tokenize_named("hello", "french"), Err(LisanError::UnsupportedLanguage(_))));
	assert_eq!(tokenize_named("hello world", "english").unwrap(), vec!["hello", "world"]);
}
