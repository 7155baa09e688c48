//! Text front end: raw article -> sentences -> normalized tokens.
//!
//! - Sentence splitting (`SentenceSplitter`, raw text)
//! - Normalization (`normalize`, per sentence)
//! - Word tokenization (`Tokenizer`, normalized text)

/// Language-aware cleaning of raw sentences.
pub mod normalizer;

/// Sentence segmentation trait and the punctuation-based splitter.
pub mod sentence;

/// Word tokenization trait and the rule-based tokenizer.
pub mod tokenizer;

pub use normalizer::normalize;
pub use sentence::{PunctuationSplitter, SentenceSplitter};
pub use tokenizer::{RuleTokenizer, Tokenizer, tokenize_named};

/// A normalized word.
pub type Token = String;

/// An ordered sequence of tokens.
pub type Sentence = Vec<Token>;
