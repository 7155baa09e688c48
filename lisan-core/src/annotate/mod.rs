//! Annotation collaborators: POS tagging, chunking and NER.
//!
//! Each capability is a trait so the pipeline can be given any backend
//! (or a test double). Adapters are constructed once per language and
//! injected; a backend that fails to load or to predict reports
//! `CollaboratorUnavailable`.

use serde::Serialize;

use crate::error::Result;
use crate::text::{Token, Tokenizer};

/// Noun-phrase chunk rules over POS tags.
pub mod chunk;

/// Gazetteer-backed named-entity recognizer.
pub mod gazetteer;

/// Lexicon-backed POS tagger.
pub mod lexicon;

pub use chunk::NounPhraseChunker;
pub use gazetteer::GazetteerRecognizer;
pub use lexicon::LexiconTagger;

/// A token with its part-of-speech tag.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TaggedToken {
	pub token: Token,
	pub tag: String,
}

impl TaggedToken {
	pub fn new(token: impl Into<Token>, tag: impl Into<String>) -> Self {
		Self { token: token.into(), tag: tag.into() }
	}
}

/// Shallow parse tree produced by a [`Chunker`].
///
/// The root is labeled `S`; its children are either chunk nodes (e.g. `NP`)
/// whose children are leaves, or leaves left outside any chunk.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub enum ChunkTree {
	Leaf(TaggedToken),
	Node { label: String, children: Vec<ChunkTree> },
}

impl ChunkTree {
	/// Label of a node, `None` for a leaf.
	pub fn label(&self) -> Option<&str> {
		match self {
			ChunkTree::Leaf(_) => None,
			ChunkTree::Node { label, .. } => Some(label.as_str()),
		}
	}

	/// Tagged tokens under this tree, left to right.
	pub fn leaves(&self) -> Vec<&TaggedToken> {
		match self {
			ChunkTree::Leaf(leaf) => vec![leaf],
			ChunkTree::Node { children, .. } => children.iter().flat_map(ChunkTree::leaves).collect(),
		}
	}

	/// This tree and every node below it, pre-order. Leaves are skipped.
	pub fn subtrees(&self) -> Vec<&ChunkTree> {
		match self {
			ChunkTree::Leaf(_) => Vec::new(),
			ChunkTree::Node { children, .. } => {
				let mut nodes = vec![self];
				nodes.extend(children.iter().flat_map(ChunkTree::subtrees));
				nodes
			}
		}
	}

	/// Text of every chunk labeled `label`, tokens joined by a space.
	pub fn chunks(&self, label: &str) -> Vec<String> {
		self.subtrees()
			.into_iter()
			.filter(|tree| tree.label() == Some(label))
			.map(|tree| {
				tree.leaves()
					.iter()
					.map(|leaf| leaf.token.as_str())
					.collect::<Vec<_>>()
					.join(" ")
			})
			.collect()
	}
}

/// A recognized named entity.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Entity {
	/// Surface text of the entity.
	pub text: String,
	/// Entity type (e.g. `PERSON`, `GPE`, `LOC`).
	pub label: String,
}

/// What a recognizer is fed: raw text (English) or tokens (Arabic).
///
/// Raw text comes with the pipeline's tokenizer, for recognizers that work
/// on tokens.
#[derive(Clone, Copy)]
pub enum EntityInput<'a> {
	Text { text: &'a str, tokenizer: &'a dyn Tokenizer },
	Tokens(&'a [Token]),
}

/// Part-of-speech tagging backend for one language.
pub trait PosTagger {
	/// Tags every token, preserving order and length.
	fn tag(&self, tokens: &[Token]) -> Result<Vec<TaggedToken>>;
}

/// Shallow chunking backend for one language.
pub trait Chunker {
	fn chunk(&self, tagged: &[TaggedToken]) -> Result<ChunkTree>;
}

/// Named-entity recognition backend for one language.
pub trait EntityRecognizer {
	fn recognize(&self, input: EntityInput<'_>) -> Result<Vec<Entity>>;
}
