//! Bilingual (English/Arabic) text-analysis library.
//!
//! This crate provides a batch analysis pipeline for news articles including:
//! - Text normalization and tokenization (English and Arabic)
//! - Positional train/evaluation corpus splitting
//! - Laplace-smoothed n-gram language models and perplexity evaluation
//! - Capability traits for POS tagging, chunking and named-entity recognition
//! - A stage-isolated pipeline producing a structured report per language
//!
//! File loading helpers are kept internal; articles are loaded through
//! [`pipeline::load_articles`].

/// Error type shared by every stage.
pub mod error;

/// Supported pipeline languages.
pub mod language;

/// Pipeline configuration (n-gram order, split ratio, data paths).
pub mod config;

/// Normalization, sentence splitting and word tokenization.
pub mod text;

/// Positional train/evaluation split.
pub mod corpus;

/// Laplace-smoothed n-gram language model.
///
/// Handles padding, everygram counting, smoothed scoring and sampling.
pub mod model;

/// Perplexity and cross-entropy of a model over held-out sentences.
pub mod evaluation;

/// Annotation collaborators (POS tagging, chunking, NER).
pub mod annotate;

/// Orchestration of all stages and the per-language report.
pub mod pipeline;

/// I/O utilities (JSON loading).
///
/// Not exposed
pub(crate) mod io;

pub use error::{LisanError, Result};
pub use language::Language;
