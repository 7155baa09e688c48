//! N-gram language modeling.
//!
//! This module provides:
//! - Sentence padding and n-gram extraction (`padding`)
//! - Token frequency bookkeeping (`Vocabulary`)
//! - The Laplace-smoothed model itself (`NGramModel`)
//! - Internal per-order count tables and context states

/// Laplace-smoothed n-gram model: fitting, scoring and sampling.
pub mod language_model;

/// Start/end padding symbols, n-gram and everygram extraction.
pub mod padding;

/// Distinct tokens with frequencies.
pub mod vocabulary;

/// Fixed-order count table (contexts -> states).
///
/// Not exposed
mod ngram_table;

/// Continuation counts of a single context.
///
/// Not exposed
mod state;

pub use language_model::NGramModel;
pub use padding::{END, START};
pub use vocabulary::Vocabulary;
