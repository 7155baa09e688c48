//! Intrinsic evaluation of a language model on held-out sentences.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::model::NGramModel;
use crate::model::padding::{ngrams, pad};

/// Perplexity of a model over an evaluation set.
///
/// `NotComputable` is returned instead of a number when the evaluation set
/// yields no n-gram at all (e.g. an empty held-out split).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Perplexity {
	Value(f64),
	NotComputable,
}

impl Perplexity {
	/// The numeric value, if any.
	pub fn value(self) -> Option<f64> {
		match self {
			Perplexity::Value(value) => Some(value),
			Perplexity::NotComputable => None,
		}
	}

	pub fn is_computable(self) -> bool {
		matches!(self, Perplexity::Value(_))
	}
}

impl fmt::Display for Perplexity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Perplexity::Value(value) => write!(f, "{:.2}", value),
			Perplexity::NotComputable => f.write_str("not computable"),
		}
	}
}

/// Serialized as a number, or `null` when not computable.
impl Serialize for Perplexity {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.value().serialize(serializer)
	}
}

/// Average negative base-2 log-probability per n-gram.
///
/// Each sentence is padded as in training and cut into n-grams of the model
/// order; all n-grams of all sentences form one sequence of length `M`:
///
/// ```text
/// H = -(1/M) Σ log2 P(w_i | c_i)
/// ```
///
/// Empty sentences are skipped. Returns `None` when `M == 0`. Smoothing keeps
/// every probability positive, so the sum is always finite.
pub fn cross_entropy<T: AsRef<str>>(model: &NGramModel, sentences: &[Vec<T>]) -> Option<f64> {
	let n = model.order();
	let mut log_sum = 0.0;
	let mut m = 0usize;

	for sentence in sentences.iter().filter(|s| !s.is_empty()) {
		let padded = pad(sentence, n);
		for gram in ngrams(&padded, n) {
			let (context, word) = gram.split_at(n - 1);
			log_sum += model.logscore(&word[0], context);
			m += 1;
		}
	}

	if m == 0 {
		return None;
	}
	Some(-log_sum / m as f64)
}

/// Perplexity `2^H` of `model` over `sentences` (see [`cross_entropy`]).
pub fn perplexity<T: AsRef<str>>(model: &NGramModel, sentences: &[Vec<T>]) -> Perplexity {
	match cross_entropy(model, sentences) {
		Some(entropy) => Perplexity::Value(entropy.exp2()),
		None => Perplexity::NotComputable,
	}
}
