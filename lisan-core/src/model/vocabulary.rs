use std::collections::BTreeMap;

use crate::text::Token;

/// Distinct tokens with their frequencies.
///
/// Ordered by token so that iteration (and therefore seeded sampling) is
/// reproducible across runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vocabulary {
	counts: BTreeMap<Token, usize>,
	total: usize,
}

impl Vocabulary {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a vocabulary from a sequence of sentences.
	pub fn from_sentences<T: AsRef<str>>(sentences: &[Vec<T>]) -> Self {
		let mut vocabulary = Self::new();
		for sentence in sentences {
			vocabulary.extend(sentence);
		}
		vocabulary
	}

	/// Records one occurrence of `token`.
	pub fn add(&mut self, token: &str) {
		match self.counts.get_mut(token) {
			Some(count) => *count += 1,
			None => {
				self.counts.insert(token.to_owned(), 1);
			}
		}
		self.total += 1;
	}

	/// Records every token of `tokens`.
	pub fn extend<T: AsRef<str>>(&mut self, tokens: &[T]) {
		for token in tokens {
			self.add(token.as_ref());
		}
	}

	/// Number of distinct tokens (types).
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Number of recorded occurrences (tokens).
	pub fn total(&self) -> usize {
		self.total
	}

	pub fn contains(&self, token: &str) -> bool {
		self.counts.contains_key(token)
	}

	/// Occurrences of `token` (0 if unknown).
	pub fn count(&self, token: &str) -> usize {
		self.counts.get(token).copied().unwrap_or(0)
	}

	/// Distinct tokens in lexical order.
	pub fn tokens(&self) -> impl Iterator<Item = &str> {
		self.counts.keys().map(String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_types_and_tokens() {
		let vocabulary = Vocabulary::from_sentences(&[vec!["the", "cat", "sat"], vec!["the", "dog"]]);
		assert_eq!(vocabulary.len(), 4);
		assert_eq!(vocabulary.total(), 5);
		assert_eq!(vocabulary.count("the"), 2);
		assert_eq!(vocabulary.count("bird"), 0);
		assert!(vocabulary.contains("dog"));
		assert_eq!(vocabulary.tokens().collect::<Vec<_>>(), vec!["cat", "dog", "sat", "the"]);
	}
}
