use log::debug;
use rand::Rng;

use super::ngram_table::NGramTable;
use super::padding::{END, START, everygrams, pad};
use super::vocabulary::Vocabulary;
use crate::error::{LisanError, Result};
use crate::text::Token;

/// Laplace (add-one) smoothed n-gram language model.
///
/// Built once from training sentences, immutable afterwards.
///
/// Each sentence is padded (`n-1` start symbols, one end symbol) and every
/// n-gram of order 1 to `n` is counted (everygrams). The vocabulary is the set
/// of distinct tokens of the padded training sentences, start and end
/// symbols included.
///
/// For a context `c` and a word `w`:
///
/// ```text
/// P(w | c) = (count(c, w) + 1) / (count(c) + |V|)
/// ```
///
/// An unseen context (`count(c) = 0`) yields the uniform `1 / |V|`, so every
/// probability is strictly positive and each context's distribution sums to 1
/// over the vocabulary.
///
/// # Invariants
/// - `n >= 1`
/// - `tables[k]` holds the counts of order `k + 1`
/// - `vocabulary` is non-empty (at least the end symbol)
#[derive(Clone, Debug)]
pub struct NGramModel {
	/// The order of the model
	n: usize,

	/// One count table per order, from unigrams to n-grams
	tables: Vec<NGramTable>,

	/// Tokens of the padded training sentences
	vocabulary: Vocabulary,
}

impl NGramModel {
	/// Fits a model of order `n` on training sentences.
	///
	/// Empty sentences are dropped before counting.
	///
	/// # Errors
	/// - `InvalidConfig` if `n == 0`
	/// - `EmptyTrainingSet` if no non-empty sentence remains
	pub fn fit<T: AsRef<str>>(n: usize, sentences: &[Vec<T>]) -> Result<Self> {
		let mut tables = (1..=n).map(NGramTable::new).collect::<Result<Vec<_>>>()?;
		if tables.is_empty() {
			return Err(LisanError::InvalidConfig("n-gram order must be >= 1".to_owned()));
		}

		let mut vocabulary = Vocabulary::new();
		let mut used = 0;
		for sentence in sentences.iter().filter(|s| !s.is_empty()) {
			let padded = pad(sentence, n);
			vocabulary.extend(&padded);
			for gram in everygrams(&padded, n) {
				tables[gram.len() - 1].add(gram);
			}
			used += 1;
		}

		if used == 0 {
			return Err(LisanError::EmptyTrainingSet);
		}

		debug!(
			"fitted {}-gram model: {} sentences, {} types, {} contexts",
			n,
			used,
			vocabulary.len(),
			tables[n - 1].len()
		);

		Ok(Self { n, tables, vocabulary })
	}

	/// The order of the model.
	pub fn order(&self) -> usize {
		self.n
	}

	/// Vocabulary of the padded training data.
	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	/// Size of the vocabulary used for smoothing.
	pub fn vocabulary_size(&self) -> usize {
		self.vocabulary.len()
	}

	/// The table matching a context, and the context trimmed to fit it.
	///
	/// Contexts longer than `n - 1` keep their last `n - 1` tokens; shorter
	/// ones are looked up in the lower-order table of matching length.
	fn table_for<'a, S: AsRef<str>>(&self, context: &'a [S]) -> (&NGramTable, &'a [S]) {
		let keep = context.len().min(self.n - 1);
		let context = &context[context.len() - keep..];
		(&self.tables[keep], context)
	}

	/// Number of times `context` was observed (as the prefix of an n-gram).
	pub fn context_count<S: AsRef<str>>(&self, context: &[S]) -> usize {
		let (table, context) = self.table_for(context);
		table.state(context).map_or(0, |state| state.total())
	}

	/// Number of times `word` followed `context` in training.
	pub fn count<S: AsRef<str>>(&self, word: &str, context: &[S]) -> usize {
		let (table, context) = self.table_for(context);
		table.state(context).map_or(0, |state| state.count(word))
	}

	/// Observed continuations of `context`, most frequent first.
	pub fn continuations<S: AsRef<str>>(&self, context: &[S]) -> Vec<(&str, usize)> {
		let (table, context) = self.table_for(context);
		let mut continuations: Vec<(&str, usize)> = match table.state(context) {
			Some(state) => state.transitions().collect(),
			None => Vec::new(),
		};
		continuations.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
		continuations
	}

	/// Contexts of length `n - 1` observed in training.
	pub fn contexts(&self) -> impl Iterator<Item = &[Token]> {
		self.tables[self.n - 1].contexts()
	}

	/// Smoothed probability of `word` given `context`.
	pub fn score<S: AsRef<str>>(&self, word: &str, context: &[S]) -> f64 {
		let (table, context) = self.table_for(context);
		let (count, total) = match table.state(context) {
			Some(state) => (state.count(word), state.total()),
			None => (0, 0),
		};
		(count + 1) as f64 / (total + self.vocabulary.len()) as f64
	}

	/// Base-2 logarithm of [`NGramModel::score`].
	pub fn logscore<S: AsRef<str>>(&self, word: &str, context: &[S]) -> f64 {
		self.score(word, context).log2()
	}

	/// Generates up to `num_words` tokens following `seed`.
	///
	/// Starts from `seed` (padded with start symbols when shorter than the
	/// context) and repeatedly samples the next token from the smoothed
	/// distribution, excluding the start symbol. Generation stops early when
	/// the end symbol is drawn; the end symbol is not returned.
	///
	/// Sampling walks the vocabulary in lexical order, so a seeded `rng`
	/// reproduces the same output.
	pub fn generate<S, R>(&self, num_words: usize, seed: &[S], rng: &mut R) -> Vec<Token>
	where
		S: AsRef<str>,
		R: Rng + ?Sized,
	{
		let mut history: Vec<Token> = pad(seed, self.n);
		// pad() appends the end symbol, which is not part of the history
		history.pop();

		let mut generated = Vec::with_capacity(num_words);
		while generated.len() < num_words {
			let context = &history[history.len() - (self.n - 1)..];
			let next = self.sample(context, rng);
			if next == END {
				break;
			}
			generated.push(next.to_owned());
			history.push(next.to_owned());
		}
		generated
	}

	/// Draws one token with probability proportional to `count(c, w) + 1`.
	///
	/// This method performs:
	/// - an O(|V|) scan over the vocabulary
	/// - a cumulative subtraction to select a bucket
	fn sample<R: Rng + ?Sized>(&self, context: &[Token], rng: &mut R) -> &str {
		let (table, context) = self.table_for(context);
		let state = table.state(context);
		let weight = |token: &str| state.map_or(0, |s| s.count(token)) + 1;

		let total: usize = self.vocabulary.tokens().filter(|t| *t != START).map(weight).sum();
		let mut r = rng.random_range(0..total);

		let mut fallback = END;
		for token in self.vocabulary.tokens().filter(|t| *t != START) {
			let w = weight(token);
			if r < w {
				return token;
			}
			r -= w;
			fallback = token;
		}

		// Should not happen, kept for safety
		fallback
	}
}
