use std::collections::HashMap;

use super::state::State;
use crate::error::{LisanError, Result};
use crate::text::Token;

/// Counts of n-grams of a single order `n`.
///
/// Stores one `State` per (n-1)-token context; for `n = 1` there is a single
/// empty context whose transitions are the unigram counts.
///
/// # Invariants
/// - `n` is always >= 1
/// - Each state in `states` corresponds to a unique context of length `n-1`
#[derive(Clone, Debug)]
pub(crate) struct NGramTable {
	/// The order of the table (number of tokens in the n-gram)
	n: usize,

	/// Mapping from a context (length n-1) to its continuations
	states: HashMap<Vec<Token>, State>,
}

impl NGramTable {
	/// Creates a new empty table of order `n`.
	///
	/// # Errors
	/// Returns an error if `n < 1`.
	pub fn new(n: usize) -> Result<Self> {
		if n < 1 {
			return Err(LisanError::InvalidConfig("n-gram order must be >= 1".to_owned()));
		}
		Ok(Self { n, states: HashMap::new() })
	}

	/// Records one n-gram. Grams of another length are ignored.
	pub fn add(&mut self, gram: &[Token]) {
		if gram.len() != self.n {
			return;
		}
		let (context, next) = gram.split_at(self.n - 1);
		// Avoid cloning the context when the state exists
		match self.states.get_mut(context) {
			Some(state) => state.add_transition(&next[0]),
			None => {
				let mut state = State::default();
				state.add_transition(&next[0]);
				self.states.insert(context.to_vec(), state);
			}
		}
	}

	/// State of a context, if it was observed.
	///
	/// The context must be exactly `n - 1` tokens long to match anything.
	pub fn state<S: AsRef<str>>(&self, context: &[S]) -> Option<&State> {
		let key: Vec<Token> = context.iter().map(|t| t.as_ref().to_owned()).collect();
		self.states.get(key.as_slice())
	}

	/// Number of distinct contexts.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// Observed contexts.
	pub fn contexts(&self) -> impl Iterator<Item = &[Token]> {
		self.states.keys().map(Vec::as_slice)
	}
}
