use std::collections::HashMap;

use crate::text::Token;

/// Represents a context (state) of an n-gram table.
///
/// A `State` corresponds to a fixed (n-1)-token context and stores every
/// observed continuation with its number of occurrences.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Invariants
/// - Each transition occurrence count is strictly positive
/// - `total` is the sum of all transition counts
#[derive(Clone, Debug, Default)]
pub(crate) struct State {
	/// Example: { "cat" => 42, "dog" => 3 }
	transitions: HashMap<Token, usize>,
	total: usize,
}

impl State {
	/// Records an occurrence of a transition toward `next`.
	pub fn add_transition(&mut self, next: &str) {
		match self.transitions.get_mut(next) {
			Some(count) => *count += 1,
			None => {
				self.transitions.insert(next.to_owned(), 1);
			}
		}
		self.total += 1;
	}

	/// Occurrences of `next` after this context (0 if never seen).
	pub fn count(&self, next: &str) -> usize {
		self.transitions.get(next).copied().unwrap_or(0)
	}

	/// Occurrences of this context, all continuations included.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Observed continuations and their counts.
	pub fn transitions(&self) -> impl Iterator<Item = (&str, usize)> {
		self.transitions.iter().map(|(token, count)| (token.as_str(), *count))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_transitions() {
		let mut state = State::default();
		state.add_transition("cat");
		state.add_transition("dog");
		state.add_transition("cat");

		assert_eq!(state.count("cat"), 2);
		assert_eq!(state.count("dog"), 1);
		assert_eq!(state.count("bird"), 0);
		assert_eq!(state.total(), 3);
		assert_eq!(state.transitions().map(|(_, c)| c).sum::<usize>(), state.total());
	}
}
