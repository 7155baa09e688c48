use crate::text::Token;

/// Left padding symbol (sentence start).
pub const START: &str = "<s>";

/// Right padding symbol (sentence end).
pub const END: &str = "</s>";

/// Pads a sentence for a model of order `n`.
///
/// `n - 1` start symbols on the left, one end symbol on the right, so every
/// token (and the end of the sentence) has a full-length context.
///
/// Example (`n = 3`): `[a, b]` -> `[<s>, <s>, a, b, </s>]`
pub fn pad<T: AsRef<str>>(sentence: &[T], n: usize) -> Vec<Token> {
	let left = n.saturating_sub(1);
	let mut padded = Vec::with_capacity(left + sentence.len() + 1);
	padded.extend(std::iter::repeat_n(START.to_owned(), left));
	padded.extend(sentence.iter().map(|t| t.as_ref().to_owned()));
	padded.push(END.to_owned());
	padded
}

/// Contiguous n-grams of exactly `n` tokens.
///
/// A padded sentence of `len` words yields exactly `len + 1` n-grams.
pub fn ngrams(padded: &[Token], n: usize) -> impl Iterator<Item = &[Token]> {
	// windows(0) panics
	padded.windows(n.max(1))
}

/// Every n-gram of every order from 1 to `max_n`, lowest order first.
pub fn everygrams(padded: &[Token], max_n: usize) -> impl Iterator<Item = &[Token]> {
	(1..=max_n).flat_map(move |n| padded.windows(n))
}
