use crate::config::validate_ratio;
use crate::error::Result;

/// Splits an ordered corpus into a training prefix and an evaluation suffix.
///
/// `split_index = floor(len × ratio)`; the training set is
/// `items[..split_index]` and the evaluation set is the remainder. The split
/// is positional, never shuffled, so `train ++ eval == items`.
///
/// Degenerate outcomes are returned as-is: an empty training set (the model
/// refuses to fit) or an empty evaluation set (perplexity is not computable).
///
/// # Errors
/// Returns `InvalidConfig` if `ratio` is outside `(0, 1]`.
pub fn split<T>(items: &[T], ratio: f64) -> Result<(&[T], &[T])> {
	validate_ratio(ratio)?;
	let split_index = ((items.len() as f64 * ratio).floor() as usize).min(items.len());
	Ok(items.split_at(split_index))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn prefix_and_suffix() {
		let corpus: Vec<usize> = (0..10).collect();
		let (train, eval) = split(&corpus, 0.8).unwrap();
		assert_eq!(train, &[0, 1, 2, 3, 4, 5, 6, 7]);
		assert_eq!(eval, &[8, 9]);
	}

	#[test]
	fn exhaustive_and_floored() {
		for len in 0..25 {
			let corpus: Vec<usize> = (0..len).collect();
			for ratio in [0.01, 0.1, 0.25, 0.5, 0.8, 0.99, 1.0] {
				let (train, eval) = split(&corpus, ratio).unwrap();
				assert_eq!(train.len(), (len as f64 * ratio).floor() as usize);
				assert_eq!([train, eval].concat(), corpus);
			}
		}
	}

	#[test]
	fn degenerate_splits() {
		let empty: Vec<u8> = Vec::new();
		let (train, eval) = split(&empty, 0.8).unwrap();
		assert!(train.is_empty() && eval.is_empty());

		let one = vec!["only"];
		let (train, eval) = split(&one, 0.8).unwrap();
		assert!(train.is_empty());
		assert_eq!(eval, &["only"]);

		let (train, eval) = split(&one, 1.0).unwrap();
		assert_eq!(train, &["only"]);
		assert!(eval.is_empty());
	}

	#[test]
	fn invalid_ratio() {
		let corpus = vec![1, 2, 3];
		assert!(split(&corpus, 0.0).is_err());
		assert!(split(&corpus, 1.01).is_err());
	}
}
