use std::collections::HashMap;

/// Counts the occurrences of each token in `tokens`.
///
/// Built once per training pass; replaces repeated full scans of the
/// corpus with O(1) lookups.
pub(crate) fn token_frequencies(tokens: &[String]) -> HashMap<String, usize> {
	let mut frequencies = HashMap::new();
	for token in tokens {
		*frequencies.entry(token.clone()).or_insert(0) += 1;
	}
	frequencies
}

/// Counts the occurrences of each n-gram in `ngrams`.
///
/// The input sequence preserves multiplicity; the returned map is the
/// multiset collapsed into counts.
pub(crate) fn ngram_frequencies(ngrams: &[Vec<String>]) -> HashMap<Vec<String>, usize> {
	let mut frequencies = HashMap::new();
	for ngram in ngrams {
		*frequencies.entry(ngram.clone()).or_insert(0) += 1;
	}
	frequencies
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(raw: &str) -> Vec<String> {
		raw.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn token_counts() {
		let frequencies = token_frequencies(&tokens("a b a c a b"));
		assert_eq!(frequencies["a"], 3);
		assert_eq!(frequencies["b"], 2);
		assert_eq!(frequencies["c"], 1);
		assert_eq!(frequencies.len(), 3);
	}

	#[test]
	fn token_counts_empty_input() {
		assert!(token_frequencies(&[]).is_empty());
	}

	#[test]
	fn ngram_counts_preserve_multiplicity() {
		let corpus = tokens("a b a b");
		let ngrams: Vec<Vec<String>> = corpus.windows(2).map(|w| w.to_vec()).collect();
		let frequencies = ngram_frequencies(&ngrams);
		assert_eq!(frequencies[&tokens("a b")], 2);
		assert_eq!(frequencies[&tokens("b a")], 1);
		assert_eq!(frequencies.len(), 2);
	}
}
