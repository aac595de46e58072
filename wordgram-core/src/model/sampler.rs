use rand::Rng;

/// Picks one candidate by weighted random sampling.
///
/// The probability of selecting a candidate is proportional to its weight.
///
/// This function performs:
/// - an O(n) scan over the candidates
/// - a cumulative subtraction to select a bucket
///
/// Candidates are never removed: repeated calls over the same slice keep
/// every option available, which is what the rejection-resampling in
/// generation relies on.
///
/// Returns `None` if the slice is empty or the weight total is not
/// strictly positive.
pub(crate) fn weighted_choice<'a, T, R: Rng>(rng: &mut R, candidates: &'a [(T, f64)]) -> Option<&'a T> {
	if candidates.is_empty() {
		return None;
	}

	// Compute the total weight
	let total: f64 = candidates.iter().map(|(_, weight)| weight).sum();
	if total <= 0.0 {
		// A set with no positive weight is as empty as no set at all
		return None;
	}

	// Randomly select a candidate
	let mut r = rng.random_range(0.0..total);

	let mut fallback: Option<&T> = None;
	for (candidate, weight) in candidates {
		if r < *weight {
			return Some(candidate);
		}
		r -= weight;
		fallback = Some(candidate);
	}

	// Fallback: floating-point accumulation can overshoot the last bucket
	fallback
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn empty_set_yields_none() {
		let mut rng = StdRng::seed_from_u64(7);
		let candidates: Vec<(String, f64)> = Vec::new();
		assert!(weighted_choice(&mut rng, &candidates).is_none());
	}

	#[test]
	fn zero_total_yields_none() {
		let mut rng = StdRng::seed_from_u64(7);
		let candidates = vec![("a".to_owned(), 0.0), ("b".to_owned(), 0.0)];
		assert!(weighted_choice(&mut rng, &candidates).is_none());
	}

	#[test]
	fn single_candidate_is_always_picked() {
		let mut rng = StdRng::seed_from_u64(7);
		let candidates = vec![("only".to_owned(), 0.25)];
		for _ in 0..32 {
			assert_eq!(weighted_choice(&mut rng, &candidates), Some(&"only".to_owned()));
		}
	}

	#[test]
	fn samples_come_from_the_candidate_set() {
		let mut rng = StdRng::seed_from_u64(42);
		let candidates = vec![("a".to_owned(), 0.5), ("b".to_owned(), 0.3), ("c".to_owned(), 0.2)];
		for _ in 0..256 {
			let picked = weighted_choice(&mut rng, &candidates).unwrap();
			assert!(candidates.iter().any(|(token, _)| token == picked));
		}
	}

	#[test]
	fn zero_weight_candidate_is_never_picked() {
		let mut rng = StdRng::seed_from_u64(42);
		let candidates = vec![("kept".to_owned(), 1.0), ("dropped".to_owned(), 0.0)];
		for _ in 0..256 {
			assert_eq!(weighted_choice(&mut rng, &candidates), Some(&"kept".to_owned()));
		}
	}
}
