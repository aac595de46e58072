use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use super::markers::SentenceMarkers;
use super::{ngram_frequencies, token_frequencies, weighted_choice};

/// Maximum number of tokens generated after the begin marker before a
/// sentence is forcibly terminated.
pub const DEFAULT_SENTENCE_CAP: usize = 10;

/// A word-level n-gram language model.
///
/// The model is constructed with a chosen order (1 for unigram, 2 for
/// bigram), trained once on a flat token stream, then queried any number
/// of times for sequence scores or freshly sampled sentences.
///
/// # Responsibilities
/// - Substitute single-occurrence tokens with the unknown marker and
///   build the vocabulary over the resulting corpus
/// - Count n-grams over the corpus and derive sampling weights
/// - Score token sequences with add-one smoothing
/// - Generate sentences by repeated weighted sampling (Shannon technique)
///
/// # Invariants
/// - `order` is 1 or 2
/// - Every corpus token is a vocabulary member
/// - After `train`, all structures are read-only: `score` and `generate`
///   take `&self`, so a retrain can never overlap a query
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LanguageModel {
	/// The order of the model (number of tokens in an n-gram).
	order: usize,
	/// Sentinel tokens delimiting sentences and replacing rare words.
	markers: SentenceMarkers,
	/// Generated sentence length limit, counted after the begin marker.
	sentence_cap: usize,
	/// Training tokens after unknown-token substitution.
	corpus: Vec<String>,
	/// Distinct tokens of the substituted corpus.
	vocabulary: HashSet<String>,
	/// Contiguous n-token windows over the corpus, multiplicity preserved.
	ngrams: Vec<Vec<String>>,
	/// Occurrences of each token in the corpus.
	token_counts: HashMap<String, usize>,
	/// Occurrences of each distinct n-gram.
	ngram_counts: HashMap<Vec<String>, usize>,
	/// Unsmoothed maximum-likelihood weight per n-gram, used only to
	/// weight generation sampling, never by `score`.
	probabilities: HashMap<Vec<String>, f64>,
	trained: bool,
}

impl LanguageModel {
	/// Creates an untrained model of the given order with the
	/// conventional `<s>` / `</s>` / `<UNK>` markers.
	///
	/// # Errors
	/// Returns `ModelError::UnsupportedOrder` unless `order` is 1 or 2.
	pub fn new(order: usize) -> Result<Self> {
		Self::with_markers(order, SentenceMarkers::default())
	}

	/// Creates an untrained model with custom sentence markers.
	///
	/// # Errors
	/// Returns `ModelError::UnsupportedOrder` unless `order` is 1 or 2.
	pub fn with_markers(order: usize, markers: SentenceMarkers) -> Result<Self> {
		if order == 0 || order > 2 {
			return Err(ModelError::UnsupportedOrder(order));
		}
		Ok(Self {
			order,
			markers,
			sentence_cap: DEFAULT_SENTENCE_CAP,
			corpus: Vec::new(),
			vocabulary: HashSet::new(),
			ngrams: Vec::new(),
			token_counts: HashMap::new(),
			ngram_counts: HashMap::new(),
			probabilities: HashMap::new(),
			trained: false,
		})
	}

	/// Trains the model on a flat token stream.
	///
	/// The stream holds one or more concatenated sentences, each bounded
	/// by the begin and end markers. Any previously trained state is
	/// fully overwritten.
	///
	/// # Behavior
	/// - Tokens occurring exactly once in the input are replaced by the
	///   unknown marker; the begin/end markers are exempt regardless of
	///   their frequency.
	/// - The vocabulary is the set of distinct substituted tokens.
	/// - N-grams are all contiguous windows of length `order`; no padding
	///   beyond what the markers already provide.
	/// - Sampling weights are count(gram) over the corpus count of the
	///   gram's final token.
	pub fn train(&mut self, tokens: Vec<String>) {
		let input_frequencies = token_frequencies(&tokens);

		let corpus: Vec<String> = tokens
			.into_iter()
			.map(|token| {
				let occurrences = input_frequencies.get(&token).copied().unwrap_or(0);
				if occurrences == 1 && !self.markers.is_boundary(&token) {
					self.markers.unknown().to_owned()
				} else {
					token
				}
			})
			.collect();

		let vocabulary: HashSet<String> = corpus.iter().cloned().collect();
		let ngrams: Vec<Vec<String>> = corpus.windows(self.order).map(|window| window.to_vec()).collect();
		let token_counts = token_frequencies(&corpus);
		let ngram_counts = ngram_frequencies(&ngrams);

		let mut probabilities = HashMap::with_capacity(ngram_counts.len());
		for (ngram, &count) in &ngram_counts {
			let Some(tail) = ngram.last() else { continue };
			// The tail of a corpus window is always a corpus token
			let Some(&tail_count) = token_counts.get(tail) else { continue };
			if tail_count == 0 {
				continue;
			}
			probabilities.insert(ngram.clone(), count as f64 / tail_count as f64);
		}

		log::debug!(
			"trained order-{} model: {} corpus tokens, {} vocabulary entries, {} distinct n-grams",
			self.order,
			corpus.len(),
			vocabulary.len(),
			ngram_counts.len()
		);

		self.corpus = corpus;
		self.vocabulary = vocabulary;
		self.ngrams = ngrams;
		self.token_counts = token_counts;
		self.ngram_counts = ngram_counts;
		self.probabilities = probabilities;
		self.trained = true;
	}

	/// Scores a token sequence with add-one (Laplace) smoothing.
	///
	/// The result is the product of per-position smoothed estimates; the
	/// empty product is 1.0. The sequence needs no markers, and a
	/// trailing window too short to complete is silently dropped rather
	/// than raised, so a bigram model scores any sequence shorter than
	/// two tokens as 1.0.
	///
	/// The returned value is a probability-like score: always >= 0, and
	/// strictly positive whenever every factor is (which the smoothing
	/// guarantees on a non-degenerate corpus). It is not normalized.
	///
	/// # Errors
	/// Returns `ModelError::Untrained` if `train` has not run yet.
	pub fn score(&self, sequence: &[String]) -> Result<f64> {
		self.ensure_trained()?;
		if self.order == 1 {
			Ok(self.score_unigram(sequence))
		} else {
			Ok(self.score_bigram(sequence))
		}
	}

	/// Per-pair smoothed estimates over the sequence.
	///
	/// Each pair component absent from the vocabulary is resolved to the
	/// unknown marker before counting.
	fn score_bigram(&self, sequence: &[String]) -> f64 {
		let vocabulary_size = self.vocabulary.len();
		let mut product = 1.0;

		for pair in sequence.windows(2) {
			let first = self.resolve(&pair[0]);
			let second = self.resolve(&pair[1]);
			let bigram = vec![first.to_owned(), second.to_owned()];

			let pair_count = self.ngram_counts.get(&bigram).copied().unwrap_or(0);
			let first_count = self.token_counts.get(first).copied().unwrap_or(0);
			product *= (pair_count + 1) as f64 / (first_count + vocabulary_size) as f64;
		}

		product
	}

	/// Per-token smoothed estimates over the sequence.
	///
	/// A token with no recorded 1-gram borrows the unknown marker's
	/// count for its numerator.
	fn score_unigram(&self, sequence: &[String]) -> f64 {
		let vocabulary_size = self.vocabulary.len();
		let denominator = (self.ngrams.len() + vocabulary_size) as f64;
		let unknown_unigram = vec![self.markers.unknown().to_owned()];
		let unknown_count = self.ngram_counts.get(&unknown_unigram).copied().unwrap_or(0);

		let mut product = 1.0;
		for token in sequence {
			let count = self
				.ngram_counts
				.get(std::slice::from_ref(token))
				.copied()
				.unwrap_or(0);
			let numerator = if count == 0 { unknown_count + 1 } else { count + 1 };
			product *= numerator as f64 / denominator;
		}

		product
	}

	/// Generates one sentence by weighted random sampling.
	///
	/// Uses the thread-local RNG; see [`Self::generate_sentence_with`]
	/// for a seedable variant.
	///
	/// # Errors
	/// - `ModelError::Untrained` if `train` has not run yet.
	/// - `ModelError::EmptyCandidates` if the current token has no
	///   recorded successor to sample from.
	pub fn generate_sentence(&self) -> Result<Vec<String>> {
		self.generate_sentence_with(&mut rand::rng())
	}

	/// Generates one sentence using the provided random source.
	///
	/// The sentence starts with the begin marker. At each step the next
	/// token is sampled from the candidates recorded for the current
	/// last token, weighted by their sampling probabilities:
	/// - bigram mode: final components of every n-gram starting with the
	///   current token, recomputed each step
	/// - unigram mode: every vocabulary token except the begin marker,
	///   computed once before the loop
	///
	/// Sampling the begin marker directly after the begin marker is
	/// rejected and resampled without removing the candidate. Generation
	/// ends when the end marker is produced, or when the sentence
	/// reaches the length cap, in which case the final position is
	/// overwritten with the end marker.
	///
	/// # Errors
	/// - `ModelError::Untrained` if `train` has not run yet.
	/// - `ModelError::EmptyCandidates` if the current token has no
	///   recorded successor to sample from.
	pub fn generate_sentence_with<R: Rng>(&self, rng: &mut R) -> Result<Vec<String>> {
		self.ensure_trained()?;

		let mut sentence = vec![self.markers.begin().to_owned()];
		let mut context = self.markers.begin().to_owned();

		let unigram_candidates = if self.order == 1 {
			self.unigram_candidates()
		} else {
			Vec::new()
		};

		loop {
			let step_candidates;
			let candidates: &[(String, f64)] = if self.order == 1 {
				&unigram_candidates
			} else {
				step_candidates = self.successors(&context);
				&step_candidates
			};

			let mut next = weighted_choice(rng, candidates)
				.ok_or_else(|| ModelError::EmptyCandidates(context.clone()))?;
			while context == self.markers.begin() && next.as_str() == self.markers.begin() {
				next = weighted_choice(rng, candidates)
					.ok_or_else(|| ModelError::EmptyCandidates(context.clone()))?;
			}

			sentence.push(next.clone());

			if next.as_str() == self.markers.end() {
				break;
			}
			if sentence.len() > self.sentence_cap {
				// Cap reached without an end marker: terminate in place
				let last = sentence.len() - 1;
				sentence[last] = self.markers.end().to_owned();
				log::trace!("sentence capped at {} tokens", self.sentence_cap);
				break;
			}

			context = next.clone();
		}

		Ok(sentence)
	}

	/// Generates `count` sentences in call order.
	///
	/// Each sentence is sampled independently against the same trained,
	/// read-only state; the first failure propagates.
	///
	/// # Errors
	/// Same conditions as [`Self::generate_sentence`].
	pub fn generate(&self, count: usize) -> Result<Vec<Vec<String>>> {
		self.ensure_trained()?;
		let mut rng = rand::rng();
		(0..count)
			.map(|_| self.generate_sentence_with(&mut rng))
			.collect()
	}

	/// Candidate successors of `context` with their sampling weights.
	///
	/// Sorted by token so a seeded random source reproduces sentences.
	fn successors(&self, context: &str) -> Vec<(String, f64)> {
		let mut candidates: Vec<(String, f64)> = self
			.probabilities
			.iter()
			.filter(|(ngram, _)| ngram.first().map(String::as_str) == Some(context))
			.filter_map(|(ngram, probability)| ngram.last().map(|token| (token.clone(), *probability)))
			.collect();
		candidates.sort_by(|a, b| a.0.cmp(&b.0));
		candidates
	}

	/// The unigram candidate pool: every vocabulary token except the
	/// begin marker, weighted by its 1-gram sampling probability.
	fn unigram_candidates(&self) -> Vec<(String, f64)> {
		let mut candidates: Vec<(String, f64)> = self
			.vocabulary
			.iter()
			.filter(|token| token.as_str() != self.markers.begin())
			.map(|token| {
				let probability = self
					.probabilities
					.get(std::slice::from_ref(token))
					.copied()
					.unwrap_or(0.0);
				(token.clone(), probability)
			})
			.collect();
		candidates.sort_by(|a, b| a.0.cmp(&b.0));
		candidates
	}

	/// Resolves a token against the vocabulary, falling back to the
	/// unknown marker.
	fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
		if self.vocabulary.contains(token) {
			token
		} else {
			self.markers.unknown()
		}
	}

	fn ensure_trained(&self) -> Result<()> {
		if self.trained {
			Ok(())
		} else {
			Err(ModelError::Untrained)
		}
	}

	/// The model order.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Whether `train` has completed at least once.
	pub fn is_trained(&self) -> bool {
		self.trained
	}

	/// The markers this model was constructed with.
	pub fn markers(&self) -> &SentenceMarkers {
		&self.markers
	}

	/// The substituted training corpus.
	pub fn corpus(&self) -> &[String] {
		&self.corpus
	}

	/// The vocabulary over the substituted corpus.
	pub fn vocabulary(&self) -> &HashSet<String> {
		&self.vocabulary
	}

	/// The ordered n-gram table, multiplicity preserved.
	pub fn ngrams(&self) -> &[Vec<String>] {
		&self.ngrams
	}

	/// The sampling weight recorded for an n-gram, if any.
	pub fn probability(&self, ngram: &[String]) -> Option<f64> {
		self.probabilities.get(ngram).copied()
	}
}
