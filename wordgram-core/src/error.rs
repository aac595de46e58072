use thiserror::Error;

/// Errors produced by model construction, training and querying.
///
/// Every error surfaces synchronously to the immediate caller; nothing is
/// retried internally. Truncation of a trailing scoring window is defined
/// behavior and does not raise.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
	/// Requested n-gram order is not supported (only 1 and 2 are).
	#[error("unsupported n-gram order {0}, only unigram (1) and bigram (2) models are supported")]
	UnsupportedOrder(usize),

	/// Sentence markers must be non-empty and pairwise distinct.
	#[error("sentence markers must be non-empty and pairwise distinct")]
	InvalidMarkers,

	/// `score` or `generate` was called before `train`.
	#[error("model has not been trained")]
	Untrained,

	/// Generation reached a token with no recorded successors.
	#[error("no recorded successor for token '{0}'")]
	EmptyCandidates(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
