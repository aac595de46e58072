use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Sentinel tokens delimiting and normalizing training sentences.
///
/// A `SentenceMarkers` value carries the three reserved tokens the model
/// relies on:
/// - `begin`: marks the start of a sentence
/// - `end`: marks the end of a sentence
/// - `unknown`: stands in for tokens deemed too rare to model individually
///
/// Markers are injected into the model at construction, which keeps the
/// model self-contained and testable with alternate sentinels.
///
/// # Invariants
/// - All three markers are non-empty
/// - No two markers are equal
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SentenceMarkers {
	begin: String,
	end: String,
	unknown: String,
}

impl Default for SentenceMarkers {
	/// Returns the conventional marker set: `<s>`, `</s>` and `<UNK>`.
	fn default() -> Self {
		Self {
			begin: "<s>".to_owned(),
			end: "</s>".to_owned(),
			unknown: "<UNK>".to_owned(),
		}
	}
}

impl SentenceMarkers {
	/// Creates a marker set from custom sentinel tokens.
	///
	/// # Errors
	/// Returns `ModelError::InvalidMarkers` if any marker is empty or two
	/// markers collide.
	pub fn new(begin: &str, end: &str, unknown: &str) -> Result<Self> {
		if begin.is_empty() || end.is_empty() || unknown.is_empty() {
			return Err(ModelError::InvalidMarkers);
		}
		if begin == end || begin == unknown || end == unknown {
			return Err(ModelError::InvalidMarkers);
		}
		Ok(Self {
			begin: begin.to_owned(),
			end: end.to_owned(),
			unknown: unknown.to_owned(),
		})
	}

	/// The sentence begin marker.
	pub fn begin(&self) -> &str {
		&self.begin
	}

	/// The sentence end marker.
	pub fn end(&self) -> &str {
		&self.end
	}

	/// The unknown-token marker.
	pub fn unknown(&self) -> &str {
		&self.unknown
	}

	/// Whether `token` is one of the two sentence boundary markers.
	///
	/// The unknown marker is not a boundary.
	pub fn is_boundary(&self, token: &str) -> bool {
		token == self.begin || token == self.end
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_markers() {
		let markers = SentenceMarkers::default();
		assert_eq!(markers.begin(), "<s>");
		assert_eq!(markers.end(), "</s>");
		assert_eq!(markers.unknown(), "<UNK>");
	}

	#[test]
	fn custom_markers() {
		let markers = SentenceMarkers::new("[start]", "[stop]", "[oov]").unwrap();
		assert_eq!(markers.begin(), "[start]");
		assert_eq!(markers.end(), "[stop]");
		assert_eq!(markers.unknown(), "[oov]");
	}

	#[test]
	fn empty_marker_is_rejected() {
		assert_eq!(SentenceMarkers::new("", "</s>", "<UNK>"), Err(ModelError::InvalidMarkers));
	}

	#[test]
	fn colliding_markers_are_rejected() {
		assert_eq!(SentenceMarkers::new("<s>", "<s>", "<UNK>"), Err(ModelError::InvalidMarkers));
		assert_eq!(SentenceMarkers::new("<s>", "</s>", "</s>"), Err(ModelError::InvalidMarkers));
	}

	#[test]
	fn boundary_check() {
		let markers = SentenceMarkers::default();
		assert!(markers.is_boundary("<s>"));
		assert!(markers.is_boundary("</s>"));
		assert!(!markers.is_boundary("<UNK>"));
		assert!(!markers.is_boundary("word"));
	}
}
