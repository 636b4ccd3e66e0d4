//! Error taxonomy for the matcher library

use std::path::Path;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatchError>;

#[derive(Debug, Error)]
pub enum MatchError {
	/// Neither a saved index nor a vocabulary source was supplied
	#[error("configuration error: {0}")]
	Configuration(String),

	#[error("vocabulary is empty, nothing to index")]
	EmptyVocabulary,

	/// Persisted embeddings were produced from a different vocabulary
	#[error("embedding store holds {stored} vectors but the vocabulary has {entries} entries")]
	IndexMismatch { stored: usize, entries: usize },

	#[error("invalid query: {0}")]
	InvalidQuery(String),

	#[error("vector {position} has {found} dimensions, expected {expected}")]
	InconsistentDimension {
		position: usize,
		expected: usize,
		found: usize,
	},

	#[error("storage error at {path}: {message}")]
	Storage { path: String, message: String },

	#[error("vocabulary error: {0}")]
	Vocabulary(String),

	#[error("encoder error: {0}")]
	Encoder(String),
}

impl MatchError {
	pub fn storage(path: &Path, message: impl std::fmt::Display) -> Self {
		Self::Storage {
			path: path.display().to_string(),
			message: message.to_string(),
		}
	}

	pub fn encoder(err: impl std::fmt::Display) -> Self {
		Self::Encoder(err.to_string())
	}
}
