//! # Vector Index
//!
//! Vocabulary entries paired with their embeddings, searched exhaustively
//! by cosine similarity.

use crate::core::{cosine, Embedding, EmbeddingMatrix, VocabularyEntry};
use crate::error::{MatchError, Result};
use crate::models::{encode_batch, Encoder};

/// `entries[i]` is described by `matrix[i]` for every `i`.
#[derive(Debug, Clone)]
pub struct VectorIndex {
	entries: Vec<VocabularyEntry>,
	matrix: EmbeddingMatrix,
}

impl VectorIndex {
	/// Embed every description in a single batched encoder call.
	pub fn build<E: Encoder + ?Sized>(entries: Vec<VocabularyEntry>, encoder: &mut E) -> Result<Self> {
		if entries.is_empty() {
			return Err(MatchError::EmptyVocabulary);
		}

		let descriptions: Vec<&str> = entries.iter().map(|e| e.description.as_str()).collect();
		let vectors = encode_batch(encoder, &descriptions)?;
		let matrix = EmbeddingMatrix::new(vectors)?;

		Self::from_parts(entries, matrix)
	}

	/// Pair entries with a previously computed matrix, by position.
	pub fn from_parts(entries: Vec<VocabularyEntry>, matrix: EmbeddingMatrix) -> Result<Self> {
		if matrix.len() != entries.len() {
			return Err(MatchError::IndexMismatch {
				stored: matrix.len(),
				entries: entries.len(),
			});
		}
		if entries.is_empty() {
			return Err(MatchError::EmptyVocabulary);
		}

		Ok(Self { entries, matrix })
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn dimension(&self) -> usize {
		self.matrix.dimension()
	}

	pub fn entries(&self) -> &[VocabularyEntry] {
		&self.entries
	}

	pub fn entry(&self, index: usize) -> Option<&VocabularyEntry> {
		self.entries.get(index)
	}

	pub fn matrix(&self) -> &EmbeddingMatrix {
		&self.matrix
	}

	/// Top `top_n` `(index, score)` pairs, best first.
	///
	/// `top_n` is clamped to the index size. Equal scores keep index order.
	pub fn lookup(&self, query: &Embedding, top_n: usize) -> Result<Vec<(usize, f32)>> {
		if top_n == 0 {
			return Err(MatchError::InvalidQuery("top_n must be at least 1".into()));
		}
		if query.dimension() != self.dimension() {
			return Err(MatchError::InvalidQuery(format!(
				"query has {} dimensions, index has {}",
				query.dimension(),
				self.dimension()
			)));
		}

		let mut scored: Vec<(usize, f32)> = self
			.matrix
			.iter()
			.map(|v| cosine(query.as_slice(), v.as_slice()))
			.enumerate()
			.collect();

		// Stable sort keeps ties in index order
		scored.sort_by(|a, b| b.1.total_cmp(&a.1));
		scored.truncate(top_n.min(self.len()));

		Ok(scored)
	}
}
