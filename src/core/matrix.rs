//! Row-aligned collection of embeddings with a fixed dimension

use crate::core::Embedding;
use crate::error::{MatchError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
	vectors: Vec<Embedding>,
	dimension: usize,
}

impl EmbeddingMatrix {
	/// Fails if the vectors disagree on their length.
	pub fn new(vectors: Vec<Embedding>) -> Result<Self> {
		let dimension = vectors.first().map(Embedding::dimension).unwrap_or(0);

		if let Some((position, v)) = vectors
			.iter()
			.enumerate()
			.find(|(_, v)| v.dimension() != dimension)
		{
			return Err(MatchError::InconsistentDimension {
				position,
				expected: dimension,
				found: v.dimension(),
			});
		}

		Ok(Self { vectors, dimension })
	}

	pub fn dimension(&self) -> usize {
		self.dimension
	}

	pub fn len(&self) -> usize {
		self.vectors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.vectors.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&Embedding> {
		self.vectors.get(index)
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Embedding> {
		self.vectors.iter()
	}

	pub fn vectors(&self) -> &[Embedding] {
		&self.vectors
	}
}
