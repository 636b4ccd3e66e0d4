//! Embedding vectors and cosine similarity

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
	/// Wrap raw encoder output without altering it
	pub fn new(data: Vec<f32>) -> Self {
		Self(data)
	}

	/// Unit-length copy of `data` (zero vectors stay zero)
	pub fn normalized(data: Vec<f32>) -> Self {
		let norm = l2_norm(&data);
		if norm > 0.0 {
			Self(data.into_iter().map(|x| x / norm).collect())
		} else {
			Self(data)
		}
	}

	pub fn as_slice(&self) -> &[f32] {
		&self.0
	}

	pub fn into_inner(self) -> Vec<f32> {
		self.0
	}

	pub fn dimension(&self) -> usize {
		self.0.len()
	}

	pub fn norm(&self) -> f32 {
		l2_norm(&self.0)
	}

	/// No NaN or infinite components
	pub fn is_finite(&self) -> bool {
		self.0.iter().all(|x| x.is_finite())
	}

	/// Cosine similarity in [-1.0, 1.0]
	pub fn similarity(&self, other: &Self) -> f32 {
		cosine(&self.0, &other.0)
	}
}

impl From<Vec<f32>> for Embedding {
	fn from(data: Vec<f32>) -> Self {
		Self::new(data)
	}
}

/// `dot(a, b) / (|a| * |b|)`, or 0.0 when either side has zero norm.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
	let (mut dot, mut aa, mut bb) = (0.0f64, 0.0f64, 0.0f64);
	for (x, y) in a.iter().zip(b.iter()) {
		let (x, y) = (*x as f64, *y as f64);
		dot += x * y;
		aa += x * x;
		bb += y * y;
	}

	if aa == 0.0 || bb == 0.0 {
		return 0.0;
	}

	(dot / (aa.sqrt() * bb.sqrt())).clamp(-1.0, 1.0) as f32
}

fn l2_norm(v: &[f32]) -> f32 {
	v.iter().map(|x| x * x).sum::<f32>().sqrt()
}
