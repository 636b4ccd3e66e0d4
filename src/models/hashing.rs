//! Feature-hashing encoder
//!
//! Maps lowercase word tokens into a fixed number of signed buckets with
//! xxh3. No model files needed, fully deterministic, and shared vocabulary
//! between phrases still shows up as cosine similarity.

use xxhash_rust::xxh3::xxh3_64;

use crate::config::HASH_DIMENSION;
use crate::core::Embedding;
use crate::error::Result;

use super::Encoder;

#[derive(Debug, Clone)]
pub struct HashEncoder {
	name: String,
	dimension: usize,
}

impl HashEncoder {
	pub fn new(dimension: usize) -> Self {
		let dimension = dimension.max(1);
		Self {
			name: format!("xxh3-hash-{}", dimension),
			dimension,
		}
	}

	pub fn dimension(&self) -> usize {
		self.dimension
	}

	pub fn embed(&self, text: &str) -> Embedding {
		let mut v = vec![0.0f32; self.dimension];

		for token in tokenize(text) {
			let h = xxh3_64(token.as_bytes());
			let bucket = (h % self.dimension as u64) as usize;
			let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
			v[bucket] += sign;
		}

		Embedding::normalized(v)
	}
}

impl Default for HashEncoder {
	fn default() -> Self {
		Self::new(HASH_DIMENSION)
	}
}

impl Encoder for HashEncoder {
	fn name(&self) -> &str {
		&self.name
	}

	fn encode(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
		Ok(texts.iter().map(|t| self.embed(t)).collect())
	}
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
	text.split(|c: char| !c.is_alphanumeric())
		.filter(|t| !t.is_empty())
		.map(str::to_lowercase)
}
