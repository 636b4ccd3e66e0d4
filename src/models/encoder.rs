//! Text encoder abstraction

use crate::core::Embedding;
use crate::error::{MatchError, Result};

/// Batched text → embedding function.
///
/// Implementations must return exactly one embedding per input, in input
/// order, and must be deterministic for a given model.
pub trait Encoder {
	/// Identifier recorded in embedding stores
	fn name(&self) -> &str;

	fn encode(&mut self, texts: &[&str]) -> Result<Vec<Embedding>>;
}

impl<E: Encoder + ?Sized> Encoder for Box<E> {
	fn name(&self) -> &str {
		(**self).name()
	}

	fn encode(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
		(**self).encode(texts)
	}
}

/// Adapts a closure into an [`Encoder`]
pub struct FnEncoder<F> {
	name: String,
	func: F,
}

impl<F> FnEncoder<F>
where
	F: FnMut(&[&str]) -> Result<Vec<Embedding>>,
{
	pub fn new(name: impl Into<String>, func: F) -> Self {
		Self { name: name.into(), func }
	}
}

impl<F> Encoder for FnEncoder<F>
where
	F: FnMut(&[&str]) -> Result<Vec<Embedding>>,
{
	fn name(&self) -> &str {
		&self.name
	}

	fn encode(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
		(self.func)(texts)
	}
}

/// Run one batch and check the encoder kept its side of the contract.
pub fn encode_batch<E: Encoder + ?Sized>(encoder: &mut E, texts: &[&str]) -> Result<Vec<Embedding>> {
	let embeddings = encoder.encode(texts)?;
	if embeddings.len() != texts.len() {
		return Err(MatchError::Encoder(format!(
			"{} returned {} embeddings for {} inputs",
			encoder.name(),
			embeddings.len(),
			texts.len()
		)));
	}
	if let Some(position) = embeddings.iter().position(|e| !e.is_finite()) {
		return Err(MatchError::Encoder(format!(
			"{} produced non-finite values for input {}",
			encoder.name(),
			position
		)));
	}
	Ok(embeddings)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_non_finite_output() {
		let mut enc = FnEncoder::new("broken", |texts: &[&str]| {
			Ok(texts
				.iter()
				.map(|t| if *t == "bad" { vec![f32::NAN, 0.0] } else { vec![1.0, 0.0] })
				.map(Embedding::new)
				.collect())
		});

		let err = encode_batch(&mut enc, &["ok", "bad"]).unwrap_err();
		assert!(matches!(err, MatchError::Encoder(msg) if msg.contains("input 1")));
		assert_eq!(encode_batch(&mut enc, &["ok"]).unwrap().len(), 1);
	}

	#[test]
	fn rejects_wrong_count() {
		let mut enc = FnEncoder::new("short", |_: &[&str]| Ok(Vec::new()));
		assert!(matches!(encode_batch(&mut enc, &["a"]), Err(MatchError::Encoder(_))));
	}
}
