//! Sentence-transformer text model (ONNX) with mean pooling

use anyhow::{anyhow, bail, Context, Result};
use ndarray::{Array1, Array2, ArrayView2, ArrayView3};
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

use crate::config::MAX_SEQUENCE_LENGTH;
use crate::core::Embedding;

pub struct TextModel {
	session: Session,
	tokenizer: Tokenizer,
}

impl TextModel {
	pub fn load(model_path: &Path, tokenizer_path: &Path) -> Result<Self> {
		let session = crate::runtime::create_session(model_path)
			.context("Failed to load text model")?;

		let mut tokenizer = Tokenizer::from_file(tokenizer_path)
			.map_err(|e| anyhow!("Failed to load tokenizer: {}", e))?;

		// Pad to the longest sequence in each batch
		tokenizer.with_padding(Some(PaddingParams::default()));
		tokenizer
			.with_truncation(Some(TruncationParams {
				max_length: MAX_SEQUENCE_LENGTH,
				..Default::default()
			}))
			.map_err(|e| anyhow!("Failed to configure truncation: {}", e))?;

		Ok(Self { session, tokenizer })
	}

	pub fn encode(&mut self, texts: &[&str]) -> Result<Vec<Embedding>> {
		if texts.is_empty() {
			return Ok(Vec::new());
		}

		let encodings = self.tokenizer.encode_batch(texts.to_vec(), true)
			.map_err(|e| anyhow!("Tokenization failed: {}", e))?;

		let batch = encodings.len();
		let seq_len = encodings.iter().map(|e| e.len()).max().unwrap_or(0);

		let mut input_ids = Vec::with_capacity(batch * seq_len);
		let mut attention = Vec::with_capacity(batch * seq_len);
		let mut type_ids = Vec::with_capacity(batch * seq_len);

		for enc in &encodings {
			if enc.len() != seq_len {
				bail!("Tokenizer returned ragged batch ({} vs {} tokens)", enc.len(), seq_len);
			}
			input_ids.extend(enc.get_ids().iter().map(|&x| x as i64));
			attention.extend(enc.get_attention_mask().iter().map(|&x| x as i64));
			type_ids.extend(enc.get_type_ids().iter().map(|&x| x as i64));
		}

		let mask = Array2::from_shape_vec((batch, seq_len), attention.clone())?;
		let shape = vec![batch, seq_len];

		let outputs = self.session.run(ort::inputs![
			"input_ids" => Tensor::from_array((shape.clone(), input_ids))?,
			"attention_mask" => Tensor::from_array((shape.clone(), attention))?,
			"token_type_ids" => Tensor::from_array((shape, type_ids))?,
		])?;

		let hidden = outputs.get("last_hidden_state")
			.context("No last_hidden_state output found")?;

		let (shape, data) = hidden.try_extract_tensor::<f32>()?;
		let dims: Vec<usize> = shape.iter().map(|&x| x as usize).collect();

		match dims.as_slice() {
			[b, t, h] if *b == batch && *t == seq_len => {
				let hidden = ArrayView3::from_shape((*b, *t, *h), data)?;
				Ok(mean_pool(hidden, mask.view()))
			}
			other => bail!("Unexpected hidden state shape {:?}", other),
		}
	}
}

/// Average token states where the attention mask is set, then L2-normalize.
fn mean_pool(hidden: ArrayView3<f32>, mask: ArrayView2<i64>) -> Vec<Embedding> {
	hidden
		.outer_iter()
		.zip(mask.outer_iter())
		.map(|(tokens, keep)| {
			let mut sum = Array1::<f32>::zeros(tokens.ncols());
			let mut count = 0.0f32;

			for (state, &k) in tokens.outer_iter().zip(keep.iter()) {
				if k > 0 {
					sum += &state;
					count += 1.0;
				}
			}

			if count > 0.0 {
				sum /= count;
			}
			Embedding::normalized(sum.to_vec())
		})
		.collect()
}
