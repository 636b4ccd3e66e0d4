//! Encoder selection and lazy ONNX model loading

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::PathBuf;

use crate::config;
use crate::core::Embedding;
use crate::error::MatchError;

use super::hashing::HashEncoder;
use super::text::TextModel;
use super::Encoder;

/// Which encoder backs the matcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EncoderKind {
	/// Sentence-transformer ONNX model
	#[default]
	Onnx,
	/// Offline feature hashing (no model files)
	Hash,
}

pub fn load(kind: EncoderKind) -> Result<Box<dyn Encoder>> {
	match kind {
		EncoderKind::Onnx => Ok(Box::new(Models::new()?)),
		EncoderKind::Hash => {
			crate::ui::debug(&format!("Using hashing encoder ({} dims)", config::HASH_DIMENSION));
			Ok(Box::new(HashEncoder::default()))
		}
	}
}

/// Resolves model files up front, loads the session on first use
pub struct Models {
	text: Option<TextModel>,
	name: String,
	model_path: PathBuf,
	tokenizer_path: PathBuf,
}

impl Models {
	pub fn new() -> Result<Self> {
		let model_path = config::get_text_model_path().context(format!(
			"Text model not found. Ensure {} exists",
			config::TEXT_MODEL
		))?;
		let tokenizer_path = config::get_tokenizer_path().context(format!(
			"Tokenizer not found. Ensure {} exists",
			config::TOKENIZER
		))?;

		if !model_path.exists() {
			anyhow::bail!("Text model file does not exist: {}", model_path.display());
		}
		if !tokenizer_path.exists() {
			anyhow::bail!(
				"Tokenizer file does not exist: {}",
				tokenizer_path.display()
			);
		}

		Ok(Self {
			text: None,
			name: config::model_name(),
			model_path,
			tokenizer_path,
		})
	}

	fn text_model(&mut self) -> Result<&mut TextModel> {
		if self.text.is_none() {
			crate::ui::debug(&format!("Loading text model: {}", self.model_path.display()));
			self.text = Some(TextModel::load(&self.model_path, &self.tokenizer_path)?);
			crate::ui::success("Text model loaded");
		}

		self.text.as_mut().context("Text model unavailable")
	}
}

impl Encoder for Models {
	fn name(&self) -> &str {
		&self.name
	}

	fn encode(&mut self, texts: &[&str]) -> crate::error::Result<Vec<Embedding>> {
		let model = self.text_model().map_err(|e| MatchError::encoder(format!("{:#}", e)))?;

		let mut out = Vec::with_capacity(texts.len());
		for (i, chunk) in texts.chunks(config::BATCH_SIZE).enumerate() {
			crate::ui::debug(&format!(
				"Encoding batch {}/{}",
				i + 1,
				texts.len().div_ceil(config::BATCH_SIZE)
			));
			let embeddings = model.encode(chunk).map_err(|e| MatchError::encoder(format!("{:#}", e)))?;
			out.extend(embeddings);
		}

		Ok(out)
	}
}
