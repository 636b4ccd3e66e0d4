//! Build command - encode a vocabulary and save its embeddings

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Instant;

use crate::cli::VocabularyArgs;
use crate::core::CsvVocabulary;
use crate::matcher::Matcher;
use crate::models::{self, EncoderKind};
use crate::ui;

pub fn run(vocab: &VocabularyArgs, output: &Path, encoder: EncoderKind) -> Result<()> {
	let start = Instant::now();

	ui::info(&format!("Reading vocabulary: {}", vocab.vocabulary.display()));
	let source = CsvVocabulary::new(&vocab.vocabulary).with_columns(vocab.columns());

	let encoder = models::load(encoder)?;
	let matcher = Matcher::build_from_vocabulary(&source, encoder)
		.context("Failed to build vector index")?;

	let index = matcher.index();
	ui::success(&format!(
		"Encoded {} entries ({} dims) with {}",
		index.len(),
		index.dimension(),
		matcher.encoder().name()
	));

	matcher
		.save_embeddings(output)
		.context("Failed to save embeddings")?;

	ui::success(&format!(
		"Saved embeddings to {} in {:.1}s",
		output.display(),
		start.elapsed().as_secs_f32()
	));

	Ok(())
}
