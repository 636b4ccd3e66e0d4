//! Demo command - the full build, save, reload, predict walkthrough

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::cli::VocabularyArgs;
use crate::config::STORE_EXT;
use crate::core::CsvVocabulary;
use crate::matcher::Matcher;
use crate::models::{self, EncoderKind};
use crate::ui;

use super::predict::print_results;

/// Short diagnoses, clinical narratives, co-morbidities and vague presentations
pub const SAMPLE_PHRASES: &[&str] = &[
	"Cholera confirmed",
	"Typhoid fever, acute",
	"Paratyphoid fever B",
	"Pneumonia, bacterial",
	"Acute bronchitis",
	"Patient presents with severe dehydration due to cholera infection",
	"High fever and cough, diagnosed as typhoid pneumonia",
	"Symptoms indicate paratyphoid fever B with abdominal pain and headache",
	"Persistent cough and chest discomfort, suspect acute bronchitis",
	"Bacterial pneumonia with pleural effusion confirmed by x-ray",
	"Co-infection: typhoid fever and pneumonia, under treatment",
	"History of cholera, currently with acute bronchitis symptoms",
	"Fever with respiratory distress, unknown etiology",
	"Suspected gastrointestinal infection, awaiting lab results",
];

pub fn run(vocab: &VocabularyArgs, embeddings: Option<PathBuf>, top_n: usize, encoder: EncoderKind) -> Result<()> {
	let store = embeddings.unwrap_or_else(|| vocab.vocabulary.with_extension(STORE_EXT));
	let source = CsvVocabulary::new(&vocab.vocabulary).with_columns(vocab.columns());

	ui::info("Building embeddings from vocabulary...");
	let built = Matcher::build_from_vocabulary(&source, models::load(encoder)?)
		.context("Failed to build vector index")?;
	built
		.save_embeddings(&store)
		.context("Failed to save embeddings")?;
	ui::success(&format!("Embeddings saved to {}", store.display()));

	ui::info("Reloading saved embeddings...");
	let mut matcher = Matcher::load_persisted(&source, &store, models::load(encoder)?)
		.context("Failed to load saved embeddings")?;
	ui::success(&format!("Loaded {} entries", matcher.index().len()));

	let results = matcher.predict(SAMPLE_PHRASES, top_n)?;
	print_results(&results);

	Ok(())
}
