//! # Matcher
//!
//! Owns the vector index and the encoder. A `Matcher` only exists once a
//! build or load has fully succeeded; after that it answers `predict` and
//! can persist its embeddings.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::DEFAULT_TOP_N;
use crate::core::{CodeMatch, CsvVocabulary, Fingerprint, QueryResult, VocabularyColumns, VocabularySource};
use crate::error::{MatchError, Result};
use crate::index::VectorIndex;
use crate::models::{encode_batch, Encoder};
use crate::storage::{self, StoreHeader};
use crate::ui;

/// Construction inputs, mirroring the CLI flags
#[derive(Debug, Clone, Default)]
pub struct MatcherOptions {
	pub vocabulary: Option<PathBuf>,
	pub columns: VocabularyColumns,
	pub embeddings: Option<PathBuf>,
	/// Restore `embeddings` instead of encoding the vocabulary
	pub load_saved: bool,
}

pub struct Matcher<E: Encoder> {
	encoder: E,
	index: VectorIndex,
	fingerprint: Fingerprint,
}

impl<E: Encoder> Matcher<E> {
	/// Load saved embeddings when asked to and a store path is given,
	/// otherwise encode the vocabulary.
	pub fn open(options: &MatcherOptions, encoder: E) -> Result<Self> {
		let csv = |path: &PathBuf| CsvVocabulary::new(path).with_columns(options.columns.clone());

		match (options.load_saved, &options.embeddings, &options.vocabulary) {
			(true, Some(store), Some(vocab)) => Self::load_persisted(&csv(vocab), store, encoder),
			(true, Some(_), None) => Err(MatchError::Configuration(
				"loading saved embeddings also requires the vocabulary they were built from".into(),
			)),
			(_, _, Some(vocab)) => Self::build_from_vocabulary(&csv(vocab), encoder),
			(_, _, None) => Err(MatchError::Configuration(
				"provide a vocabulary, or load_saved with an embeddings path and its vocabulary".into(),
			)),
		}
	}

	/// Encode the whole vocabulary. Run once whenever the vocabulary changes.
	pub fn build_from_vocabulary<S>(source: &S, mut encoder: E) -> Result<Self>
	where
		S: VocabularySource + ?Sized,
	{
		let entries = source.load()?;
		let fingerprint = Fingerprint::of_entries(&entries);

		let start = Instant::now();
		ui::debug(&format!("Encoding {} vocabulary entries with {}", entries.len(), encoder.name()));
		let index = VectorIndex::build(entries, &mut encoder)?;
		ui::debug(&format!(
			"Indexed {} entries ({} dims) in {:.2}s",
			index.len(),
			index.dimension(),
			start.elapsed().as_secs_f32()
		));

		Ok(Self { encoder, index, fingerprint })
	}

	/// Re-read the vocabulary and pair it with stored vectors by position.
	pub fn load_persisted<S>(source: &S, store_path: &Path, encoder: E) -> Result<Self>
	where
		S: VocabularySource + ?Sized,
	{
		let entries = source.load()?;
		let fingerprint = Fingerprint::of_entries(&entries);

		// Cheap count check before pulling in the vectors
		let header = storage::read_header(store_path)?;
		if header.count != entries.len() {
			return Err(MatchError::IndexMismatch {
				stored: header.count,
				entries: entries.len(),
			});
		}

		let (header, matrix) = storage::load(store_path)?;
		check_provenance(&header, &fingerprint, encoder.name());

		let index = VectorIndex::from_parts(entries, matrix)?;
		ui::debug(&format!(
			"Loaded {} embeddings ({} dims) from {}",
			index.len(),
			index.dimension(),
			store_path.display()
		));

		Ok(Self { encoder, index, fingerprint })
	}

	/// Persist the embedding matrix. The vocabulary itself is not written.
	pub fn save_embeddings(&self, path: &Path) -> Result<()> {
		let header = StoreHeader::new(self.encoder.name(), self.index.matrix(), &self.fingerprint);
		storage::save(path, &header, self.index.matrix())?;
		ui::debug(&format!("Saved {} embeddings to {}", header.count, path.display()));
		Ok(())
	}

	/// Rank vocabulary entries for each text, results in input order.
	pub fn predict<S: AsRef<str>>(&mut self, texts: &[S], top_n: usize) -> Result<Vec<QueryResult>> {
		if top_n == 0 {
			return Err(MatchError::InvalidQuery("top_n must be at least 1".into()));
		}
		if texts.is_empty() {
			return Ok(Vec::new());
		}

		let inputs: Vec<&str> = texts.iter().map(AsRef::as_ref).collect();
		let vectors = encode_batch(&mut self.encoder, &inputs)?;

		inputs
			.iter()
			.zip(vectors.iter())
			.map(|(input, vector)| -> Result<QueryResult> {
				let matches = self
					.index
					.lookup(vector, top_n)?
					.into_iter()
					.filter_map(|(i, similarity)| {
						self.index.entry(i).map(|entry| CodeMatch {
							code: entry.code.clone(),
							description: entry.description.clone(),
							similarity,
						})
					})
					.collect();

				Ok(QueryResult {
					input: input.to_string(),
					matches,
				})
			})
			.collect()
	}

	/// `predict` with the default of five candidates per text
	pub fn predict_default<S: AsRef<str>>(&mut self, texts: &[S]) -> Result<Vec<QueryResult>> {
		self.predict(texts, DEFAULT_TOP_N)
	}

	pub fn index(&self) -> &VectorIndex {
		&self.index
	}

	pub fn fingerprint(&self) -> &Fingerprint {
		&self.fingerprint
	}

	pub fn encoder(&self) -> &E {
		&self.encoder
	}
}

/// Same-length stores can still come from a different vocabulary or model.
fn check_provenance(header: &StoreHeader, fingerprint: &Fingerprint, model: &str) {
	if header.fingerprint != fingerprint.as_str() {
		ui::warn(&format!(
			"Embedding store fingerprint {} does not match vocabulary {}; codes may have changed",
			&header.fingerprint,
			fingerprint.short()
		));
	}
	if header.model != model {
		ui::warn(&format!(
			"Embeddings were built with '{}' but queries use '{}'",
			header.model, model
		));
	}
	if !header.is_current_version() {
		ui::debug(&format!("Embedding store written by v{}", header.version));
	}
}
