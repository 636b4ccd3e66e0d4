//! Reference vocabulary: coded entries and the sources they are read from

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_DESCRIPTION_COLUMN, DEFAULT_PREFIX_COLUMN, DEFAULT_SUFFIX_COLUMN};
use crate::error::{MatchError, Result};

/// A single coded concept. The code is derived once when the row is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
	pub code: String,
	pub description: String,
}

/// Raw tabular row as it appears in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyRow {
	pub prefix: String,
	pub suffix: String,
	pub description: String,
}

impl VocabularyRow {
	pub fn new(prefix: impl Into<String>, suffix: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			suffix: suffix.into(),
			description: description.into(),
		}
	}

	pub fn into_entry(self) -> VocabularyEntry {
		VocabularyEntry {
			code: format!("{}.{}", self.prefix, self.suffix),
			description: self.description,
		}
	}
}

/// Anything that can produce the ordered entry list.
///
/// Build and load paths both go through a source, so row order must be
/// stable across calls for persisted embeddings to pair up correctly.
pub trait VocabularySource {
	fn load(&self) -> Result<Vec<VocabularyEntry>>;
}

impl VocabularySource for [VocabularyRow] {
	fn load(&self) -> Result<Vec<VocabularyEntry>> {
		Ok(self.iter().cloned().map(VocabularyRow::into_entry).collect())
	}
}

impl VocabularySource for Vec<VocabularyRow> {
	fn load(&self) -> Result<Vec<VocabularyEntry>> {
		self.as_slice().load()
	}
}

/// Header names of the three columns the loader needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyColumns {
	pub prefix: String,
	pub suffix: String,
	pub description: String,
}

impl Default for VocabularyColumns {
	fn default() -> Self {
		Self {
			prefix: DEFAULT_PREFIX_COLUMN.to_string(),
			suffix: DEFAULT_SUFFIX_COLUMN.to_string(),
			description: DEFAULT_DESCRIPTION_COLUMN.to_string(),
		}
	}
}

/// CSV file with a header row
#[derive(Debug, Clone)]
pub struct CsvVocabulary {
	path: PathBuf,
	columns: VocabularyColumns,
}

impl CsvVocabulary {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			columns: VocabularyColumns::default(),
		}
	}

	pub fn with_columns(mut self, columns: VocabularyColumns) -> Self {
		self.columns = columns;
		self
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn read_rows(&self) -> Result<Vec<VocabularyRow>> {
		let mut reader = csv::ReaderBuilder::new()
			.has_headers(true)
			.from_path(&self.path)
			.map_err(|e| MatchError::Vocabulary(format!("failed to open {}: {}", self.path.display(), e)))?;

		let headers = reader
			.headers()
			.map_err(|e| MatchError::Vocabulary(format!("failed to read header: {}", e)))?
			.clone();

		let column = |name: &str| {
			headers.iter().position(|h| h.trim() == name).ok_or_else(|| {
				MatchError::Vocabulary(format!(
					"column '{}' not found in {}",
					name,
					self.path.display()
				))
			})
		};
		let prefix_idx = column(&self.columns.prefix)?;
		let suffix_idx = column(&self.columns.suffix)?;
		let description_idx = column(&self.columns.description)?;

		let mut rows = Vec::new();
		for (line, record) in reader.records().enumerate() {
			let record = record.map_err(|e| MatchError::Vocabulary(format!("row {}: {}", line + 1, e)))?;
			let field = |idx: usize| {
				record.get(idx).map(str::to_string).ok_or_else(|| {
					MatchError::Vocabulary(format!("row {} is missing column {}", line + 1, idx))
				})
			};

			rows.push(VocabularyRow {
				prefix: field(prefix_idx)?,
				suffix: field(suffix_idx)?,
				description: field(description_idx)?,
			});
		}

		crate::ui::debug(&format!("Read {} vocabulary rows from {}", rows.len(), self.path.display()));
		Ok(rows)
	}
}

impl VocabularySource for CsvVocabulary {
	fn load(&self) -> Result<Vec<VocabularyEntry>> {
		Ok(self.read_rows()?.into_iter().map(VocabularyRow::into_entry).collect())
	}
}
