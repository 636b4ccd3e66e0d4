//! Embedding store file format and I/O
//!
//! A store is two consecutive MessagePack values: a [`StoreHeader`] and the
//! vector list. The header alone can be read without touching the vectors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::TEMP_SUFFIX;
use crate::core::{Embedding, EmbeddingMatrix, Fingerprint};
use crate::error::{MatchError, Result};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreHeader {
	pub version: String,
	/// Encoder that produced the vectors
	pub model: String,
	pub dimension: usize,
	pub count: usize,
	/// Fingerprint of the vocabulary codes the vectors were built from
	pub fingerprint: String,
	pub created: DateTime<Utc>,
}

impl StoreHeader {
	pub fn new(model: &str, matrix: &EmbeddingMatrix, fingerprint: &Fingerprint) -> Self {
		Self {
			version: VERSION.to_string(),
			model: model.to_string(),
			dimension: matrix.dimension(),
			count: matrix.len(),
			fingerprint: fingerprint.as_str().to_string(),
			created: Utc::now(),
		}
	}

	pub fn is_current_version(&self) -> bool {
		self.version == VERSION
	}
}

/// Write header and vectors to `path` via a sibling temp file and rename.
pub fn save(path: &Path, header: &StoreHeader, matrix: &EmbeddingMatrix) -> Result<()> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent).map_err(|e| MatchError::storage(parent, e))?;
	}

	let temp_path = temp_path(path);
	let written = write_store(&temp_path, header, matrix)
		.and_then(|_| fs::rename(&temp_path, path).map_err(|e| MatchError::storage(path, e)));

	if written.is_err() {
		let _ = fs::remove_file(&temp_path);
	}
	written
}

fn write_store(temp_path: &Path, header: &StoreHeader, matrix: &EmbeddingMatrix) -> Result<()> {
	let file = File::create(temp_path).map_err(|e| MatchError::storage(temp_path, e))?;
	let mut writer = BufWriter::new(file);

	rmp_serde::encode::write(&mut writer, header)
		.map_err(|e| MatchError::storage(temp_path, format!("failed to serialize header: {}", e)))?;
	rmp_serde::encode::write(&mut writer, matrix.vectors())
		.map_err(|e| MatchError::storage(temp_path, format!("failed to serialize vectors: {}", e)))?;

	writer.flush().map_err(|e| MatchError::storage(temp_path, e))?;
	writer
		.get_ref()
		.sync_all()
		.map_err(|e| MatchError::storage(temp_path, e))
}

/// Read only the header
pub fn read_header(path: &Path) -> Result<StoreHeader> {
	let file = File::open(path).map_err(|e| MatchError::storage(path, e))?;
	let mut reader = BufReader::new(file);
	decode_header(path, &mut reader)
}

/// Read header and vectors, checking them against each other
pub fn load(path: &Path) -> Result<(StoreHeader, EmbeddingMatrix)> {
	let file = File::open(path).map_err(|e| MatchError::storage(path, e))?;
	let mut reader = BufReader::new(file);

	let header = decode_header(path, &mut reader)?;
	let vectors: Vec<Embedding> = rmp_serde::decode::from_read(&mut reader)
		.map_err(|e| MatchError::storage(path, format!("failed to deserialize vectors: {}", e)))?;

	if vectors.len() != header.count {
		return Err(MatchError::storage(
			path,
			format!("header declares {} vectors, found {}", header.count, vectors.len()),
		));
	}

	if let Some(position) = vectors.iter().position(|v| !v.is_finite()) {
		return Err(MatchError::storage(
			path,
			format!("vector {} has non-finite components", position),
		));
	}

	let matrix = EmbeddingMatrix::new(vectors)
		.map_err(|e| MatchError::storage(path, e))?;

	if !matrix.is_empty() && matrix.dimension() != header.dimension {
		return Err(MatchError::storage(
			path,
			format!("header declares {} dimensions, found {}", header.dimension, matrix.dimension()),
		));
	}

	Ok((header, matrix))
}

fn decode_header(path: &Path, reader: &mut BufReader<File>) -> Result<StoreHeader> {
	rmp_serde::decode::from_read(reader)
		.map_err(|e| MatchError::storage(path, format!("failed to deserialize header: {}", e)))
}

fn temp_path(path: &Path) -> PathBuf {
	let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
	name.push(".");
	name.push(TEMP_SUFFIX);
	path.with_file_name(name)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn matrix() -> EmbeddingMatrix {
		EmbeddingMatrix::new(vec![
			Embedding::new(vec![0.1, -0.25, 1.0e-7]),
			Embedding::new(vec![f32::MAX, 0.0, -3.5]),
		])
		.unwrap()
	}

	#[test]
	fn round_trip_is_exact() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("codes.msgpack");
		let m = matrix();
		let header = StoreHeader::new("test-model", &m, &Fingerprint::from_hex("00ff"));

		save(&path, &header, &m).unwrap();
		let (loaded_header, loaded) = load(&path).unwrap();

		assert_eq!(loaded_header, header);
		assert_eq!(loaded, m);
		assert!(!temp_path(&path).exists());
	}

	#[test]
	fn header_readable_alone() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("codes.msgpack");
		let m = matrix();

		save(&path, &StoreHeader::new("m", &m, &Fingerprint::from_hex("ab")), &m).unwrap();
		let header = read_header(&path).unwrap();

		assert_eq!(header.count, 2);
		assert_eq!(header.dimension, 3);
		assert!(header.is_current_version());
	}

	#[test]
	fn count_disagreement_is_storage_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("codes.msgpack");
		let m = matrix();
		let mut header = StoreHeader::new("m", &m, &Fingerprint::from_hex("ab"));
		header.count = 5;

		save(&path, &header, &m).unwrap();
		assert!(matches!(load(&path), Err(MatchError::Storage { .. })));
	}

	#[test]
	fn non_finite_vector_is_storage_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("codes.msgpack");
		let m = EmbeddingMatrix::new(vec![
			Embedding::new(vec![1.0, 0.0]),
			Embedding::new(vec![f32::NAN, 1.0]),
		])
		.unwrap();

		save(&path, &StoreHeader::new("m", &m, &Fingerprint::from_hex("ab")), &m).unwrap();
		match load(&path) {
			Err(MatchError::Storage { message, .. }) => assert!(message.contains("vector 1")),
			other => panic!("unexpected result: {:?}", other.map(|(h, _)| h)),
		}
	}

	#[test]
	fn garbage_is_storage_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("codes.msgpack");
		fs::write(&path, b"not a store").unwrap();

		assert!(matches!(load(&path), Err(MatchError::Storage { .. })));
		assert!(matches!(read_header(&dir.path().join("missing")), Err(MatchError::Storage { .. })));
	}

	#[test]
	fn failed_write_leaves_no_file() {
		let dir = tempfile::tempdir().unwrap();
		// target is an existing directory, so the rename fails
		let path = dir.path().join("occupied");
		fs::create_dir(&path).unwrap();
		fs::write(path.join("keep"), b"x").unwrap();
		let m = matrix();

		let err = save(&path, &StoreHeader::new("m", &m, &Fingerprint::from_hex("ab")), &m);
		assert!(matches!(err, Err(MatchError::Storage { .. })));
		assert!(!temp_path(&path).exists());
	}
}
