// Integration tests for codematch

use std::fs;
use std::path::Path;

use codematch::{
	Embedding, FnEncoder, HashEncoder, MatchError, Matcher, MatcherOptions, VocabularyRow,
};

fn cholera_typhoid() -> Vec<VocabularyRow> {
	vec![
		VocabularyRow::new("A00", "0", "Cholera due to Vibrio cholerae"),
		VocabularyRow::new("A01", "0", "Typhoid fever"),
	]
}

fn sample_rows() -> Vec<VocabularyRow> {
	vec![
		VocabularyRow::new("A00", "0", "Cholera due to Vibrio cholerae 01, biovar cholerae"),
		VocabularyRow::new("A00", "9", "Cholera, unspecified"),
		VocabularyRow::new("A01", "0", "Typhoid fever"),
		VocabularyRow::new("A01", "2", "Paratyphoid fever B"),
		VocabularyRow::new("J15", "9", "Bacterial pneumonia, unspecified"),
		VocabularyRow::new("J20", "9", "Acute bronchitis, unspecified"),
	]
}

/// One-hot encoder keyed on "marker-<i>" descriptions
fn marker_encoder(dim: usize) -> FnEncoder<impl FnMut(&[&str]) -> codematch::Result<Vec<Embedding>>> {
	FnEncoder::new("marker", move |texts: &[&str]| {
		texts
			.iter()
			.map(|t| -> codematch::Result<Embedding> {
				let i: usize = t
					.trim_start_matches("marker-")
					.parse()
					.map_err(|_| MatchError::Encoder(format!("not a marker: {}", t)))?;
				let mut v = vec![0.0; dim];
				v[i] = 1.0;
				Ok(Embedding::new(v))
			})
			.collect()
	})
}

fn marker_rows(n: usize) -> Vec<VocabularyRow> {
	(0..n)
		.map(|i| VocabularyRow::new(format!("M{:02}", i), i.to_string(), format!("marker-{}", i)))
		.collect()
}

fn write_csv(path: &Path, rows: &[VocabularyRow]) {
	let mut out = String::from("Prefix_Header,Suffix_Header,Description_1\n");
	for row in rows {
		out.push_str(&format!("{},{},\"{}\"\n", row.prefix, row.suffix, row.description));
	}
	fs::write(path, out).unwrap();
}

#[test]
fn cholera_phrase_matches_cholera_code() {
	let mut matcher = Matcher::build_from_vocabulary(&cholera_typhoid(), HashEncoder::default()).unwrap();
	let results = matcher.predict(&["Cholera confirmed"], 2).unwrap();

	let matches = &results[0].matches;
	assert_eq!(matches.len(), 2);
	assert_eq!(matches[0].code, "A00.0");
	assert_eq!(matches[1].code, "A01.0");
	assert!(matches[0].similarity > matches[1].similarity);
}

#[test]
fn vectors_align_with_entries() {
	let n = 7;
	let matcher = Matcher::build_from_vocabulary(&marker_rows(n), marker_encoder(n)).unwrap();
	let index = matcher.index();

	assert_eq!(index.len(), n);
	assert_eq!(index.matrix().len(), index.entries().len());

	for (i, entry) in index.entries().iter().enumerate() {
		assert_eq!(entry.code, format!("M{:02}.{}", i, i));
		let v = index.matrix().get(i).unwrap();
		assert_eq!(v.as_slice()[i], 1.0);

		let hits = index.lookup(v, 1).unwrap();
		assert_eq!(hits[0].0, i);
		assert!((hits[0].1 - 1.0).abs() < 1e-6);
	}
}

#[test]
fn predict_preserves_input_order() {
	let mut matcher = Matcher::build_from_vocabulary(&marker_rows(4), marker_encoder(4)).unwrap();
	let results = matcher.predict(&["marker-3", "marker-0", "marker-2"], 1).unwrap();

	let inputs: Vec<&str> = results.iter().map(|r| r.input.as_str()).collect();
	assert_eq!(inputs, vec!["marker-3", "marker-0", "marker-2"]);

	let best: Vec<&str> = results.iter().map(|r| r.matches[0].code.as_str()).collect();
	assert_eq!(best, vec!["M03.3", "M00.0", "M02.2"]);
}

#[test]
fn predict_encodes_queries_in_one_batch() {
	let mut batches = Vec::new();
	let encoder = FnEncoder::new("recording", |texts: &[&str]| {
		batches.push(texts.len());
		Ok(texts.iter().map(|t| Embedding::new(vec![t.len() as f32, 1.0])).collect())
	});

	let mut matcher = Matcher::build_from_vocabulary(&sample_rows(), encoder).unwrap();
	matcher.predict(&["a", "bb", "ccc", "dddd"], 3).unwrap();
	drop(matcher);

	assert_eq!(batches, vec![6, 4]);
}

#[test]
fn oversized_top_n_is_clamped() {
	let mut matcher = Matcher::build_from_vocabulary(&sample_rows(), HashEncoder::default()).unwrap();
	let results = matcher.predict(&["Typhoid fever, acute"], 50).unwrap();

	let matches = &results[0].matches;
	assert_eq!(matches.len(), 6);
	assert!(matches.windows(2).all(|w| w[0].similarity >= w[1].similarity));
	assert_eq!(matches[0].code, "A01.0");
}

#[test]
fn empty_and_invalid_queries() {
	let mut matcher = Matcher::build_from_vocabulary(&sample_rows(), HashEncoder::default()).unwrap();

	let none: [&str; 0] = [];
	assert!(matcher.predict(&none, 5).unwrap().is_empty());
	assert!(matches!(matcher.predict(&["x"], 0), Err(MatchError::InvalidQuery(_))));
	// top_n is validated before the empty-input shortcut
	assert!(matches!(matcher.predict(&none, 0), Err(MatchError::InvalidQuery(_))));

	// still answers after a rejected call
	assert_eq!(matcher.predict_default(&["Acute bronchitis"]).unwrap()[0].matches.len(), 5);
}

#[test]
fn query_dimension_mismatch_is_invalid_query() {
	let mut calls = 0;
	let encoder = FnEncoder::new("shifting", |texts: &[&str]| {
		calls += 1;
		let dim = if calls == 1 { 3 } else { 4 };
		Ok(texts.iter().map(|_| Embedding::new(vec![1.0; dim])).collect())
	});

	let mut matcher = Matcher::build_from_vocabulary(&sample_rows(), encoder).unwrap();
	assert!(matches!(matcher.predict(&["x"], 1), Err(MatchError::InvalidQuery(_))));
}

#[test]
fn empty_vocabulary_rejected() {
	let rows: Vec<VocabularyRow> = Vec::new();
	let err = Matcher::build_from_vocabulary(&rows, HashEncoder::default()).err().unwrap();
	assert!(matches!(err, MatchError::EmptyVocabulary));
}

#[test]
fn save_then_load_round_trips() {
	let dir = tempfile::tempdir().unwrap();
	let store = dir.path().join("codes.msgpack");
	let rows = sample_rows();

	let mut built = Matcher::build_from_vocabulary(&rows, HashEncoder::default()).unwrap();
	built.save_embeddings(&store).unwrap();

	let mut loaded = Matcher::load_persisted(&rows, &store, HashEncoder::default()).unwrap();

	assert_eq!(loaded.index().entries(), built.index().entries());
	for (a, b) in built.index().matrix().iter().zip(loaded.index().matrix().iter()) {
		assert_eq!(a.dimension(), b.dimension());
		assert!(a.as_slice().iter().zip(b.as_slice()).all(|(x, y)| (x - y).abs() <= 1e-6));
	}

	let phrases = ["Paratyphoid fever B", "Pneumonia, bacterial"];
	assert_eq!(built.predict(&phrases, 3).unwrap(), loaded.predict(&phrases, 3).unwrap());
}

#[test]
fn load_does_not_encode_vocabulary() {
	let dir = tempfile::tempdir().unwrap();
	let store = dir.path().join("markers.msgpack");
	let rows = marker_rows(3);

	Matcher::build_from_vocabulary(&rows, marker_encoder(3))
		.unwrap()
		.save_embeddings(&store)
		.unwrap();

	let mut batches = Vec::new();
	let encoder = FnEncoder::new("marker", |texts: &[&str]| {
		batches.push(texts.len());
		Ok(texts.iter().map(|_| Embedding::new(vec![0.0, 1.0, 0.0])).collect())
	});
	let mut loaded = Matcher::load_persisted(&rows, &store, encoder).unwrap();
	let results = loaded.predict(&["anything"], 1).unwrap();
	drop(loaded);

	assert_eq!(results[0].matches[0].code, "M01.1");
	assert_eq!(batches, vec![1]);
}

#[test]
fn stale_store_is_index_mismatch() {
	let dir = tempfile::tempdir().unwrap();
	let store = dir.path().join("codes.msgpack");
	let rows = sample_rows();

	Matcher::build_from_vocabulary(&rows, HashEncoder::default())
		.unwrap()
		.save_embeddings(&store)
		.unwrap();

	let shorter = rows[..4].to_vec();
	let err = Matcher::load_persisted(&shorter, &store, HashEncoder::default()).err().unwrap();
	assert!(matches!(err, MatchError::IndexMismatch { stored: 6, entries: 4 }));
}

#[test]
fn missing_store_is_storage_error() {
	let dir = tempfile::tempdir().unwrap();
	let err = Matcher::load_persisted(&sample_rows(), &dir.path().join("nope.msgpack"), HashEncoder::default())
		.err()
		.unwrap();
	assert!(matches!(err, MatchError::Storage { .. }));
}

#[test]
fn open_builds_then_loads_from_csv() {
	let dir = tempfile::tempdir().unwrap();
	let csv = dir.path().join("codes.csv");
	let store = dir.path().join("codes.msgpack");
	write_csv(&csv, &sample_rows());

	let build = MatcherOptions {
		vocabulary: Some(csv.clone()),
		..Default::default()
	};
	let built = Matcher::open(&build, HashEncoder::default()).unwrap();
	built.save_embeddings(&store).unwrap();

	let load = MatcherOptions {
		vocabulary: Some(csv),
		embeddings: Some(store),
		load_saved: true,
		..Default::default()
	};
	let mut loaded = Matcher::open(&load, HashEncoder::default()).unwrap();

	assert_eq!(loaded.fingerprint(), built.fingerprint());
	let best = loaded.predict(&["Cholera, unspecified"], 1).unwrap();
	assert_eq!(best[0].matches[0].code, "A00.9");
}

#[test]
fn open_without_inputs_is_configuration_error() {
	let err = Matcher::open(&MatcherOptions::default(), HashEncoder::default()).err().unwrap();
	assert!(matches!(err, MatchError::Configuration(_)));

	let only_store = MatcherOptions {
		embeddings: Some("codes.msgpack".into()),
		load_saved: true,
		..Default::default()
	};
	let err = Matcher::open(&only_store, HashEncoder::default()).err().unwrap();
	assert!(matches!(err, MatchError::Configuration(_)));
}
