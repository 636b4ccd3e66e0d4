//! # codematch
//!
//! Maps free-text clinical phrases to the closest entries of a coded
//! vocabulary (e.g. ICD-10) by cosine similarity over sentence embeddings.
//!
//! ```no_run
//! use codematch::{CsvVocabulary, HashEncoder, Matcher};
//!
//! let source = CsvVocabulary::new("codes.csv");
//! let mut matcher = Matcher::build_from_vocabulary(&source, HashEncoder::default())?;
//! matcher.save_embeddings("codes.msgpack".as_ref())?;
//!
//! for result in matcher.predict(&["Typhoid fever, acute"], 5)? {
//!     println!("{} -> {:?}", result.input, result.best());
//! }
//! # Ok::<(), codematch::MatchError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod index;
pub mod matcher;
pub mod models;
pub mod runtime;
pub mod storage;
pub mod ui;

pub use crate::core::{
	CodeMatch, CsvVocabulary, Embedding, EmbeddingMatrix, QueryResult, VocabularyColumns, VocabularyEntry,
	VocabularyRow, VocabularySource,
};
pub use error::{MatchError, Result};
pub use index::VectorIndex;
pub use matcher::{Matcher, MatcherOptions};
pub use models::{Encoder, EncoderKind, FnEncoder, HashEncoder};
