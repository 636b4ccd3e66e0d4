//! Core domain types

pub mod embedding;
pub mod hash;
pub mod matrix;
pub mod result;
pub mod vocabulary;

pub use embedding::{cosine, Embedding};
pub use hash::Fingerprint;
pub use matrix::EmbeddingMatrix;
pub use result::{CodeMatch, QueryResult};
pub use vocabulary::{CsvVocabulary, VocabularyColumns, VocabularyEntry, VocabularyRow, VocabularySource};
