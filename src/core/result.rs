//! Ranked match output

use serde::Serialize;

/// One candidate code for a query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeMatch {
	pub code: String,
	pub description: String,
	/// Cosine similarity [-1.0, 1.0], higher is better
	pub similarity: f32,
}

/// All candidates for one input phrase, best first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
	pub input: String,
	pub matches: Vec<CodeMatch>,
}

impl QueryResult {
	pub fn best(&self) -> Option<&CodeMatch> {
		self.matches.first()
	}
}
