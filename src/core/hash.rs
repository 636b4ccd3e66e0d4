//! Vocabulary fingerprinting

use xxhash_rust::xxh3::Xxh3;

use crate::core::VocabularyEntry;

/// xxh3 digest over the ordered entry codes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
	pub fn of_entries(entries: &[VocabularyEntry]) -> Self {
		let mut hasher = Xxh3::new();
		for entry in entries {
			hasher.update(entry.code.as_bytes());
			hasher.update(b"\n");
		}
		Self(format!("{:016x}", hasher.digest()))
	}

	pub fn from_hex(hex: impl Into<String>) -> Self {
		Self(hex.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn short(&self) -> &str {
		&self.0[..self.0.len().min(8)]
	}
}

impl std::fmt::Display for Fingerprint {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}
