//! Inspect command - print an embedding store header

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

use crate::storage;
use crate::ui;

pub fn run(path: &Path) -> Result<()> {
	let header = storage::read_header(path)
		.with_context(|| format!("Failed to read {}", path.display()))?;

	ui::header(&path.display().to_string());
	println!("  {:<12} {}", "version".dimmed(), header.version);
	println!("  {:<12} {}", "model".dimmed(), header.model);
	println!("  {:<12} {}", "entries".dimmed(), header.count);
	println!("  {:<12} {}", "dimension".dimmed(), header.dimension);
	println!("  {:<12} {}", "fingerprint".dimmed(), header.fingerprint);
	println!("  {:<12} {}", "created".dimmed(), header.created.to_rfc3339());

	if !header.is_current_version() {
		ui::warn(&format!(
			"Written by v{}, current is v{}",
			header.version,
			env!("CARGO_PKG_VERSION")
		));
	}

	Ok(())
}
