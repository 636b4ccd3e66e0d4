//! Predict command - rank codes for free-text phrases

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::cli::VocabularyArgs;
use crate::core::QueryResult;
use crate::matcher::{Matcher, MatcherOptions};
use crate::models::{self, EncoderKind};
use crate::ui;

#[allow(clippy::too_many_arguments)]
pub fn run(
	vocab: &VocabularyArgs,
	embeddings: Option<&Path>,
	mut texts: Vec<String>,
	file: Option<&Path>,
	top_n: usize,
	json: bool,
	encoder: EncoderKind,
) -> Result<()> {
	if let Some(file) = file {
		texts.extend(read_phrases(file)?);
	}

	if texts.is_empty() {
		ui::warn("No phrases given. Pass TEXT arguments or --file");
		return Ok(());
	}

	let options = MatcherOptions {
		vocabulary: Some(vocab.vocabulary.clone()),
		columns: vocab.columns(),
		embeddings: embeddings.map(Path::to_path_buf),
		load_saved: embeddings.is_some(),
	};

	let load_start = Instant::now();
	let mut matcher = Matcher::open(&options, models::load(encoder)?)
		.context("Failed to prepare matcher")?;
	ui::debug(&format!(
		"Matcher ready in {:.2}s ({} entries)",
		load_start.elapsed().as_secs_f32(),
		matcher.index().len()
	));

	let start = Instant::now();
	let results = matcher.predict(&texts, top_n)?;

	if json {
		println!("{}", serde_json::to_string_pretty(&results)?);
	} else {
		print_results(&results);
		ui::success(&format!(
			"Matched {} phrases in {:.0}ms",
			results.len(),
			start.elapsed().as_millis()
		));
	}

	Ok(())
}

/// Non-empty trimmed lines
fn read_phrases(path: &Path) -> Result<Vec<String>> {
	let content = fs::read_to_string(path)
		.with_context(|| format!("Failed to read {}", path.display()))?;

	Ok(content
		.lines()
		.map(str::trim)
		.filter(|l| !l.is_empty())
		.map(str::to_string)
		.collect())
}

pub fn print_results(results: &[QueryResult]) {
	for result in results {
		ui::header(&format!("Input: {}", result.input));

		for (i, m) in result.matches.iter().enumerate() {
			println!(
				"  {} {} {} {}",
				format!("{:2}.", i + 1).bright_blue().bold(),
				format!("{:<8}", m.code).bright_white().bold(),
				ui::score(m.similarity),
				ui::ellipsize(&m.description, 70).dimmed()
			);
		}
	}
	println!();
}
