//! Unified logging system
//!
//! Status lines go to stderr so stdout stays clean for results (and JSON).

use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	eprintln!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	eprintln!("{} {}", "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	eprintln!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		eprintln!("{} {}", "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!("\n{}", text.bright_blue().bold());
}

/// Similarity as a colored percentage
pub fn score(similarity: f32) -> String {
	let pct = format!("{:>5.1}%", similarity * 100.0);
	if similarity >= 0.75 {
		pct.bright_green().to_string()
	} else if similarity >= 0.5 {
		pct.yellow().to_string()
	} else {
		pct.dimmed().to_string()
	}
}

/// Truncate long descriptions for one-line display
pub fn ellipsize(text: &str, max_chars: usize) -> String {
	if text.chars().count() <= max_chars {
		return text.to_string();
	}
	let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
	format!("{}...", kept)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ellipsize_respects_char_boundaries() {
		assert_eq!(ellipsize("short", 10), "short");
		assert_eq!(ellipsize("Cholera due to Vibrio cholerae", 10), "Cholera...");
		assert_eq!(ellipsize("ไข้รากสาดน้อย", 5), "ไข...");
	}
}
