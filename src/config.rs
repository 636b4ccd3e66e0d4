//! Application configuration and constants

use std::path::PathBuf;
use std::sync::OnceLock;

static CUSTOM_MODEL_DIR: OnceLock<PathBuf> = OnceLock::new();
static CUSTOM_TEXT: OnceLock<PathBuf> = OnceLock::new();
static CUSTOM_TOKENIZER: OnceLock<PathBuf> = OnceLock::new();

pub const MODELS_DIR_ENV: &str = "CODEMATCH_MODELS_DIR";

// === Model Files ===
pub const TEXT_MODEL: &str = "all-MiniLM-L6-v2.onnx";
pub const TOKENIZER: &str = "tokenizer.json";

// === Model Parameters ===
pub const MAX_SEQUENCE_LENGTH: usize = 256;
pub const BATCH_SIZE: usize = 64;
pub const HASH_DIMENSION: usize = 4096;

// === Vocabulary ===
pub const DEFAULT_PREFIX_COLUMN: &str = "Prefix_Header";
pub const DEFAULT_SUFFIX_COLUMN: &str = "Suffix_Header";
pub const DEFAULT_DESCRIPTION_COLUMN: &str = "Description_1";

// === Storage ===
pub const STORE_EXT: &str = "msgpack";
pub const TEMP_SUFFIX: &str = "tmp";

// === Query Defaults ===
pub const DEFAULT_TOP_N: usize = 5;

pub fn set_model_dir(path: PathBuf) {
	let _ = CUSTOM_MODEL_DIR.set(path);
}

pub fn set_text_model(path: PathBuf) {
	let _ = CUSTOM_TEXT.set(path);
}

pub fn set_tokenizer(path: PathBuf) {
	let _ = CUSTOM_TOKENIZER.set(path);
}

/// Models directory: --model-dir, then CODEMATCH_MODELS_DIR, then `models/` next to the executable
pub fn models_dir() -> Option<PathBuf> {
	if let Some(custom) = CUSTOM_MODEL_DIR.get() {
		crate::ui::debug(&format!("Using custom model dir: {}", custom.display()));
		return Some(custom.clone());
	}

	if let Ok(env_path) = std::env::var(MODELS_DIR_ENV) {
		let path = PathBuf::from(&env_path);
		if path.is_dir() {
			crate::ui::debug(&format!("Using {}: {}", MODELS_DIR_ENV, env_path));
			return Some(path);
		}
	}

	if let Ok(exe) = std::env::current_exe() {
		if let Some(dir) = exe.parent() {
			let models = dir.join("models");
			if models.is_dir() {
				crate::ui::debug(&format!("Found models at: {}", models.display()));
				return Some(models);
			}
		}
	}

	None
}

pub fn get_text_model_path() -> Option<PathBuf> {
	if let Some(custom) = CUSTOM_TEXT.get() {
		return Some(custom.clone());
	}
	models_dir().map(|d| d.join(TEXT_MODEL))
}

pub fn get_tokenizer_path() -> Option<PathBuf> {
	if let Some(custom) = CUSTOM_TOKENIZER.get() {
		return Some(custom.clone());
	}
	models_dir().map(|d| d.join(TOKENIZER))
}

/// Model identifier written into embedding stores (file stem of the model)
pub fn model_name() -> String {
	get_text_model_path()
		.as_deref()
		.and_then(|p| p.file_stem())
		.map(|s| s.to_string_lossy().into_owned())
		.unwrap_or_else(|| TEXT_MODEL.trim_end_matches(".onnx").to_string())
}
