use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{DEFAULT_DESCRIPTION_COLUMN, DEFAULT_PREFIX_COLUMN, DEFAULT_SUFFIX_COLUMN, DEFAULT_TOP_N};
use crate::core::VocabularyColumns;
use crate::models::EncoderKind;

/// Execution provider for ONNX Runtime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Provider {
	/// CUDA, or CoreML on macOS, falling back to CPU
	#[default]
	Auto,
	/// CPU only
	Cpu,
	/// NVIDIA CUDA GPU
	Cuda,
	/// Apple CoreML (macOS only)
	Coreml,
}

fn parse_top_n(s: &str) -> Result<usize, String> {
	let val: usize = s.parse().map_err(|_| format!("'{}' is not a valid count", s))?;
	if val == 0 {
		Err("top-n must be at least 1".to_string())
	} else {
		Ok(val)
	}
}

fn style(color: AnsiColor) -> Style {
	Style::new().fg_color(Some(Color::Ansi(color)))
}

fn styles() -> Styles {
	Styles::styled()
		.header(style(AnsiColor::Blue).bold())
		.usage(style(AnsiColor::Blue).bold())
		.literal(style(AnsiColor::Blue))
		.placeholder(style(AnsiColor::Yellow))
		.valid(style(AnsiColor::Blue))
		.invalid(style(AnsiColor::Red))
}

#[derive(Parser, Debug)]
#[command(
	name = "codematch",
	author,
	version,
	about = "Semantic matching of clinical phrases to coded vocabularies",
	styles = styles(),
	after_help = format!(
		"{title}
  {bin} {build}    {build_args}        {build_desc}
  {bin} {predict}  {predict_args}   {predict_desc}
  {bin} {inspect}  {inspect_args}                      {inspect_desc}
  {bin} {demo}     {demo_args}                     {demo_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "codematch".bright_blue(),
		build = "build".yellow(),
		build_args = "-i codes.csv -o codes.msgpack",
		build_desc = "Encode and save the vocabulary".dimmed(),
		predict = "predict".yellow(),
		predict_args = "-i codes.csv -e codes.msgpack \"Typhoid fever\"",
		predict_desc = "Rank codes for a phrase".dimmed(),
		inspect = "inspect".yellow(),
		inspect_args = "codes.msgpack",
		inspect_desc = "Show store header".dimmed(),
		demo = "demo".yellow(),
		demo_args = "-i codes.csv",
		demo_desc = "Build, save, reload, predict".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Execution provider: auto, cpu, cuda, coreml
	#[arg(short = 'p', long = "provider", global = true, default_value = "auto")]
	pub provider: Provider,

	/// Text encoder: onnx (sentence model) or hash (offline, no model files)
	#[arg(long = "encoder", global = true, default_value = "onnx")]
	pub encoder: EncoderKind,

	/// Directory containing the ONNX model and tokenizer
	#[arg(long = "model-dir", global = true, value_name = "DIR")]
	pub model_dir: Option<PathBuf>,

	/// Explicit ONNX model file
	#[arg(long = "model", global = true, value_name = "PATH")]
	pub model: Option<PathBuf>,

	/// Explicit tokenizer.json
	#[arg(long = "tokenizer", global = true, value_name = "PATH")]
	pub tokenizer: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

/// Vocabulary CSV and its column names
#[derive(Args, Debug, Clone)]
pub struct VocabularyArgs {
	/// Vocabulary CSV file
	#[arg(short = 'i', long = "vocab", value_name = "CSV")]
	pub vocabulary: PathBuf,

	/// Column holding the code prefix
	#[arg(long = "prefix-col", default_value = DEFAULT_PREFIX_COLUMN)]
	pub prefix_column: String,

	/// Column holding the code suffix
	#[arg(long = "suffix-col", default_value = DEFAULT_SUFFIX_COLUMN)]
	pub suffix_column: String,

	/// Column holding the description text
	#[arg(long = "desc-col", default_value = DEFAULT_DESCRIPTION_COLUMN)]
	pub description_column: String,
}

impl VocabularyArgs {
	pub fn columns(&self) -> VocabularyColumns {
		VocabularyColumns {
			prefix: self.prefix_column.clone(),
			suffix: self.suffix_column.clone(),
			description: self.description_column.clone(),
		}
	}
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Encode a vocabulary and save its embeddings
	Build {
		#[command(flatten)]
		vocab: VocabularyArgs,

		/// Output embedding store
		#[arg(short = 'o', long = "out", value_name = "PATH")]
		output: PathBuf,
	},

	/// Rank vocabulary codes for one or more phrases
	Predict {
		#[command(flatten)]
		vocab: VocabularyArgs,

		/// Saved embedding store (omit to encode the vocabulary in memory)
		#[arg(short = 'e', long = "embeddings", value_name = "PATH")]
		embeddings: Option<PathBuf>,

		/// Phrases to match
		#[arg(value_name = "TEXT")]
		texts: Vec<String>,

		/// Read additional phrases from a file, one per line
		#[arg(short = 'f', long = "file", value_name = "PATH")]
		file: Option<PathBuf>,

		/// Candidates per phrase
		#[arg(short = 'n', long = "top-n", default_value_t = DEFAULT_TOP_N, value_parser = parse_top_n)]
		top_n: usize,

		/// Print results as JSON
		#[arg(long = "json")]
		json: bool,
	},

	/// Show the header of an embedding store
	Inspect {
		/// Embedding store
		#[arg(value_name = "PATH")]
		path: PathBuf,
	},

	/// Build, save, reload and query with sample clinical phrases
	Demo {
		#[command(flatten)]
		vocab: VocabularyArgs,

		/// Where to save the embeddings (defaults next to the vocabulary)
		#[arg(short = 'e', long = "embeddings", value_name = "PATH")]
		embeddings: Option<PathBuf>,

		/// Candidates per phrase
		#[arg(short = 'n', long = "top-n", default_value_t = DEFAULT_TOP_N, value_parser = parse_top_n)]
		top_n: usize,
	},
}
