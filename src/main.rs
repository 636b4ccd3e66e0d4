//! codematch - semantic clinical code matching
//!
//! Builds, persists and queries embedding indexes over coded vocabularies.

use anyhow::Result;
use clap::Parser;

use codematch::cli::{Cli, Command};
use codematch::{commands, config, runtime, ui};

fn main() {
	let cli = Cli::parse();

	if let Err(e) = run(cli) {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn run(cli: Cli) -> Result<()> {
	ui::Log::set_verbose(cli.verbose);
	runtime::set_provider(cli.provider);

	if let Some(dir) = cli.model_dir {
		config::set_model_dir(dir);
	}
	if let Some(model) = cli.model {
		config::set_text_model(model);
	}
	if let Some(tokenizer) = cli.tokenizer {
		config::set_tokenizer(tokenizer);
	}

	match cli.command {
		Command::Build { vocab, output } => commands::build::run(&vocab, &output, cli.encoder),
		Command::Predict {
			vocab,
			embeddings,
			texts,
			file,
			top_n,
			json,
		} => commands::predict::run(
			&vocab,
			embeddings.as_deref(),
			texts,
			file.as_deref(),
			top_n,
			json,
			cli.encoder,
		),
		Command::Inspect { path } => commands::inspect::run(&path),
		Command::Demo {
			vocab,
			embeddings,
			top_n,
		} => commands::demo::run(&vocab, embeddings, top_n, cli.encoder),
	}
}
