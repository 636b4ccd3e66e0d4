//! Execution provider selection
//!
//! Sentence encoders only need one accelerator: CUDA, or CoreML on macOS.
//! Anything unavailable falls back to CPU.

use anyhow::{Context, Result};
use ort::ep::ExecutionProvider;
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use crate::ui;

pub use crate::cli::Provider;

static SELECTED_PROVIDER: OnceLock<Provider> = OnceLock::new();
static PROVIDER_LOGGED: AtomicBool = AtomicBool::new(false);

const INTRA_THREADS: usize = 4;

pub fn set_provider(p: Provider) {
	let _ = SELECTED_PROVIDER.set(p);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accelerator {
	Cuda,
	CoreMl,
}

impl Accelerator {
	fn label(self) -> &'static str {
		match self {
			Accelerator::Cuda => "CUDA",
			Accelerator::CoreMl => "CoreML",
		}
	}
}

/// Accelerators to try, in order, for a provider choice
fn candidates(provider: Provider) -> Vec<Accelerator> {
	match provider {
		Provider::Cpu => Vec::new(),
		Provider::Cuda => vec![Accelerator::Cuda],
		Provider::Coreml => vec![Accelerator::CoreMl],
		Provider::Auto if cfg!(target_os = "macos") => vec![Accelerator::CoreMl],
		Provider::Auto => vec![Accelerator::Cuda],
	}
}

pub fn create_session(model_path: &Path) -> Result<Session> {
	let provider = SELECTED_PROVIDER.get().copied().unwrap_or_default();
	let mut builder = Session::builder().context("Failed to create session builder")?;

	let chosen = candidates(provider)
		.into_iter()
		.find(|acc| register(&mut builder, *acc));

	match (chosen, provider) {
		(Some(acc), _) => announce(&format!("Using {} execution provider", acc.label())),
		(None, Provider::Auto | Provider::Cpu) => announce("Using CPU execution provider"),
		(None, requested) => ui::error(&format!(
			"{:?} requested but unavailable, falling back to CPU",
			requested
		)),
	}

	builder
		.with_optimization_level(GraphOptimizationLevel::Level3)?
		.with_intra_threads(INTRA_THREADS)?
		.commit_from_file(model_path)
		.context("Failed to load model")
}

fn announce(msg: &str) {
	if !PROVIDER_LOGGED.swap(true, Ordering::Relaxed) {
		ui::info(msg);
	}
}

fn register(builder: &mut SessionBuilder, acc: Accelerator) -> bool {
	match acc {
		Accelerator::Cuda => attempt(builder, ort::ep::CUDA::default(), acc),
		#[cfg(target_os = "macos")]
		Accelerator::CoreMl => attempt(builder, ort::ep::CoreML::default(), acc),
		#[cfg(not(target_os = "macos"))]
		Accelerator::CoreMl => {
			ui::debug("CoreML only available on macOS");
			false
		}
	}
}

fn attempt<P: ExecutionProvider>(builder: &mut SessionBuilder, provider: P, acc: Accelerator) -> bool {
	if !provider.is_available().unwrap_or(false) {
		ui::debug(&format!("{} not available", acc.label()));
		return false;
	}

	match provider.register(builder) {
		Ok(_) => true,
		Err(e) => {
			ui::debug(&format!("{} registration failed: {}", acc.label(), e));
			false
		}
	}
}
