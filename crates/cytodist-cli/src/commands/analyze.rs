use std::path::PathBuf;

use cytodist_core::batch::run_batch;
use cytodist_core::config::load_config;
use cytodist_core::models::FailurePolicy;
use cytodist_core::report::write_reports;

use crate::parsers::parse_analysis_kind;
use crate::processing::expand_inputs;

/// Execute the analyze command: run one analysis over a batch of images and
/// write CSV reports.
#[allow(clippy::too_many_arguments)]
pub fn cmd_analyze(
    inputs: Vec<PathBuf>,
    analysis: String,
    out: Option<PathBuf>,
    config_path: Option<PathBuf>,
    factor: Option<f64>,
    min_size: Option<usize>,
    continue_on_error: bool,
    recursive: bool,
    threads: Option<usize>,
    json: Option<PathBuf>,
) -> Result<(), String> {
    let kind = parse_analysis_kind(&analysis)?;

    // Load config, then apply CLI overrides on top
    let handle = load_config(config_path.as_deref());
    if cytodist_core::config::is_verbose() {
        match &handle.source {
            Some(source) => eprintln!("[cytodist] Loaded config from {}", source.display()),
            None => eprintln!("[cytodist] Using built-in defaults"),
        }
        for warning in &handle.warnings {
            eprintln!("[cytodist] Config warning: {}", warning);
        }
    }

    let mut config = handle.config.defaults.clone();
    if let Some(factor) = factor {
        config.pixel_to_micron = factor;
    }
    if let Some(min_size) = min_size {
        config.min_object_size = min_size;
    }
    if continue_on_error {
        config.failure_policy = FailurePolicy::Continue;
    }
    config.sanitize();

    // Configure thread pool if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("Using {} threads for parallel processing", num_threads);
    }

    let files = expand_inputs(&inputs, recursive)?;
    println!("Analyzing {} file(s)...\n", files.len());

    let outcome = run_batch(&files, kind, &config).map_err(|e| e.to_string())?;

    let out_dir = out.unwrap_or_else(|| PathBuf::from("."));
    write_reports(&out_dir, &outcome).map_err(|e| e.to_string())?;

    if let Some(json_path) = json {
        let json_str = serde_json::to_string_pretty(&outcome)
            .map_err(|e| format!("Failed to serialize results: {}", e))?;
        std::fs::write(&json_path, json_str)
            .map_err(|e| format!("Failed to write results file: {}", e))?;
        println!("Results saved to: {}", json_path.display());
    }

    println!("\n========================================");
    println!("BATCH ANALYSIS COMPLETE");
    println!("========================================");
    println!("  Analyzed:   {}", outcome.results.len());
    println!("  Failed:     {}", outcome.failures.len());
    println!("  Output dir: {}", out_dir.display());

    if !outcome.failures.is_empty() {
        println!("\nFailures:");
        for failure in &outcome.failures {
            println!("  {}: {}", failure.path.display(), failure.error);
        }
    }

    Ok(())
}
