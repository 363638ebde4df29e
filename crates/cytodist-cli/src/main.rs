use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cytodist_cli::commands::{cmd_analyze, cmd_init, cmd_inspect};

#[derive(Parser)]
#[command(name = "cytodist")]
#[command(version, about = "Batch segmentation and inter-object distance measurement for fluorescence microscopy images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one analysis over a batch of images and write CSV reports
    Analyze {
        /// Input files or directories
        #[arg(value_name = "INPUTS")]
        inputs: Vec<PathBuf>,

        /// Analysis to run: droplet_area, nucleus_distance,
        /// mitochondria_distance, or microtubule_distance
        #[arg(short, long, value_name = "ANALYSIS")]
        analysis: String,

        /// Output directory for reports
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Configuration file (overrides the cytodist.yml search)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Pixel-to-micrometer conversion factor
        #[arg(long, value_name = "FLOAT")]
        factor: Option<f64>,

        /// Minimum object size in pixels (0 disables size filtering)
        #[arg(long, value_name = "N")]
        min_size: Option<usize>,

        /// Record per-image failures and keep going instead of aborting
        #[arg(long)]
        continue_on_error: bool,

        /// Scan input directories recursively
        #[arg(short, long)]
        recursive: bool,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,

        /// Also write the full results as JSON to this file
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,

        /// Enable verbose output showing per-image progress
        #[arg(short, long)]
        verbose: bool,
    },

    /// Inspect one image: dimensions and per-channel statistics
    Inspect {
        /// Input file
        input: PathBuf,

        /// Print machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Output path (defaults to ./cytodist.yml)
        #[arg(value_name = "FILE")]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            inputs,
            analysis,
            out,
            config,
            factor,
            min_size,
            continue_on_error,
            recursive,
            threads,
            json,
            verbose,
        } => {
            cytodist_core::config::set_verbose(verbose);
            cmd_analyze(
                inputs,
                analysis,
                out,
                config,
                factor,
                min_size,
                continue_on_error,
                recursive,
                threads,
                json,
            )
        }

        Commands::Inspect { input, json } => cmd_inspect(input, json),

        Commands::Init { output, force } => cmd_init(output, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
