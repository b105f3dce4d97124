//! Command-line parsing for the IPO risk scorer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the scoring/calibration code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ipo", version, about = "IPO Risk Scorer (logistic feature model)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score a deal JSON file and print the full risk report.
    Score(ScoreArgs),
    /// Print the raw feature vector for a deal JSON file (no scoring).
    Features(FeaturesArgs),
    /// Fit logistic coefficients from a labeled historical dataset CSV.
    Calibrate(CalibrateArgs),
    /// Generate a synthetic labeled dataset CSV for calibration demos.
    Sample(SampleArgs),
}

/// Options for scoring a single deal.
#[derive(Debug, Parser, Clone)]
pub struct ScoreArgs {
    /// Deal JSON file (an IpoInput object).
    #[arg(value_name = "DEAL_JSON")]
    pub input: PathBuf,

    /// Coefficients JSON file (bare map or `calibrate --export` output).
    /// Defaults to the built-in v1 set.
    #[arg(long)]
    pub coeffs: Option<PathBuf>,

    /// Use the paper-example coefficient set instead of v1.
    #[arg(long, conflicts_with = "coeffs")]
    pub tex: bool,

    /// Prospectus text file; overrides any text embedded in the deal JSON.
    #[arg(long)]
    pub text: Option<PathBuf>,

    /// Model version string to stamp on the result.
    #[arg(long = "model-version")]
    pub model_version: Option<String>,

    /// Skip the attractiveness (100 - risk) metric.
    #[arg(long = "no-attractiveness")]
    pub no_attractiveness: bool,

    /// Export the full result (score, drivers, raw features) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for dumping a raw feature vector.
#[derive(Debug, Parser, Clone)]
pub struct FeaturesArgs {
    /// Deal JSON file (an IpoInput object).
    #[arg(value_name = "DEAL_JSON")]
    pub input: PathBuf,

    /// Prospectus text file; overrides any text embedded in the deal JSON.
    #[arg(long)]
    pub text: Option<PathBuf>,
}

/// Options for coefficient calibration.
#[derive(Debug, Parser, Clone)]
pub struct CalibrateArgs {
    /// Labeled dataset CSV (see `ipo sample` for the schema).
    #[arg(long)]
    pub dataset: PathBuf,

    /// L2 ridge penalty on non-intercept weights.
    #[arg(long, default_value_t = 1.0)]
    pub ridge: f64,

    /// Maximum IRLS iterations.
    #[arg(long = "max-iters", default_value_t = 50)]
    pub max_iters: usize,

    /// Export the fitted coefficients to JSON (reloadable via `score --coeffs`).
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for synthetic dataset generation.
#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Number of synthetic IPOs to generate.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub count: usize,

    /// Random seed (same seed, same dataset).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output CSV path.
    #[arg(long)]
    pub out: PathBuf,
}
