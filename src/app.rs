//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the scoring / feature / calibration / sampling pipelines
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::calib::{CalibOptions, fit_coefficients};
use crate::cli::{CalibrateArgs, Command, FeaturesArgs, SampleArgs, ScoreArgs};
use crate::data::generate_sample;
use crate::error::AppError;
use crate::io::dataset::{load_dataset_csv, write_dataset_csv};
use crate::io::export::{CalibrationMeta, write_coefficients_json, write_result_json};

pub mod pipeline;

/// Entry point for the `ipo` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Score(args) => handle_score(args),
        Command::Features(args) => handle_features(args),
        Command::Calibrate(args) => handle_calibrate(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_score(args: ScoreArgs) -> Result<(), AppError> {
    let run = pipeline::run_score(&args)?;

    println!("{}", crate::report::format_risk_report(&run.ipo, &run.result));

    if let Some(path) = &args.export_json {
        write_result_json(path, &run.result)?;
    }

    Ok(())
}

fn handle_features(args: FeaturesArgs) -> Result<(), AppError> {
    let (ipo, features) = pipeline::run_features(&args.input, args.text.as_deref())?;
    println!("{}", crate::report::format_feature_vector(&ipo, &features));
    Ok(())
}

fn handle_calibrate(args: CalibrateArgs) -> Result<(), AppError> {
    let dataset = load_dataset_csv(&args.dataset)?;

    let opts = CalibOptions {
        ridge: args.ridge,
        max_iters: args.max_iters,
        ..CalibOptions::default()
    };
    let coeffs = fit_coefficients(&dataset.ipos, &dataset.targets, &opts)?;

    println!(
        "{}",
        crate::report::format_calibration_report(&dataset, &coeffs)
    );

    if let Some(path) = &args.export {
        let meta = CalibrationMeta {
            observations: dataset.stats.rows_used,
            positives: dataset.stats.label_positive,
            ridge: args.ridge,
        };
        write_coefficients_json(path, &coeffs, &meta)?;
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let sample = generate_sample(args.count, args.seed)?;
    write_dataset_csv(&args.out, &sample.ipos, &sample.targets)?;

    let positives = sample.targets.iter().filter(|&&t| t == 1).count();
    println!(
        "Wrote {} synthetic IPOs ({} high-risk / {} benign) to '{}'.",
        sample.ipos.len(),
        positives,
        sample.ipos.len() - positives,
        args.out.display()
    );

    Ok(())
}
