//! `ipo-risk` library crate.
//!
//! Computes a normalized risk score (0..100) for an IPO deal from structured
//! deal-term, financial, and categorical inputs, plus optional prospectus
//! text, and explains it as per-feature drivers.
//!
//! The binary (`ipo`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the scoring pipeline is reusable (services, notebooks, batch jobs)
//! - code stays easy to navigate as the project grows
//!
//! Core flow: raw input -> `validate` -> `features` -> `model` -> `RiskResult`.
//! `calib` is the out-of-band collaborator that fits coefficient maps from
//! labeled historical data.

pub mod app;
pub mod calib;
pub mod cli;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod features;
pub mod io;
pub mod math;
pub mod model;
pub mod report;
pub mod validate;
