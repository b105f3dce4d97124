//! The scoring model: a fixed, inspectable linear-logistic combiner.

pub mod logistic;

pub use logistic::*;
