//! Input/output helpers.
//!
//! - deal / coefficient JSON loading (`input`)
//! - labeled historical-dataset CSV read/write (`dataset`)
//! - result / coefficient JSON exports (`export`)

pub mod dataset;
pub mod export;
pub mod input;

pub use dataset::*;
pub use export::*;
pub use input::*;
