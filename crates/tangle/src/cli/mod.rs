//! CLI command implementations.

mod cycles;
mod display;

pub mod analyze;
