//! Command line interface module
//!
//! Argument parsing and the runner that turns parsed arguments into a single
//! collection manager call.

pub mod args;
pub mod runner;

pub use args::{Args, Command};
pub use runner::Runner;
