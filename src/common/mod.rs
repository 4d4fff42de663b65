//! Common module - shared utilities

pub mod utils;

pub use utils::*;
