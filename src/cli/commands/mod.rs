//! CLI command implementations

pub mod calc;
pub mod completions;
pub mod config;
pub mod form;
pub mod plot;
pub mod sieves;
