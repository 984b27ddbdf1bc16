//! Bailey: aggregate gradation design with the Bailey Method
//!
//! Computes control sieves and the CA / FAc / FAf ratios for an asphalt
//! aggregate blend, checks them against the acceptance bands, and plots
//! the gradation curve.

pub mod cli;
pub mod core;
pub mod plot;
