//! Core module - mix inputs, Bailey calculations, and configuration

pub mod advisory;
pub mod config;
pub mod evaluation;
pub mod gradation;
pub mod inputs;

pub use advisory::{Advisory, Warning};
pub use config::{Config, ConfigError};
pub use evaluation::{compute, CurvePoint, Evaluation};
pub use gradation::{
    AcceptanceVerdict, BaileyRatios, Band, ControlSieves, DomainError, Ratio, RatioOutcome,
    RatioVerdict,
};
pub use inputs::{InputError, MixInputs, Nmps, Passing};
