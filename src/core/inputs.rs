//! Mix inputs - the user-supplied parameters of one gradation evaluation
//!
//! Inputs are plain values. Range checks mirror the limits a form would
//! clamp to; there is no cross-field validation.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lowest accepted CACUW percentage
pub const CACUW_MIN: u8 = 60;

/// Highest accepted CACUW percentage
pub const CACUW_MAX: u8 = 105;

/// Nominal maximum particle size of the blend (mm)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum Nmps {
    /// 19.0 mm
    #[default]
    Mm19,
    /// 12.5 mm
    Mm12_5,
    /// 9.5 mm
    Mm9_5,
}

impl Nmps {
    /// All supported sizes, largest first
    pub const ALL: [Nmps; 3] = [Nmps::Mm19, Nmps::Mm12_5, Nmps::Mm9_5];

    /// Size in millimetres
    pub fn mm(self) -> f64 {
        match self {
            Nmps::Mm19 => 19.0,
            Nmps::Mm12_5 => 12.5,
            Nmps::Mm9_5 => 9.5,
        }
    }
}

impl fmt::Display for Nmps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.mm())
    }
}

impl TryFrom<f64> for Nmps {
    type Error = InputError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Nmps::ALL
            .into_iter()
            .find(|n| (n.mm() - value).abs() < 1e-9)
            .ok_or(InputError::UnsupportedNmps(value))
    }
}

impl From<Nmps> for f64 {
    fn from(value: Nmps) -> Self {
        value.mm()
    }
}

impl FromStr for Nmps {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .trim_end_matches("mm")
            .trim()
            .parse()
            .map_err(|_| InputError::NotANumber(s.to_string()))?;
        Nmps::try_from(value)
    }
}

/// Percent passing at each control sieve, after blending
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Passing {
    /// % passing the half sieve
    pub hs: f64,
    /// % passing the primary control sieve
    pub pcs: f64,
    /// % passing the secondary control sieve
    pub scs: f64,
    /// % passing the tertiary control sieve
    pub tcs: f64,
}

impl Default for Passing {
    fn default() -> Self {
        Self {
            hs: 65.0,
            pcs: 42.0,
            scs: 18.0,
            tcs: 8.0,
        }
    }
}

impl Passing {
    pub fn new(hs: f64, pcs: f64, scs: f64, tcs: f64) -> Self {
        Self { hs, pcs, scs, tcs }
    }

    /// Named values in sieve order (HS, PCS, SCS, TCS)
    pub fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("hs", self.hs),
            ("pcs", self.pcs),
            ("scs", self.scs),
            ("tcs", self.tcs),
        ]
    }
}

/// All inputs to a single evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixInputs {
    /// Nominal maximum particle size
    pub nmps: Nmps,

    /// Loose unit weight of the coarse aggregate (kg/m³)
    pub loose_unit_weight: f64,

    /// Chosen percentage of the loose unit weight (CACUW %)
    pub cacuw_percent: u8,

    /// Percent passing at the control sieves
    pub passing: Passing,
}

impl Default for MixInputs {
    fn default() -> Self {
        Self {
            nmps: Nmps::default(),
            loose_unit_weight: 1550.0,
            cacuw_percent: 100,
            passing: Passing::default(),
        }
    }
}

impl MixInputs {
    /// Check every field against its accepted range
    pub fn validate(&self) -> Result<(), InputError> {
        check_positive("luw", self.loose_unit_weight)?;
        check_cacuw(self.cacuw_percent)?;
        for (field, value) in self.passing.named() {
            check_percent(field, value)?;
        }
        Ok(())
    }

    /// Chosen unit weight of the coarse aggregate (kg/m³)
    pub fn chosen_unit_weight(&self) -> f64 {
        self.loose_unit_weight * f64::from(self.cacuw_percent) / 100.0
    }
}

/// Reject values outside [0, 100]
pub fn check_percent(field: &str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(InputError::OutOfRange {
            field: field.to_string(),
            value,
            min: 0.0,
            max: 100.0,
        })
    }
}

/// Reject zero, negative, and non-finite values
pub fn check_positive(field: &str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InputError::NonPositive {
            field: field.to_string(),
            value,
        })
    }
}

/// Reject CACUW percentages outside [60, 105]
pub fn check_cacuw(value: u8) -> Result<u8, InputError> {
    if (CACUW_MIN..=CACUW_MAX).contains(&value) {
        Ok(value)
    } else {
        Err(InputError::OutOfRange {
            field: "cacuw".to_string(),
            value: f64::from(value),
            min: f64::from(CACUW_MIN),
            max: f64::from(CACUW_MAX),
        })
    }
}

/// Rejected input values
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum InputError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    #[diagnostic(code(bailey::input::out_of_range))]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be positive, got {value}")]
    #[diagnostic(code(bailey::input::non_positive))]
    NonPositive { field: String, value: f64 },

    #[error("unsupported NMPS {0} mm")]
    #[diagnostic(
        code(bailey::input::unsupported_nmps),
        help("supported sizes are 19.0, 12.5 and 9.5 mm")
    )]
    UnsupportedNmps(f64),

    #[error("'{0}' is not a number")]
    #[diagnostic(code(bailey::input::not_a_number))]
    NotANumber(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form_defaults() {
        let inputs = MixInputs::default();
        assert_eq!(inputs.nmps, Nmps::Mm19);
        assert_eq!(inputs.loose_unit_weight, 1550.0);
        assert_eq!(inputs.cacuw_percent, 100);
        assert_eq!(inputs.passing, Passing::new(65.0, 42.0, 18.0, 8.0));
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_nmps_parse() {
        assert_eq!("19.0".parse::<Nmps>().unwrap(), Nmps::Mm19);
        assert_eq!("19".parse::<Nmps>().unwrap(), Nmps::Mm19);
        assert_eq!("12.5".parse::<Nmps>().unwrap(), Nmps::Mm12_5);
        assert_eq!("9.5mm".parse::<Nmps>().unwrap(), Nmps::Mm9_5);
        assert!(matches!(
            "25".parse::<Nmps>(),
            Err(InputError::UnsupportedNmps(_))
        ));
        assert!(matches!(
            "big".parse::<Nmps>(),
            Err(InputError::NotANumber(_))
        ));
    }

    #[test]
    fn test_nmps_display() {
        assert_eq!(Nmps::Mm19.to_string(), "19.0");
        assert_eq!(Nmps::Mm12_5.to_string(), "12.5");
        assert_eq!(Nmps::Mm9_5.to_string(), "9.5");
    }

    #[test]
    fn test_nmps_serializes_as_number() {
        let yaml = serde_yml::to_string(&Nmps::Mm12_5).unwrap();
        assert_eq!(yaml.trim(), "12.5");
        let parsed: Nmps = serde_yml::from_str("9.5").unwrap();
        assert_eq!(parsed, Nmps::Mm9_5);
        assert!(serde_yml::from_str::<Nmps>("4.75").is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut inputs = MixInputs::default();
        inputs.passing.pcs = 101.0;
        assert!(matches!(
            inputs.validate(),
            Err(InputError::OutOfRange { ref field, .. }) if field == "pcs"
        ));

        let mut inputs = MixInputs::default();
        inputs.cacuw_percent = 59;
        assert!(inputs.validate().is_err());

        let mut inputs = MixInputs::default();
        inputs.loose_unit_weight = 0.0;
        assert!(matches!(
            inputs.validate(),
            Err(InputError::NonPositive { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_bounds() {
        let mut inputs = MixInputs::default();
        inputs.cacuw_percent = CACUW_MIN;
        inputs.passing = Passing::new(100.0, 0.0, 0.0, 0.0);
        assert!(inputs.validate().is_ok());
        inputs.cacuw_percent = CACUW_MAX;
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_chosen_unit_weight() {
        let mut inputs = MixInputs::default();
        assert!((inputs.chosen_unit_weight() - 1550.0).abs() < 1e-9);
        inputs.cacuw_percent = 95;
        assert!((inputs.chosen_unit_weight() - 1472.5).abs() < 1e-9);
    }
}
