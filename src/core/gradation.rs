//! Bailey Method gradation calculations
//!
//! Control sieves are fixed fractions of the nominal maximum particle size.
//! The three Bailey ratios are computed from the percent passing at those
//! sieves and checked against fixed acceptance bands.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::core::inputs::{Nmps, Passing};

/// Control sieve factor (PCS = NMPS x 0.22, SCS = PCS x 0.22, ...)
pub const CONTROL_SIEVE_FACTOR: f64 = 0.22;

/// Half sieve factor (HS = NMPS x 0.50)
pub const HALF_SIEVE_FACTOR: f64 = 0.50;

/// Control sieve sizes derived from the NMPS (all mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlSieves {
    /// Nominal maximum particle size
    pub nmps: f64,
    /// Half sieve
    pub hs: f64,
    /// Primary control sieve
    pub pcs: f64,
    /// Secondary control sieve
    pub scs: f64,
    /// Tertiary control sieve
    pub tcs: f64,
}

impl ControlSieves {
    pub fn for_nmps(nmps: Nmps) -> Self {
        let size = nmps.mm();
        let pcs = size * CONTROL_SIEVE_FACTOR;
        let scs = pcs * CONTROL_SIEVE_FACTOR;
        Self {
            nmps: size,
            hs: size * HALF_SIEVE_FACTOR,
            pcs,
            scs,
            tcs: scs * CONTROL_SIEVE_FACTOR,
        }
    }
}

/// The three Bailey ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ratio {
    /// Coarse aggregate ratio
    Ca,
    /// Coarse portion of the fine aggregate
    Fac,
    /// Fine portion of the fine aggregate
    Faf,
}

impl Ratio {
    pub const ALL: [Ratio; 3] = [Ratio::Ca, Ratio::Fac, Ratio::Faf];

    /// Acceptance band for this ratio
    pub fn band(self) -> Band {
        match self {
            Ratio::Ca => Band::new(0.50, 0.65),
            Ratio::Fac | Ratio::Faf => Band::new(0.35, 0.50),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Ratio::Ca => "CA",
            Ratio::Fac => "FAc",
            Ratio::Faf => "FAf",
        }
    }

    /// Compute this ratio from the passing percentages
    pub fn compute(self, passing: &Passing) -> Result<f64, DomainError> {
        let (numerator, denominator) = match self {
            Ratio::Ca => (passing.hs - passing.pcs, 100.0 - passing.hs),
            Ratio::Fac => (passing.scs, passing.pcs),
            Ratio::Faf => (passing.tcs, passing.scs),
        };

        if denominator.abs() < f64::EPSILON {
            return Err(DomainError::DivisionUndefined { ratio: self });
        }

        Ok(numerator / denominator)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive acceptance band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}-{:.2}", self.min, self.max)
    }
}

/// A ratio that cannot be evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Diagnostic, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainError {
    #[error("{ratio} ratio is undefined (division by zero)")]
    #[diagnostic(
        code(bailey::ratio::division_undefined),
        help("check the percent passing values that form the denominator")
    )]
    DivisionUndefined { ratio: Ratio },
}

/// All three ratios, when every one is defined
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaileyRatios {
    pub ca: f64,
    pub fac: f64,
    pub faf: f64,
}

impl BaileyRatios {
    /// Compute all ratios, failing on the first undefined one
    pub fn compute(passing: &Passing) -> Result<Self, DomainError> {
        Ok(Self {
            ca: Ratio::Ca.compute(passing)?,
            fac: Ratio::Fac.compute(passing)?,
            faf: Ratio::Faf.compute(passing)?,
        })
    }

    pub fn get(&self, ratio: Ratio) -> f64 {
        match ratio {
            Ratio::Ca => self.ca,
            Ratio::Fac => self.fac,
            Ratio::Faf => self.faf,
        }
    }
}

/// Result of evaluating one ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RatioOutcome {
    /// Ratio computed; `within` tells whether it sits inside the band
    Value { value: f64, within: bool },
    /// Ratio undefined; always counted as out of bounds
    Undefined { error: DomainError },
}

/// Verdict for a single ratio against its band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioVerdict {
    pub ratio: Ratio,
    pub band: Band,
    #[serde(flatten)]
    pub outcome: RatioOutcome,
}

impl RatioVerdict {
    pub fn evaluate(ratio: Ratio, passing: &Passing) -> Self {
        let band = ratio.band();
        let outcome = match ratio.compute(passing) {
            Ok(value) => RatioOutcome::Value {
                value,
                within: band.contains(value),
            },
            Err(error) => RatioOutcome::Undefined { error },
        };
        Self {
            ratio,
            band,
            outcome,
        }
    }

    /// Computed value, if defined
    pub fn value(&self) -> Option<f64> {
        match self.outcome {
            RatioOutcome::Value { value, .. } => Some(value),
            RatioOutcome::Undefined { .. } => None,
        }
    }

    pub fn within_band(&self) -> bool {
        matches!(self.outcome, RatioOutcome::Value { within: true, .. })
    }

    pub fn result(&self) -> Result<f64, DomainError> {
        match self.outcome {
            RatioOutcome::Value { value, .. } => Ok(value),
            RatioOutcome::Undefined { error } => Err(error),
        }
    }
}

/// Verdicts for all three ratios
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceVerdict {
    pub ca: RatioVerdict,
    pub fac: RatioVerdict,
    pub faf: RatioVerdict,
}

impl AcceptanceVerdict {
    pub fn evaluate(passing: &Passing) -> Self {
        Self {
            ca: RatioVerdict::evaluate(Ratio::Ca, passing),
            fac: RatioVerdict::evaluate(Ratio::Fac, passing),
            faf: RatioVerdict::evaluate(Ratio::Faf, passing),
        }
    }

    pub fn get(&self, ratio: Ratio) -> &RatioVerdict {
        match ratio {
            Ratio::Ca => &self.ca,
            Ratio::Fac => &self.fac,
            Ratio::Faf => &self.faf,
        }
    }

    /// Verdicts in CA, FAc, FAf order
    pub fn iter(&self) -> impl Iterator<Item = &RatioVerdict> {
        [&self.ca, &self.fac, &self.faf].into_iter()
    }

    /// True when every ratio is defined and inside its band
    pub fn all_within(&self) -> bool {
        self.iter().all(RatioVerdict::within_band)
    }

    /// Strict view of the ratios; the first undefined one is the error
    pub fn ratios(&self) -> Result<BaileyRatios, DomainError> {
        Ok(BaileyRatios {
            ca: self.ca.result()?,
            fac: self.fac.result()?,
            faf: self.faf.result()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_control_sieve_factors() {
        for nmps in Nmps::ALL {
            let s = ControlSieves::for_nmps(nmps);
            let n = nmps.mm();
            assert!((s.pcs - 0.22 * n).abs() < TOL);
            assert!((s.hs - 0.50 * n).abs() < TOL);
            assert!((s.scs - 0.0484 * n).abs() < TOL);
            assert!((s.tcs - 0.010648 * n).abs() < TOL);
        }
    }

    #[test]
    fn test_control_sieves_19mm() {
        let s = ControlSieves::for_nmps(Nmps::Mm19);
        assert!((s.nmps - 19.0).abs() < TOL);
        assert!((s.pcs - 4.18).abs() < TOL);
        assert!((s.hs - 9.50).abs() < TOL);
        assert!((s.scs - 0.9196).abs() < TOL);
        assert!((s.tcs - 0.202312).abs() < TOL);
    }

    #[test]
    fn test_default_ratios() {
        let ratios = BaileyRatios::compute(&Passing::default()).unwrap();
        // CA = (65 - 42) / (100 - 65)
        assert!((ratios.ca - 23.0 / 35.0).abs() < TOL);
        assert!((ratios.fac - 18.0 / 42.0).abs() < TOL);
        assert!((ratios.faf - 8.0 / 18.0).abs() < TOL);
    }

    #[test]
    fn test_default_verdicts() {
        let verdicts = AcceptanceVerdict::evaluate(&Passing::default());
        // 0.657 is just above the CA band
        assert!(!verdicts.ca.within_band());
        assert!(verdicts.fac.within_band());
        assert!(verdicts.faf.within_band());
        assert!(!verdicts.all_within());
    }

    #[test]
    fn test_band_is_inclusive() {
        let band = Ratio::Ca.band();
        assert!(band.contains(0.50));
        assert!(band.contains(0.65));
        assert!(!band.contains(0.4999));
        assert!(!band.contains(0.6501));
        assert_eq!(band.to_string(), "0.50-0.65");
        assert_eq!(Ratio::Faf.band(), Band::new(0.35, 0.50));
    }

    #[test]
    fn test_hs_100_is_undefined_ca() {
        let passing = Passing::new(100.0, 42.0, 18.0, 8.0);
        assert_eq!(
            Ratio::Ca.compute(&passing),
            Err(DomainError::DivisionUndefined { ratio: Ratio::Ca })
        );

        let verdicts = AcceptanceVerdict::evaluate(&passing);
        assert_eq!(verdicts.ca.value(), None);
        assert!(!verdicts.ca.within_band());
        // The other ratios are unaffected
        assert!(verdicts.fac.within_band());
        assert!(verdicts.faf.within_band());
        assert!(verdicts.ratios().is_err());
    }

    #[test]
    fn test_zero_pcs_and_scs_are_undefined() {
        let passing = Passing::new(65.0, 0.0, 0.0, 0.0);
        assert!(Ratio::Fac.compute(&passing).is_err());
        assert!(Ratio::Faf.compute(&passing).is_err());
        assert_eq!(
            BaileyRatios::compute(&passing),
            Err(DomainError::DivisionUndefined { ratio: Ratio::Fac })
        );
    }

    #[test]
    fn test_verdict_serialization() {
        let verdicts = AcceptanceVerdict::evaluate(&Passing::new(100.0, 42.0, 18.0, 8.0));
        let json = serde_json::to_value(verdicts).unwrap();
        assert_eq!(json["ca"]["status"], "undefined");
        assert_eq!(json["ca"]["error"]["kind"], "division_undefined");
        assert_eq!(json["ca"]["error"]["ratio"], "ca");
        assert_eq!(json["fac"]["status"], "value");
        assert_eq!(json["fac"]["within"], true);
    }

    #[test]
    fn test_domain_error_message() {
        let err = DomainError::DivisionUndefined { ratio: Ratio::Faf };
        assert_eq!(err.to_string(), "FAf ratio is undefined (division by zero)");
    }
}
