//! Evaluation - the complete result of one gradation run

use serde::Serialize;

use crate::core::advisory::{advisory_gap, collect_warnings, select_advisory, Advisory, Warning};
use crate::core::gradation::{AcceptanceVerdict, BaileyRatios, ControlSieves, DomainError};
use crate::core::inputs::MixInputs;

/// One point of the gradation curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    /// Sieve name (NMPS, HS, PCS, SCS, TCS)
    pub sieve: &'static str,
    /// Sieve opening (mm)
    pub size_mm: f64,
    /// Percent passing
    pub passing: f64,
}

/// Everything derived from a set of mix inputs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub inputs: MixInputs,

    /// Chosen unit weight (kg/m³)
    pub chosen_unit_weight: f64,

    pub sieves: ControlSieves,

    pub verdicts: AcceptanceVerdict,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<Advisory>,

    /// No advisory rule covers the CACUW percentage
    pub advisory_gap: bool,

    pub warnings: Vec<Warning>,

    /// Gradation control points, coarsest first
    pub curve: Vec<CurvePoint>,
}

/// Evaluate a set of mix inputs
///
/// Pure: the result depends only on `inputs`. Undefined ratios are recorded
/// on their verdicts rather than failing the evaluation.
pub fn compute(inputs: &MixInputs) -> Evaluation {
    let sieves = ControlSieves::for_nmps(inputs.nmps);
    let verdicts = AcceptanceVerdict::evaluate(&inputs.passing);
    let warnings = collect_warnings(&verdicts);
    let advisory = select_advisory(inputs.cacuw_percent);

    for verdict in verdicts.iter() {
        match verdict.result() {
            Ok(value) => tracing::debug!(
                ratio = %verdict.ratio,
                value,
                within = verdict.within_band(),
                "ratio evaluated"
            ),
            Err(e) => tracing::info!("{}", e),
        }
    }

    Evaluation {
        inputs: *inputs,
        chosen_unit_weight: inputs.chosen_unit_weight(),
        sieves,
        verdicts,
        advisory,
        advisory_gap: advisory_gap(inputs.cacuw_percent),
        warnings,
        curve: gradation_curve(&sieves, inputs),
    }
}

/// The five control points of the gradation curve
pub fn gradation_curve(sieves: &ControlSieves, inputs: &MixInputs) -> Vec<CurvePoint> {
    let p = &inputs.passing;
    vec![
        CurvePoint { sieve: "NMPS", size_mm: sieves.nmps, passing: 100.0 },
        CurvePoint { sieve: "HS", size_mm: sieves.hs, passing: p.hs },
        CurvePoint { sieve: "PCS", size_mm: sieves.pcs, passing: p.pcs },
        CurvePoint { sieve: "SCS", size_mm: sieves.scs, passing: p.scs },
        CurvePoint { sieve: "TCS", size_mm: sieves.tcs, passing: p.tcs },
    ]
}

impl Evaluation {
    /// Strict view of the ratios
    pub fn ratios(&self) -> Result<BaileyRatios, DomainError> {
        self.verdicts.ratios()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::inputs::{Nmps, Passing};

    #[test]
    fn test_compute_defaults() {
        let eval = compute(&MixInputs::default());

        assert!((eval.sieves.pcs - 4.18).abs() < 1e-9);
        let ratios = eval.ratios().unwrap();
        assert!((ratios.ca - 0.6571).abs() < 1e-4);
        assert!((ratios.fac - 0.4286).abs() < 1e-4);
        assert!((ratios.faf - 0.4444).abs() < 1e-4);
        assert!(!eval.verdicts.ca.within_band());
        assert!(eval.verdicts.fac.within_band());
        assert!(eval.verdicts.faf.within_band());
        assert_eq!(eval.advisory, Some(Advisory::BestPacking));
        assert!(!eval.advisory_gap);
        assert_eq!(eval.warnings, vec![Warning::HardToCompact]);
        assert!((eval.chosen_unit_weight - 1550.0).abs() < 1e-9);
    }

    #[test]
    fn test_compute_is_pure() {
        let inputs = MixInputs {
            nmps: Nmps::Mm12_5,
            cacuw_percent: 92,
            ..MixInputs::default()
        };
        assert_eq!(compute(&inputs), compute(&inputs));
    }

    #[test]
    fn test_gap_case_has_no_advisory() {
        let inputs = MixInputs {
            cacuw_percent: 92,
            ..MixInputs::default()
        };
        let eval = compute(&inputs);
        assert_eq!(eval.advisory, None);
        assert!(eval.advisory_gap);
    }

    #[test]
    fn test_warnings_independent_of_advisory() {
        let inputs = MixInputs {
            cacuw_percent: 85,
            passing: Passing::new(80.0, 40.0, 20.0, 12.0),
            ..MixInputs::default()
        };
        let eval = compute(&inputs);
        assert_eq!(eval.advisory, Some(Advisory::FineGraded));
        assert_eq!(eval.warnings, vec![Warning::HardToCompact, Warning::ExcessDust]);
    }

    #[test]
    fn test_undefined_ca_does_not_fail_evaluation() {
        let inputs = MixInputs {
            passing: Passing::new(100.0, 42.0, 18.0, 8.0),
            ..MixInputs::default()
        };
        let eval = compute(&inputs);
        assert!(eval.ratios().is_err());
        assert_eq!(eval.verdicts.ca.value(), None);
        assert!(eval.verdicts.fac.value().is_some());
        assert_eq!(eval.curve.len(), 5);
    }

    #[test]
    fn test_curve_points() {
        let eval = compute(&MixInputs::default());
        let sieves: Vec<_> = eval.curve.iter().map(|p| p.sieve).collect();
        assert_eq!(sieves, ["NMPS", "HS", "PCS", "SCS", "TCS"]);
        assert_eq!(eval.curve[0].passing, 100.0);
        assert_eq!(eval.curve[1].passing, 65.0);
        assert!((eval.curve[4].size_mm - 0.202312).abs() < 1e-9);
        // Sizes decrease along the curve
        assert!(eval.curve.windows(2).all(|w| w[0].size_mm > w[1].size_mm));
    }

    #[test]
    fn test_evaluation_serializes() {
        let eval = compute(&MixInputs::default());
        let json = serde_json::to_value(&eval).unwrap();
        assert_eq!(json["inputs"]["nmps"], 19.0);
        assert_eq!(json["advisory"], "best_packing");
        assert_eq!(json["warnings"][0], "hard_to_compact");
        assert_eq!(json["curve"][2]["sieve"], "PCS");
    }
}
