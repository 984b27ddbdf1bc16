//! Advisory messages and ratio warnings
//!
//! The CACUW advisory is an ordered rule table: the first rule whose
//! condition matches wins, and no match means no advisory. Percentages from
//! 90 to 95 (other than 100) fall through every rule. That gap is kept as is
//! and surfaced through [`advisory_gap`].
//!
//! Warnings are independent of the advisory and of each other.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::gradation::AcceptanceVerdict;

/// CA above this value makes the mix hard to compact
pub const CA_WARNING_THRESHOLD: f64 = 0.65;

/// FAf above this value means too much dust
pub const FAF_WARNING_THRESHOLD: f64 = 0.50;

/// Advisory selected from the CACUW percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// CACUW = 100 %
    BestPacking,
    /// CACUW < 90 %
    FineGraded,
    /// CACUW > 95 %
    CoarseGraded,
}

impl Advisory {
    pub fn message(self) -> &'static str {
        match self {
            Advisory::BestPacking => {
                "CACUW = 100% gives the best packing of the coarse aggregate and the lowest VMA."
            }
            Advisory::FineGraded => {
                "Fine-graded mix: the asphalt content may be high."
            }
            Advisory::CoarseGraded => {
                "Coarse-graded mix: high resistance to rutting."
            }
        }
    }

    /// Severity used for presentation
    pub fn level(self) -> Level {
        match self {
            Advisory::BestPacking => Level::Success,
            Advisory::FineGraded => Level::Info,
            Advisory::CoarseGraded => Level::Warning,
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Presentation level of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

/// One row of the advisory table
#[derive(Debug, Clone, Copy)]
pub struct AdvisoryRule {
    /// Human-readable condition, e.g. "== 100"
    pub condition: &'static str,
    pub matches: fn(u8) -> bool,
    pub advisory: Advisory,
}

/// Advisory rules in evaluation order
pub const ADVISORY_RULES: [AdvisoryRule; 3] = [
    AdvisoryRule {
        condition: "== 100",
        matches: |p| p == 100,
        advisory: Advisory::BestPacking,
    },
    AdvisoryRule {
        condition: "< 90",
        matches: |p| p < 90,
        advisory: Advisory::FineGraded,
    },
    AdvisoryRule {
        condition: "> 95",
        matches: |p| p > 95,
        advisory: Advisory::CoarseGraded,
    },
];

/// Select the advisory for a CACUW percentage (first matching rule)
pub fn select_advisory(cacuw_percent: u8) -> Option<Advisory> {
    ADVISORY_RULES
        .iter()
        .find(|rule| (rule.matches)(cacuw_percent))
        .map(|rule| rule.advisory)
}

/// True when no rule covers the percentage (90-95 inclusive)
pub fn advisory_gap(cacuw_percent: u8) -> bool {
    select_advisory(cacuw_percent).is_none()
}

/// Warning raised by an out-of-band ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    /// CA > 0.65
    HardToCompact,
    /// FAf > 0.50
    ExcessDust,
}

impl Warning {
    pub fn message(self) -> &'static str {
        match self {
            Warning::HardToCompact => {
                "CA ratio is too high: the mix may move under the roller and be hard to compact."
            }
            Warning::ExcessDust => {
                "FAf ratio is too high: excess dust may weaken the durability of the mix."
            }
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Collect the warnings for a set of verdicts
///
/// Undefined ratios never raise a warning; they are already reported as
/// out of bounds on their verdict.
pub fn collect_warnings(verdicts: &AcceptanceVerdict) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if verdicts.ca.value().is_some_and(|ca| ca > CA_WARNING_THRESHOLD) {
        warnings.push(Warning::HardToCompact);
    }
    if verdicts.faf.value().is_some_and(|faf| faf > FAF_WARNING_THRESHOLD) {
        warnings.push(Warning::ExcessDust);
    }

    warnings
}
