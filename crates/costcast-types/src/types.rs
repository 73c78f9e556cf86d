//! Enumerations shared across the workspace.
//!
//! Every enum serialises in `snake_case` and parses from the same strings,
//! so plain JSON mappings and CLI flags use identical spellings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParamsError;

// ── Driver ──────────────────────────────────────────────────────────────

/// Which quantity an intervention directly targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Driver {
    /// Total cost (level shifts on the per-head rate, cost growth).
    #[default]
    Cost,
    /// Headcount.
    Fte,
    /// A percentage change in total cost, translated into headcount.
    CostTarget,
}

impl Driver {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Fte => "fte",
            Self::CostTarget => "cost_target",
        }
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Driver {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cost" => Ok(Self::Cost),
            "fte" => Ok(Self::Fte),
            "cost_target" => Ok(Self::CostTarget),
            other => Err(ParamsError::UnknownVariant {
                field: "driver",
                value: other.to_string(),
            }),
        }
    }
}

// ── Ramp Shape ──────────────────────────────────────────────────────────

/// How an effect phases in over its onset window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RampShape {
    /// Full effect immediately.
    #[default]
    Step,
    /// Equal increments per month.
    Linear,
    /// Front-loaded ease-in.
    Exp,
}

impl RampShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Linear => "linear",
            Self::Exp => "exp",
        }
    }
}

impl std::fmt::Display for RampShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RampShape {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "step" => Ok(Self::Step),
            "linear" => Ok(Self::Linear),
            "exp" => Ok(Self::Exp),
            other => Err(ParamsError::UnknownVariant {
                field: "shape",
                value: other.to_string(),
            }),
        }
    }
}

// ── Impact Mode ─────────────────────────────────────────────────────────

/// Whether `impact_magnitude` is a one-time level shift or an annualised
/// growth-rate shift.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactMode {
    #[default]
    Level,
    Growth,
}

impl ImpactMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::Growth => "growth",
        }
    }
}

impl std::fmt::Display for ImpactMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImpactMode {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "level" => Ok(Self::Level),
            "growth" => Ok(Self::Growth),
            other => Err(ParamsError::UnknownVariant {
                field: "impact_mode",
                value: other.to_string(),
            }),
        }
    }
}

// ── Severity ────────────────────────────────────────────────────────────

/// Severity tier of a scenario.
///
/// Drives the intent compiler's default magnitudes and widens the
/// validator's projection-multiplier band.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Operational,
    Stress,
    Crisis,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Stress => "stress",
            Self::Crisis => "crisis",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operational" => Ok(Self::Operational),
            "stress" => Ok(Self::Stress),
            "crisis" => Ok(Self::Crisis),
            other => Err(ParamsError::UnknownVariant {
                field: "severity",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_round_trip_through_strings() {
        for d in [Driver::Cost, Driver::Fte, Driver::CostTarget] {
            assert_eq!(d.as_str().parse::<Driver>().unwrap(), d);
        }
        for s in [RampShape::Step, RampShape::Linear, RampShape::Exp] {
            assert_eq!(s.to_string().parse::<RampShape>().unwrap(), s);
        }
    }

    #[test]
    fn unknown_shape_is_an_error() {
        let err = "sigmoid".parse::<RampShape>().unwrap_err();
        assert!(matches!(err, ParamsError::UnknownVariant { field: "shape", .. }));
    }

    #[test]
    fn serde_spelling_matches_display() {
        assert_eq!(serde_json::to_string(&Driver::CostTarget).unwrap(), "\"cost_target\"");
        assert_eq!(serde_json::to_string(&Severity::Crisis).unwrap(), "\"crisis\"");
    }

    #[test]
    fn severity_is_ordered() {
        assert!(Severity::Operational < Severity::Stress);
        assert!(Severity::Stress < Severity::Crisis);
    }
}
