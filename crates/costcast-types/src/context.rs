use serde::{Deserialize, Serialize};

use crate::error::ContextError;

/// Fixed/variable decomposition of monthly cost.
///
/// `cost = alpha + beta × FTE`, where `alpha` is the fixed monthly component
/// and `beta` the cost per headcount unit at time zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawContext")]
pub struct DriverContext {
    alpha: f64,
    beta: f64,
}

#[derive(Deserialize)]
struct RawContext {
    alpha: f64,
    beta: f64,
}

impl TryFrom<RawContext> for DriverContext {
    type Error = ContextError;

    fn try_from(raw: RawContext) -> Result<Self, Self::Error> {
        Self::new(raw.alpha, raw.beta)
    }
}

impl DriverContext {
    pub fn new(alpha: f64, beta: f64) -> Result<Self, ContextError> {
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(ContextError::InvalidAlpha(alpha));
        }
        if !beta.is_finite() || beta <= 0.0 {
            return Err(ContextError::InvalidBeta(beta));
        }
        Ok(Self { alpha, beta })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_components() {
        assert!(matches!(
            DriverContext::new(-1.0, 10.0),
            Err(ContextError::InvalidAlpha(_))
        ));
        assert!(matches!(
            DriverContext::new(0.0, 0.0),
            Err(ContextError::InvalidBeta(_))
        ));
        assert!(DriverContext::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: DriverContext = serde_json::from_str(r#"{"alpha":2000000,"beta":10000}"#).unwrap();
        assert_eq!(ok.alpha(), 2_000_000.0);
        assert!(serde_json::from_str::<DriverContext>(r#"{"alpha":1,"beta":-2}"#).is_err());
    }
}
