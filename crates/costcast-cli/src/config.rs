//! CLI configuration
//!
//! ```toml
//! [model]
//! fixed_share = 0.25
//!
//! [guard]
//! horizon_months = 60
//!
//! [compiler]
//! min_ramp_months = 3
//! ```

use costcast_guard::GuardConfig;
use costcast_intent::CompilerConfig;
use costcast_overlay::CostTargetBasis;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

/// Driver-model defaults used when the command line does not say.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Fixed share of cost at t0, for calibration.
    pub fixed_share: f64,
    /// Annual per-head cost inflation.
    pub beta_inflation_per_year: f64,
    /// Starting headcount, for calibration.
    pub reference_fte: f64,
    /// Starting monthly cost for `validate` when no baseline is given.
    pub reference_cost: f64,
    /// Rate a cost target is inverted against when a `beta_multiplier` is
    /// also set. Unsettled; the baseline rate is the default.
    pub cost_target_basis: CostTargetBasis,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            fixed_share: 0.2,
            beta_inflation_per_year: 0.03,
            reference_fte: 800.0,
            reference_cost: 10_000_000.0,
            cost_target_basis: CostTargetBasis::default(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub model: ModelConfig,
    pub guard: GuardConfig,
    pub compiler: CompilerConfig,
}

impl CliConfig {
    /// Load configuration from file; a missing file yields defaults.
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            Ok(CliConfig::default())
        }
    }

    fn from_file(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: CliConfig = toml::from_str(&contents)?;
        config
            .guard
            .check()
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        Ok(config)
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("costcast").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.model.fixed_share, 0.2);
        assert_eq!(config.guard.horizon_months, 120);
    }

    #[test]
    fn test_load_missing_config() {
        let config = CliConfig::load(Some("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: CliConfig = toml::from_str(
            r#"
            [model]
            fixed_share = 0.3
            cost_target_basis = "scenario_state"

            [guard]
            horizon_months = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.model.fixed_share, 0.3);
        assert_eq!(config.model.cost_target_basis, CostTargetBasis::ScenarioState);
        assert_eq!(config.guard.horizon_months, 60);
        assert_eq!(config.compiler, CompilerConfig::default());
    }
}
