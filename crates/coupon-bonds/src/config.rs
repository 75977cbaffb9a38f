//! Valuation configuration.
//!
//! Solver settings shared by the yield and effective-interest-rate
//! inversions. Every field has a serde default, so a JSON document only
//! needs the fields it overrides.

use std::path::Path;

use coupon_math::solvers::{
    SolverConfig, NEWTON_MAX_ITERATIONS, NEWTON_STEP, PEGASUS_ACCURACY, PEGASUS_MAX_EVALUATIONS,
};
use serde::{Deserialize, Serialize};

use crate::error::{BondError, BondResult};

// =============================================================================
// VALUATION CONFIGURATION
// =============================================================================

/// Solver and price-convention settings for valuation calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// Starting point of the Newton yield search.
    #[serde(default = "default_yield_guess")]
    pub yield_guess: f64,

    /// Newton step, also the convergence threshold on successive iterates.
    #[serde(default = "default_newton_step")]
    pub newton_step: f64,

    /// Newton iteration cap.
    #[serde(default = "default_newton_max_iterations")]
    pub newton_max_iterations: u32,

    /// Absolute accuracy of the effective interest rate search.
    #[serde(default = "default_eir_accuracy")]
    pub eir_accuracy: f64,

    /// Function-evaluation cap of the effective interest rate search.
    #[serde(default = "default_eir_max_evaluations")]
    pub eir_max_evaluations: u32,

    /// Whether yields are solved against clean prices.
    #[serde(default = "default_clean")]
    pub clean: bool,
}

fn default_yield_guess() -> f64 {
    0.10
}

fn default_newton_step() -> f64 {
    NEWTON_STEP
}

fn default_newton_max_iterations() -> u32 {
    NEWTON_MAX_ITERATIONS
}

fn default_eir_accuracy() -> f64 {
    PEGASUS_ACCURACY
}

fn default_eir_max_evaluations() -> u32 {
    PEGASUS_MAX_EVALUATIONS
}

fn default_clean() -> bool {
    true
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            yield_guess: default_yield_guess(),
            newton_step: default_newton_step(),
            newton_max_iterations: default_newton_max_iterations(),
            eir_accuracy: default_eir_accuracy(),
            eir_max_evaluations: default_eir_max_evaluations(),
            clean: default_clean(),
        }
    }
}

impl ValuationConfig {
    /// Parses a configuration from JSON and validates it.
    ///
    /// # Errors
    ///
    /// Returns `BondError::Config` for malformed JSON or a setting that
    /// [`validate`](Self::validate) rejects.
    pub fn from_json(json: &str) -> BondResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BondError::config(format!("malformed JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file and validates it.
    ///
    /// # Errors
    ///
    /// Returns `BondError::Config` when the file cannot be read or
    /// [`from_json`](Self::from_json) rejects its contents.
    pub fn from_file(path: impl AsRef<Path>) -> BondResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| BondError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Rejects non-positive tolerances and caps.
    ///
    /// # Errors
    ///
    /// Returns `BondError::Config` naming the first invalid setting.
    pub fn validate(&self) -> BondResult<()> {
        if !(self.newton_step > 0.0) {
            return Err(BondError::config("newton_step must be positive"));
        }
        if self.newton_max_iterations == 0 {
            return Err(BondError::config("newton_max_iterations must be positive"));
        }
        if !(self.eir_accuracy > 0.0) {
            return Err(BondError::config("eir_accuracy must be positive"));
        }
        if self.eir_max_evaluations < 2 {
            return Err(BondError::config(
                "eir_max_evaluations must cover both bracket ends",
            ));
        }
        if !self.yield_guess.is_finite() {
            return Err(BondError::config("yield_guess must be finite"));
        }
        Ok(())
    }

    /// Sets the Newton starting yield.
    pub fn with_yield_guess(mut self, guess: f64) -> Self {
        self.yield_guess = guess;
        self
    }

    /// Sets the Newton step.
    pub fn with_newton_step(mut self, step: f64) -> Self {
        self.newton_step = step;
        self
    }

    /// Sets the Newton iteration cap.
    pub fn with_newton_max_iterations(mut self, max_iterations: u32) -> Self {
        self.newton_max_iterations = max_iterations;
        self
    }

    /// Sets the effective interest rate accuracy.
    pub fn with_eir_accuracy(mut self, accuracy: f64) -> Self {
        self.eir_accuracy = accuracy;
        self
    }

    /// Sets the effective interest rate evaluation cap.
    pub fn with_eir_max_evaluations(mut self, max_evaluations: u32) -> Self {
        self.eir_max_evaluations = max_evaluations;
        self
    }

    /// Sets the price convention used when solving for yield.
    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    /// Newton solver settings.
    pub fn newton_config(&self) -> SolverConfig {
        SolverConfig::new(self.newton_step, self.newton_max_iterations)
    }

    /// Pegasus solver settings.
    pub fn eir_config(&self) -> SolverConfig {
        SolverConfig::new(self.eir_accuracy, self.eir_max_evaluations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ValuationConfig::default();
        assert_eq!(config.yield_guess, 0.10);
        assert_eq!(config.newton_step, 1e-6);
        assert_eq!(config.newton_max_iterations, 10_000);
        assert_eq!(config.eir_accuracy, 1e-8);
        assert_eq!(config.eir_max_evaluations, 10_000);
        assert!(config.clean);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ValuationConfig::from_json(r#"{ "eir_accuracy": 1e-9, "clean": false }"#)
            .unwrap();
        assert_eq!(config.eir_accuracy, 1e-9);
        assert!(!config.clean);
        assert_eq!(config.newton_max_iterations, 10_000);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(ValuationConfig::from_json(r#"{ "newton_step": 0.0 }"#).is_err());
        assert!(ValuationConfig::from_json(r#"{ "eir_max_evaluations": 1 }"#).is_err());
        assert!(ValuationConfig::from_json("not json").is_err());
        assert!(ValuationConfig::default()
            .with_eir_accuracy(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_solver_configs() {
        let config = ValuationConfig::default()
            .with_newton_step(1e-7)
            .with_eir_max_evaluations(26);
        assert_eq!(config.newton_config().tolerance, 1e-7);
        assert_eq!(config.eir_config().max_iterations, 26);
    }

    #[test]
    fn test_missing_file() {
        let err = ValuationConfig::from_file("/nonexistent/coupon.json").unwrap_err();
        assert!(matches!(err, BondError::Config { .. }));
    }
}
