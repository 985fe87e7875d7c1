//! Configuration for the fixed-point iteration.

use serde::{Deserialize, Serialize};

use crate::error::{FixedPointError, Result};
use crate::norm::NormOrder;

/// Tolerance applied to the contraction ratio unless overridden.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;
/// Upper bound on the number of recorded iterates unless overridden.
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Controls norm selection, stopping thresholds and tracing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IterationOptions {
    /// Norm used for both displacements in the contraction ratio.
    pub norm: NormOrder,
    /// The run converges once the contraction ratio drops strictly below this value.
    pub tolerance: f64,
    /// The run stops once the history holds more than this many iterates.
    pub max_iterations: usize,
    /// Emit a trace line per iteration and a closing summary.
    pub verbose: bool,
}

impl Default for IterationOptions {
    fn default() -> Self {
        Self {
            norm: NormOrder::L2,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            verbose: true,
        }
    }
}

impl IterationOptions {
    /// Override the norm while preserving other defaults.
    pub fn with_norm(mut self, norm: NormOrder) -> Self {
        self.norm = norm;
        self
    }

    /// Select the norm from its numeric order (`1`, `2` or `f64::INFINITY`).
    pub fn with_norm_order(self, order: f64) -> Result<Self> {
        Ok(self.with_norm(NormOrder::try_from(order)?))
    }

    /// Override the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Override the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enable or disable the human-readable trace.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Checks the thresholds before any evaluation of the map.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(FixedPointError::InvalidTolerance {
                tolerance: self.tolerance,
            });
        }
        if self.max_iterations == 0 {
            return Err(FixedPointError::InvalidMaxIterations {
                max_iterations: self.max_iterations,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = IterationOptions::default();
        assert_eq!(options.norm, NormOrder::L2);
        assert_eq!(options.tolerance, 1e-9);
        assert_eq!(options.max_iterations, 100_000);
        assert!(options.verbose);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_thresholds() {
        for tolerance in [0.0, -1e-3, f64::NAN, f64::INFINITY] {
            let options = IterationOptions::default().with_tolerance(tolerance);
            assert!(matches!(
                options.validate(),
                Err(FixedPointError::InvalidTolerance { .. })
            ));
        }

        let options = IterationOptions::default().with_max_iterations(0);
        assert!(matches!(
            options.validate(),
            Err(FixedPointError::InvalidMaxIterations { max_iterations: 0 })
        ));
    }

    #[test]
    fn norm_order_builder_rejects_unknown_orders() {
        let options = IterationOptions::default()
            .with_norm_order(f64::INFINITY)
            .unwrap();
        assert_eq!(options.norm, NormOrder::Max);
        assert!(IterationOptions::default().with_norm_order(0.5).is_err());
    }
}
