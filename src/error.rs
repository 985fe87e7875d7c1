use thiserror::Error;

/// Unified error type for `fpiter` operations.
///
/// Every variant describes an invalid argument detected before or during the
/// iteration. Failing to converge is not an error; see
/// [`IterationStatus`](crate::IterationStatus).
#[derive(Debug, Error)]
pub enum FixedPointError {
    /// Raised when the requested norm order is not one of `1`, `2` or `+inf`.
    #[error("unsupported norm order {order}; expected 1, 2 or inf")]
    InvalidNormOrder { order: f64 },

    /// Raised when the convergence tolerance is not a positive finite number.
    #[error("tolerance must be positive and finite, found {tolerance}")]
    InvalidTolerance { tolerance: f64 },

    /// Raised when the iteration budget is zero.
    #[error("max_iterations must be at least 1, found {max_iterations}")]
    InvalidMaxIterations { max_iterations: usize },

    /// Raised when the initial value has no components.
    #[error("initial value must have at least one component")]
    EmptyInitialValue,

    /// Raised when the iterated map changes the dimension of its argument.
    #[error("dimension mismatch in {context}: expected {expected} but found {found}")]
    DimensionMismatch {
        /// Human-readable context describing the operation.
        context: &'static str,
        /// Dimension of the initial value.
        expected: usize,
        /// Dimension returned by the map.
        found: usize,
    },
}

impl FixedPointError {
    /// Helper to format a [`DimensionMismatch`](FixedPointError::DimensionMismatch) error.
    pub fn dimension_mismatch(context: &'static str, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            context,
            expected,
            found,
        }
    }

    /// Whether the error stems from a bad argument or configuration.
    ///
    /// Currently true for every variant.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidNormOrder { .. }
                | Self::InvalidTolerance { .. }
                | Self::InvalidMaxIterations { .. }
                | Self::EmptyInitialValue
                | Self::DimensionMismatch { .. }
        )
    }
}

/// Type alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, FixedPointError>;
