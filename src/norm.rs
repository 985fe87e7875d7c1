//! Vector norms used to measure successive iterate displacements.

use std::fmt;
use std::str::FromStr;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::error::{FixedPointError, Result};

/// Norm applied to residual vectors when estimating the contraction ratio.
///
/// Deserializes from the names `"l1"`, `"l2"`, `"max"` as well as the orders
/// `1`, `2` and `"inf"`; serializes as the name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "RawNormOrder")]
pub enum NormOrder {
    /// Sum of absolute components (`p = 1`).
    L1,
    /// Euclidean norm (`p = 2`).
    #[default]
    L2,
    /// Largest absolute component (`p = inf`).
    Max,
}

impl NormOrder {
    /// Evaluates the norm of `v`.
    pub fn apply(self, v: &DVector<f64>) -> f64 {
        match self {
            NormOrder::L1 => v.lp_norm(1),
            NormOrder::L2 => v.norm(),
            NormOrder::Max => v.amax(),
        }
    }

    /// Norm of `a - b` without keeping the residual around.
    pub fn distance(self, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        self.apply(&(a - b))
    }

    /// The numeric order `p`, with `f64::INFINITY` for the max norm.
    pub fn order(self) -> f64 {
        match self {
            NormOrder::L1 => 1.0,
            NormOrder::L2 => 2.0,
            NormOrder::Max => f64::INFINITY,
        }
    }
}

/// Either spelling accepted in configuration files.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNormOrder {
    Order(f64),
    Name(String),
}

impl TryFrom<RawNormOrder> for NormOrder {
    type Error = FixedPointError;

    fn try_from(raw: RawNormOrder) -> Result<Self> {
        match raw {
            RawNormOrder::Order(order) => NormOrder::try_from(order),
            RawNormOrder::Name(name) => name.parse(),
        }
    }
}

impl TryFrom<f64> for NormOrder {
    type Error = FixedPointError;

    fn try_from(order: f64) -> Result<Self> {
        if order == 1.0 {
            Ok(NormOrder::L1)
        } else if order == 2.0 {
            Ok(NormOrder::L2)
        } else if order == f64::INFINITY {
            Ok(NormOrder::Max)
        } else {
            Err(FixedPointError::InvalidNormOrder { order })
        }
    }
}

impl FromStr for NormOrder {
    type Err = FixedPointError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l1" => Ok(NormOrder::L1),
            "l2" => Ok(NormOrder::L2),
            "max" | "inf" | "+inf" | "infinity" => Ok(NormOrder::Max),
            other => other
                .parse::<f64>()
                .map_err(|_| FixedPointError::InvalidNormOrder { order: f64::NAN })
                .and_then(NormOrder::try_from),
        }
    }
}

impl fmt::Display for NormOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.order())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn norms_differ_on_uneven_components() {
        let v = DVector::from_vec(vec![3.0, -4.0]);
        assert_relative_eq!(NormOrder::L1.apply(&v), 7.0);
        assert_relative_eq!(NormOrder::L2.apply(&v), 5.0);
        assert_relative_eq!(NormOrder::Max.apply(&v), 4.0);
    }

    #[test]
    fn parses_numeric_and_named_orders() {
        assert_eq!(NormOrder::try_from(1.0).unwrap(), NormOrder::L1);
        assert_eq!(NormOrder::try_from(f64::INFINITY).unwrap(), NormOrder::Max);
        assert_eq!("2".parse::<NormOrder>().unwrap(), NormOrder::L2);
        assert_eq!("Inf".parse::<NormOrder>().unwrap(), NormOrder::Max);
        assert_eq!("l1".parse::<NormOrder>().unwrap(), NormOrder::L1);
    }

    #[test]
    fn display_prints_the_numeric_order() {
        assert_eq!(NormOrder::L1.to_string(), "1");
        assert_eq!(NormOrder::L2.to_string(), "2");
        assert_eq!(NormOrder::Max.to_string(), "inf");
        for norm in [NormOrder::L1, NormOrder::L2, NormOrder::Max] {
            assert_eq!(NormOrder::try_from(norm.order()).unwrap(), norm);
        }
    }

    #[test]
    fn rejects_unsupported_orders() {
        assert!(matches!(
            NormOrder::try_from(3.0),
            Err(FixedPointError::InvalidNormOrder { order }) if order == 3.0
        ));
        assert!(NormOrder::try_from(f64::NEG_INFINITY).is_err());
        assert!("-inf".parse::<NormOrder>().is_err());
        assert!("euclid".parse::<NormOrder>().is_err());
    }
}
