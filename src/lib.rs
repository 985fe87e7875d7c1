//! Fixed-point iteration with a posteriori convergence monitoring.
//!
//! Given a map `f: R^d -> R^d` and an initial value `x0`, this crate applies
//! `f` repeatedly and after every step estimates the local contraction ratio
//!
//! ```text
//! theta_n = ||f(x_n) - x_n|| / ||x_n - x_{n-1}||
//! ```
//!
//! in the L1, Euclidean or max norm. Each pass checks, in this order,
//!
//! 1. `theta < tol`: the run has converged (the pending image is appended),
//! 2. the history holds more than `max_iterations` iterates: budget exhausted,
//! 3. `theta > 1`: the map is not contracting and the run diverged.
//!
//! The outcome is an explicit [`IterationStatus`]; non-convergence is not an
//! error. Only invalid arguments (unsupported norm order, non-positive
//! tolerance or budget, empty initial value, a map that changes dimension)
//! are reported through [`FixedPointError`].
//!
//! # Quick start
//!
//! ```
//! use fpiter::{iterate, IterationOptions, IterationStatus, NormOrder};
//! use nalgebra::DVector;
//!
//! let options = IterationOptions::default()
//!     .with_norm(NormOrder::Max)
//!     .with_verbose(false);
//! let x0 = DVector::from_vec(vec![0.0, 0.0]);
//! let result = iterate(|x| x * 0.5 + DVector::from_vec(vec![1.0, -1.0]), &x0, &options)
//!     .expect("valid arguments");
//!
//! assert_eq!(result.status, IterationStatus::Converged);
//! assert!((result.xstar[0] - 2.0).abs() < 1e-12);
//! ```
//!
//! With `verbose` enabled a human-readable trace is written to stdout, or to
//! any [`std::io::Write`] through [`iterate_with_sink`]. Independently of
//! that trace, progress is reported through the `log` facade.

pub mod error;
pub mod norm;
pub mod options;
pub mod solving;
pub mod trace;

pub use error::{FixedPointError, Result};
pub use norm::NormOrder;
pub use options::IterationOptions;
pub use solving::{
    contraction_ratio, iterate, iterate_scalar, iterate_with_sink, FixedPointIterator,
    FixedPointResult, IterationStatus,
};
