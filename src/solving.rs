//! Fixed-point iteration with a posteriori monitoring of the contraction ratio.

use std::fmt;
use std::io::{self, Write};

use nalgebra::DVector;
use serde::Serialize;

use crate::error::{FixedPointError, Result};
use crate::norm::NormOrder;
use crate::options::IterationOptions;
use crate::trace::Tracer;

/// How an iteration run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IterationStatus {
    /// The contraction ratio fell strictly below the tolerance.
    Converged,
    /// The history grew past `max_iterations` before converging.
    MaxIterationsExceeded,
    /// The contraction ratio exceeded one.
    Diverged,
}

impl fmt::Display for IterationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IterationStatus::Converged => "converged",
            IterationStatus::MaxIterationsExceeded => "maximum iterations exceeded",
            IterationStatus::Diverged => "diverged",
        };
        f.write_str(label)
    }
}

/// Outcome of a run together with every iterate it produced.
#[derive(Clone, Debug, Serialize)]
pub struct FixedPointResult {
    /// Last entry of `history`. Only trustworthy when `status` is `Converged`.
    pub xstar: DVector<f64>,
    /// All iterates in order, starting with the initial value.
    pub history: Vec<DVector<f64>>,
    pub status: IterationStatus,
    /// Contraction ratio computed on the final pass.
    pub theta: f64,
    /// Contraction ratio of every pass, in order.
    pub thetas: Vec<f64>,
    /// Norm the ratios were measured in.
    pub norm: NormOrder,
}

impl FixedPointResult {
    pub fn is_converged(&self) -> bool {
        self.status == IterationStatus::Converged
    }

    /// Number of iterates after the initial value.
    pub fn iterations(&self) -> usize {
        self.history.len() - 1
    }

    /// A posteriori bound `theta / (1 - theta) * ||x_n - x_{n-1}||` on the
    /// distance between `xstar` and the true fixed point.
    ///
    /// Returns `None` when the final ratio does not indicate a contraction.
    pub fn error_estimate(&self) -> Option<f64> {
        if self.theta >= 1.0 {
            return None;
        }
        let n = self.history.len();
        if n < 2 {
            return None;
        }
        let step = self.norm.distance(&self.history[n - 1], &self.history[n - 2]);
        Some(self.theta / (1.0 - self.theta) * step)
    }
}

/// Estimates the local contraction ratio from three consecutive iterates:
/// `||next - current|| / ||current - previous||`.
///
/// A stalled denominator, or any NaN produced by non-finite iterates, yields
/// `f64::INFINITY` so the run is classified as diverged.
pub fn contraction_ratio(
    next: &DVector<f64>,
    current: &DVector<f64>,
    previous: &DVector<f64>,
    norm: NormOrder,
) -> f64 {
    let step = norm.distance(current, previous);
    if step == 0.0 {
        log::warn!("successive iterates coincide; treating contraction ratio as infinite");
        return f64::INFINITY;
    }
    let ratio = norm.distance(next, current) / step;
    if ratio.is_nan() {
        log::warn!("contraction ratio is NaN; treating it as infinite");
        return f64::INFINITY;
    }
    ratio
}

/// Runs fixed-point iterations under a validated configuration.
#[derive(Clone, Debug)]
pub struct FixedPointIterator {
    options: IterationOptions,
}

impl FixedPointIterator {
    /// Validates `options` up front so later runs cannot fail on configuration.
    pub fn new(options: IterationOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &IterationOptions {
        &self.options
    }

    /// Iterates `fun` from `x0`, tracing to stdout when `verbose` is set.
    pub fn run<F>(&self, fun: F, x0: &DVector<f64>) -> Result<FixedPointResult>
    where
        F: Fn(&DVector<f64>) -> DVector<f64>,
    {
        if self.options.verbose {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            self.run_traced(fun, x0, Tracer::new(&mut handle))
        } else {
            self.run_traced(fun, x0, Tracer::silent())
        }
    }

    /// Iterates `fun` from `x0`, tracing to `sink` when `verbose` is set.
    pub fn run_with_sink<F, W>(
        &self,
        fun: F,
        x0: &DVector<f64>,
        sink: &mut W,
    ) -> Result<FixedPointResult>
    where
        F: Fn(&DVector<f64>) -> DVector<f64>,
        W: Write,
    {
        let tracer = if self.options.verbose {
            Tracer::new(sink)
        } else {
            Tracer::silent()
        };
        self.run_traced(fun, x0, tracer)
    }

    fn run_traced<F>(
        &self,
        fun: F,
        x0: &DVector<f64>,
        mut tracer: Tracer<'_>,
    ) -> Result<FixedPointResult>
    where
        F: Fn(&DVector<f64>) -> DVector<f64>,
    {
        let options = &self.options;
        let dimension = x0.len();
        if dimension == 0 {
            return Err(FixedPointError::EmptyInitialValue);
        }

        let evaluate = |x: &DVector<f64>| -> Result<DVector<f64>> {
            let image = fun(x);
            if image.len() != dimension {
                return Err(FixedPointError::dimension_mismatch(
                    "map output",
                    dimension,
                    image.len(),
                ));
            }
            Ok(image)
        };

        let mut pending = evaluate(x0)?;
        let mut history = vec![x0.clone()];
        let mut thetas = Vec::new();
        tracer.initial(x0);

        let (status, theta) = loop {
            history.push(pending);
            let n = history.len();
            let current = &history[n - 1];
            let next = evaluate(current)?;
            let theta = contraction_ratio(&next, current, &history[n - 2], options.norm);
            thetas.push(theta);
            log::debug!("fixed-point iterate {} (theta = {})", n - 1, theta);
            tracer.step(n - 1, current, theta);
            pending = next;

            if theta < options.tolerance {
                history.push(pending);
                break (IterationStatus::Converged, theta);
            }
            if history.len() > options.max_iterations {
                break (IterationStatus::MaxIterationsExceeded, theta);
            }
            if theta > 1.0 {
                break (IterationStatus::Diverged, theta);
            }
        };

        if status == IterationStatus::Converged {
            log::info!(
                "fixed-point iteration {} after {} iterates (theta = {})",
                status,
                history.len() - 1,
                theta
            );
        } else {
            log::warn!(
                "fixed-point iteration {} after {} of at most {} iterates (theta = {})",
                status,
                history.len() - 1,
                options.max_iterations,
                theta
            );
        }

        let xstar = history[history.len() - 1].clone();
        tracer.summary(theta, history.len(), options.max_iterations, &xstar);

        Ok(FixedPointResult {
            xstar,
            history,
            status,
            theta,
            thetas,
            norm: options.norm,
        })
    }
}

/// Iterates `fun` from `x0` until the contraction ratio drops below the
/// tolerance, exceeds one, or the history outgrows the budget.
///
/// With `verbose` set, a trace is printed to stdout.
pub fn iterate<F>(
    fun: F,
    x0: &DVector<f64>,
    options: &IterationOptions,
) -> Result<FixedPointResult>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    FixedPointIterator::new(options.clone())?.run(fun, x0)
}

/// Same as [`iterate`] but writes the trace to `sink`.
pub fn iterate_with_sink<F, W>(
    fun: F,
    x0: &DVector<f64>,
    options: &IterationOptions,
    sink: &mut W,
) -> Result<FixedPointResult>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
    W: Write,
{
    FixedPointIterator::new(options.clone())?.run_with_sink(fun, x0, sink)
}

/// Scalar convenience wrapper: iterates a map on the real line.
pub fn iterate_scalar<F>(fun: F, x0: f64, options: &IterationOptions) -> Result<FixedPointResult>
where
    F: Fn(f64) -> f64,
{
    iterate(
        |x: &DVector<f64>| DVector::from_element(1, fun(x[0])),
        &DVector::from_element(1, x0),
        options,
    )
}
