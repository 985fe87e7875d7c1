//! Human-readable trace of an iteration run.
//!
//! The trace is advisory: a failing sink is reported once through `log` and
//! then silenced, it never changes the outcome of the run.

use std::io::{self, Write};

use nalgebra::DVector;

/// Writes one line per iterate and a closing summary to an optional sink.
pub struct Tracer<'a> {
    sink: Option<&'a mut dyn Write>,
}

impl<'a> Tracer<'a> {
    /// A tracer that writes to `sink`.
    pub fn new(sink: &'a mut dyn Write) -> Self {
        Self { sink: Some(sink) }
    }

    /// A tracer that discards everything.
    pub fn silent() -> Self {
        Self { sink: None }
    }

    /// Whether lines are still being written.
    pub fn is_active(&self) -> bool {
        self.sink.is_some()
    }

    /// `x0 = [..]`
    pub fn initial(&mut self, x0: &DVector<f64>) {
        self.line(format_args!("x0 = {}", format_vector(x0)));
    }

    /// `x<n> = [..] (theta = ..)`
    pub fn step(&mut self, index: usize, x: &DVector<f64>, theta: f64) {
        self.line(format_args!(
            "x{} = {} (theta = {})",
            index,
            format_vector(x),
            theta
        ));
    }

    /// Closing classification. The two warnings are independent and may both appear.
    pub fn summary(
        &mut self,
        theta: f64,
        history_len: usize,
        max_iterations: usize,
        xstar: &DVector<f64>,
    ) {
        if theta > 1.0 {
            self.line(format_args!("warning! theta > 1 (theta = {})", theta));
        }
        if history_len > max_iterations {
            self.line(format_args!("warning! n exceeds nmax (n = {})", history_len));
        }
        if history_len <= max_iterations && theta < 1.0 {
            self.line(format_args!("x* = {}", format_vector(xstar)));
        }
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        if let Err(err) = write_line(&mut **sink, args) {
            log::warn!("disabling iteration trace after write failure: {err}");
            self.sink = None;
        }
    }
}

fn write_line(sink: &mut dyn Write, args: std::fmt::Arguments<'_>) -> io::Result<()> {
    sink.write_fmt(args)?;
    sink.write_all(b"\n")
}

/// Formats a vector as `[a, b, ..]`.
pub fn format_vector(v: &DVector<f64>) -> String {
    format!("{:?}", v.as_slice())
}
