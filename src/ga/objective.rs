//! Objective functions (fitness landscapes).

/// Constant added to the default landscape so fitness is strictly positive.
pub const FITNESS_FLOOR: f64 = 1e-4;

/// A two-variable function to maximize.
///
/// Implemented for any `Fn(f64, f64) -> f64`, so closures and plain functions
/// can be passed wherever an objective is expected.
pub trait Objective {
    /// Score the point `(x, y)`. Higher is better.
    fn evaluate(&self, x: f64, y: f64) -> f64;
}

impl<F> Objective for F
where
    F: Fn(f64, f64) -> f64,
{
    fn evaluate(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// The default landscape: `f(x, y) = |e^(-x) - y² + 1| + 1e-4`.
#[must_use]
pub fn landscape(x: f64, y: f64) -> f64 {
    ((-x).exp() - y * y + 1.0).abs() + FITNESS_FLOOR
}

/// Unit type wrapping [`landscape`], handy where a named type reads better
/// than a function item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Landscape;

impl Objective for Landscape {
    fn evaluate(&self, x: f64, y: f64) -> f64 {
        landscape(x, y)
    }
}
