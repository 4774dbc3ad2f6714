// ============================================================
// Layer 5 — Step Function
// ============================================================
// A right-continuous step function over event times, the shape
// every survival model in this crate returns:
//
//   S(t) = y[0]       for lo <= t <  x[0]
//   S(t) = y[i]       for x[i] <= t < x[i+1]
//   S(t) = y[last]    for t >= x[last]  (up to the domain end)
//
// The function is only defined on its domain, by default
// [min(0, x[0]), x[last]]. Times inside the domain but before
// the first event are raised to x[0], so a model whose grid
// starts late reports its first fitted value there, not 1.0.
// Callers that need a value at an arbitrary time clip it into
// the domain first.
//
// Reference: Rust Book §8 (Vectors), slice::partition_point

use crate::ml::error::ModelError;

#[derive(Debug, Clone, PartialEq)]
pub struct StepFunction {
    x:      Vec<f64>,
    y:      Vec<f64>,
    domain: (f64, f64),
}

impl StepFunction {
    /// Build from event times `x` (strictly increasing) and values `y`.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, ModelError> {
        if x.is_empty() {
            return Err(ModelError::InvalidCurve("no event times".into()));
        }
        if x.len() != y.len() {
            return Err(ModelError::InvalidCurve(format!(
                "{} event times but {} values", x.len(), y.len()
            )));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(ModelError::InvalidCurve("non-finite time or value".into()));
        }
        if x.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ModelError::InvalidCurve("event times must be strictly increasing".into()));
        }

        let domain = (x[0].min(0.0), x[x.len() - 1]);
        Ok(Self { x, y, domain })
    }

    /// Replace the default domain.
    pub fn with_domain(mut self, lo: f64, hi: f64) -> Result<Self, ModelError> {
        if !(lo.is_finite() && hi.is_finite()) || lo > hi {
            return Err(ModelError::InvalidCurve(format!("bad domain [{lo}, {hi}]")));
        }
        self.domain = (lo, hi);
        Ok(self)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn times(&self) -> &[f64] {
        &self.x
    }

    pub fn values(&self) -> &[f64] {
        &self.y
    }

    /// Clamp `t` into the domain.
    pub fn clip(&self, t: f64) -> f64 {
        t.clamp(self.domain.0, self.domain.1)
    }

    /// Evaluate at `t`. Errors if `t` is outside the domain.
    pub fn eval(&self, t: f64) -> Result<f64, ModelError> {
        let (lo, hi) = self.domain;
        if !(t >= lo && t <= hi) {
            return Err(ModelError::OutOfDomain { t, lo, hi });
        }

        // Number of event times <= t, at least one
        let t     = t.max(self.x[0]);
        let steps = self.x.partition_point(|&xi| xi <= t);
        Ok(self.y[steps - 1])
    }
}
