use lumdist_core::constants::{
    MAX_RIEMANN_SAMPLES, SIMPSON_MAX_DEPTH, SIMPSON_MAX_EVALUATIONS, SIMPSON_TOLERANCE,
};
use lumdist_core::{LumdistError, Quadrature, Result};
use tracing::{debug, warn};

/// A numerical method for definite integrals of a real function
pub trait Integrator {
    fn integrate(&self, f: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> Result<Quadrature>;
}

/// Left-endpoint Riemann sum with a fixed step.
///
/// Samples `f` at `lower + i * step` for every `i` whose abscissa does not
/// exceed `upper`, so the rectangle at `upper` itself is included and the
/// reported `end` lies up to one step past the bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepRiemann {
    pub step: f64,
}

impl FixedStepRiemann {
    pub fn new(step: f64) -> Self {
        Self { step }
    }

    /// Number of samples taken over [lower, upper], capped at `MAX_RIEMANN_SAMPLES`
    pub fn sample_count(&self, lower: f64, upper: f64) -> Result<u64> {
        let ratio = (upper - lower) / self.step;
        if ratio.is_nan() || ratio >= MAX_RIEMANN_SAMPLES as f64 {
            return Err(LumdistError::invalid(
                "step",
                self.step,
                "too small for the interval: sample count exceeds MAX_RIEMANN_SAMPLES",
            ));
        }
        let mut last = ratio.floor();
        // 1.0 / 1e-9 may land a few ulps below 1e9
        if (last + 1.0) - ratio <= ratio.max(1.0) * 4.0 * f64::EPSILON {
            last += 1.0;
        }
        Ok(last as u64 + 1)
    }
}

impl Integrator for FixedStepRiemann {
    fn integrate(&self, f: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> Result<Quadrature> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(LumdistError::invalid("step", self.step, "must be positive and finite"));
        }
        check_bounds(lower, upper)?;

        let n = self.sample_count(lower, upper)?;
        let mut sum = CompensatedSum::default();
        for i in 0..n {
            // Index-derived abscissa: repeated `z += step` would drift over 1e9 steps
            let z = lower + i as f64 * self.step;
            sum.add(sample(f, z)? * self.step);
        }

        let quad = Quadrature {
            value: sum.total(),
            end: lower + n as f64 * self.step,
            evaluations: n,
        };
        debug!(
            "Riemann sum over [{}, {}] with step {:e}: {} samples, value {}",
            lower, upper, self.step, n, quad.value
        );
        Ok(quad)
    }
}

/// Recursive adaptive Simpson quadrature with Richardson correction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveSimpson {
    /// Target error relative to max(|estimate|, 1)
    pub tolerance: f64,
    pub max_depth: u32,
    /// Evaluations allowed before giving up with `NoConvergence`
    pub max_evaluations: u64,
}

impl Default for AdaptiveSimpson {
    fn default() -> Self {
        Self {
            tolerance: SIMPSON_TOLERANCE,
            max_depth: SIMPSON_MAX_DEPTH,
            max_evaluations: SIMPSON_MAX_EVALUATIONS,
        }
    }
}

impl AdaptiveSimpson {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    pub fn with_max_evaluations(mut self, max_evaluations: u64) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }
}

/// Bookkeeping shared across the recursion
struct SimpsonState<'a> {
    f: &'a dyn Fn(f64) -> f64,
    evaluations: u64,
    max_evaluations: u64,
    exhausted: u64,
}

/// One Simpson panel with cached endpoint and midpoint values
#[derive(Clone, Copy)]
struct Panel {
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    estimate: f64,
}

impl Panel {
    fn new(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> Self {
        let estimate = (b - a) / 6.0 * (fa + 4.0 * fm + fb);
        Self { a, b, fa, fm, fb, estimate }
    }
}

impl SimpsonState<'_> {
    fn eval(&mut self, x: f64) -> Result<f64> {
        if self.evaluations >= self.max_evaluations {
            return Err(LumdistError::NoConvergence { iterations: self.evaluations });
        }
        self.evaluations += 1;
        sample(self.f, x)
    }

    fn refine(&mut self, panel: Panel, eps: f64, depth: u32) -> Result<f64> {
        let m = 0.5 * (panel.a + panel.b);
        let flm = self.eval(0.5 * (panel.a + m))?;
        let frm = self.eval(0.5 * (m + panel.b))?;
        let left = Panel::new(panel.a, m, panel.fa, flm, panel.fm);
        let right = Panel::new(m, panel.b, panel.fm, frm, panel.fb);

        let delta = left.estimate + right.estimate - panel.estimate;
        if delta.abs() <= 15.0 * eps {
            return Ok(left.estimate + right.estimate + delta / 15.0);
        }
        if depth == 0 {
            self.exhausted += 1;
            return Ok(left.estimate + right.estimate + delta / 15.0);
        }
        Ok(self.refine(left, eps / 2.0, depth - 1)? + self.refine(right, eps / 2.0, depth - 1)?)
    }
}

impl Integrator for AdaptiveSimpson {
    fn integrate(&self, f: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> Result<Quadrature> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(LumdistError::invalid(
                "tolerance",
                self.tolerance,
                "must be positive and finite",
            ));
        }
        check_bounds(lower, upper)?;
        if upper == lower {
            return Ok(Quadrature { value: 0.0, end: upper, evaluations: 0 });
        }

        let mut state = SimpsonState {
            f,
            evaluations: 0,
            max_evaluations: self.max_evaluations,
            exhausted: 0,
        };
        let fa = state.eval(lower)?;
        let fm = state.eval(0.5 * (lower + upper))?;
        let fb = state.eval(upper)?;
        let whole = Panel::new(lower, upper, fa, fm, fb);
        let eps = self.tolerance * whole.estimate.abs().max(1.0);
        let value = state.refine(whole, eps, self.max_depth)?;

        if state.exhausted > 0 {
            warn!(
                "adaptive Simpson hit depth {} on {} panels over [{}, {}]",
                self.max_depth, state.exhausted, lower, upper
            );
        }
        debug!(
            "adaptive Simpson over [{}, {}]: {} evaluations, value {}",
            lower, upper, state.evaluations, value
        );
        Ok(Quadrature { value, end: upper, evaluations: state.evaluations })
    }
}

/// Neumaier compensated summation
#[derive(Debug, Default, Clone, Copy)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn add(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }

    fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

fn sample(f: &dyn Fn(f64) -> f64, x: f64) -> Result<f64> {
    let y = f(x);
    if y.is_finite() {
        Ok(y)
    } else {
        Err(LumdistError::NonFiniteIntegrand { at: x, value: y })
    }
}

fn check_bounds(lower: f64, upper: f64) -> Result<()> {
    if !lower.is_finite() {
        return Err(LumdistError::invalid("lower", lower, "must be finite"));
    }
    if !upper.is_finite() {
        return Err(LumdistError::invalid("upper", upper, "must be finite"));
    }
    if upper < lower {
        return Err(LumdistError::invalid("upper", upper, "must not be below the lower bound"));
    }
    Ok(())
}
