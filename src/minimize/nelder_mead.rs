use crate::{
    error::MinimizerError,
    minimize::{Minimizer, MinimizerResult, ObjFn, Simplex, SimplexConstant},
};
use serde::Serialize;
use simple_error::{SimpleError, bail};
use std::fmt;
use std::str::FromStr;

/// Reflection scale factor
const REFLECT: f64 = -1.0;
/// Expansion scale factor
const EXPAND: f64 = 2.0;
/// Contraction scale factor
const CONTRACT: f64 = 0.5;

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TerminationReason {
    Converged,
    MaxEvaluations,
    Unspecified,
}

impl TerminationReason {
    pub fn to_str(&self) -> &str {
        match self {
            TerminationReason::Converged => "Converged",
            TerminationReason::MaxEvaluations => "MaxFunctionEvaluations",
            TerminationReason::Unspecified => "Unspecified",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for TerminationReason {
    type Err = SimpleError;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val.to_lowercase().as_str() {
            "converged" => Ok(TerminationReason::Converged),
            "maxfunctionevaluations" | "maxevaluations" | "max_evaluations" => {
                Ok(TerminationReason::MaxEvaluations)
            }
            "unspecified" => Ok(TerminationReason::Unspecified),
            _ => bail!("string not a valid termination reason: {}", val),
        }
    }
}

/// Result of a Nelder-Mead run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionResult {
    pub termination_reason: TerminationReason,
    pub best_point: Vec<f64>,
    pub best_error: f64,
    /// Evaluations charged against the budget.
    ///
    /// The n + 1 evaluations that seed the simplex are not counted, and a
    /// shrink is charged n + 1 although it calls the objective n times. Use
    /// `objective_calls` for the number of times the objective actually ran.
    pub evaluation_count: usize,
    pub iterations: usize,
    pub objective_calls: usize,
}

impl MinimizerResult for RegressionResult {
    fn xmin(&self) -> &[f64] {
        &self.best_point
    }

    fn fmin(&self) -> f64 {
        self.best_error
    }

    fn fn_evals(&self) -> usize {
        self.evaluation_count
    }

    fn iters(&self) -> usize {
        self.iterations
    }

    fn converged(&self) -> bool {
        self.termination_reason == TerminationReason::Converged
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NelderMeadOptions {
    constants: Vec<SimplexConstant>,
    tolerance: f64,
    max_evaluations: usize,
}

impl NelderMeadOptions {
    pub fn new(constants: Vec<SimplexConstant>) -> Self {
        Self {
            constants,
            tolerance: 1e-8,
            max_evaluations: 1000,
        }
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn with_max_evaluations(mut self, max_evals: usize) -> Self {
        self.max_evaluations = max_evals;
        self
    }

    pub fn set_constants(&mut self, constants: Vec<SimplexConstant>) {
        self.constants = constants;
    }

    pub fn constants(&self) -> &[SimplexConstant] {
        &self.constants
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_evaluations(&self) -> usize {
        self.max_evaluations
    }
}

/// Nelder-Mead downhill simplex minimizer.
///
/// Holds only configuration, so one value can serve any number of
/// independent runs, including runs on different threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelderMeadSimplex {
    jitter: f64,
}

impl Default for NelderMeadSimplex {
    fn default() -> Self {
        Self { jitter: 1e-10 }
    }
}

impl NelderMeadSimplex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constant added to the denominator of the convergence ratio
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    fn validate(
        &self,
        constants: &[SimplexConstant],
        tolerance: f64,
        max_evaluations: usize,
    ) -> Result<(), MinimizerError> {
        if constants.is_empty() {
            return Err(MinimizerError::InvalidDimension);
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(MinimizerError::InvalidTolerance);
        }
        if max_evaluations == 0 {
            return Err(MinimizerError::InvalidParameters(
                "max_evaluations must be positive".to_string(),
            ));
        }
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(MinimizerError::InvalidParameters(format!(
                "jitter must be finite and non-negative, got {}",
                self.jitter
            )));
        }
        Ok(())
    }

    /// Minimize `f` starting from the simplex described by `constants`.
    ///
    /// Stops when the relative spread between the worst and best vertex drops
    /// below `tolerance`, or once `max_evaluations` evaluations have been
    /// charged (see [`RegressionResult::evaluation_count`]).
    pub fn regress<F>(
        &self,
        constants: &[SimplexConstant],
        tolerance: f64,
        max_evaluations: usize,
        f: &F,
    ) -> Result<RegressionResult, MinimizerError>
    where
        F: ObjFn + ?Sized,
    {
        self.validate(constants, tolerance, max_evaluations)?;

        let mut simplex = Simplex::initialize(constants, f)?;
        let shrink_cost = simplex.len();
        let mut evaluation_count = 0;
        let mut iterations = 0;

        let (termination_reason, profile) = loop {
            let profile = simplex.rank();
            if simplex.has_converged(&profile, tolerance, self.jitter) {
                break (TerminationReason::Converged, profile);
            }
            iterations += 1;

            let reflected = simplex.try_scale(REFLECT, &profile, f)?;
            evaluation_count += 1;
            if reflected <= simplex.error(profile.lowest) {
                let expanded = simplex.try_scale(EXPAND, &profile, f)?;
                evaluation_count += 1;
                log::trace!(
                    "iteration {}: reflected {:e}, expanded {:e}",
                    iterations,
                    reflected,
                    expanded
                );
            } else if reflected >= simplex.error(profile.next_highest) {
                let worst = simplex.error(profile.highest);
                let contracted = simplex.try_scale(CONTRACT, &profile, f)?;
                evaluation_count += 1;
                if contracted >= worst {
                    log::debug!(
                        "iteration {}: contraction {:e} no better than {:e}, shrinking",
                        iterations,
                        contracted,
                        worst
                    );
                    simplex.shrink(&profile, f)?;
                    evaluation_count += shrink_cost;
                } else {
                    log::trace!("iteration {}: contracted {:e}", iterations, contracted);
                }
            } else {
                log::trace!("iteration {}: reflected {:e}", iterations, reflected);
            }

            if evaluation_count >= max_evaluations {
                // the last step may have produced a new best vertex
                break (TerminationReason::MaxEvaluations, simplex.rank());
            }
        };

        let best_error = simplex.error(profile.lowest);
        log::info!(
            "Nelder-Mead finished: {} after {} iterations, {} evaluations, best error {:e}",
            termination_reason,
            iterations,
            evaluation_count,
            best_error
        );

        Ok(RegressionResult {
            termination_reason,
            best_point: simplex.vertex(profile.lowest).as_slice().to_vec(),
            best_error,
            evaluation_count,
            iterations,
            objective_calls: simplex.objective_calls(),
        })
    }
}

impl Minimizer<NelderMeadOptions> for NelderMeadSimplex {
    type Output = RegressionResult;

    fn minimize<F>(
        &self,
        opt: &NelderMeadOptions,
        f: &F,
    ) -> Result<RegressionResult, MinimizerError>
    where
        F: ObjFn + ?Sized,
    {
        self.regress(opt.constants(), opt.tolerance(), opt.max_evaluations(), f)
    }
}

/// Minimize `f` with the default engine configuration.
///
/// ```
/// use nmsimplex::minimize::{SimplexConstant, TerminationReason, regress};
///
/// let f = |x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] - 3.0).powi(2);
/// let constants = [SimplexConstant::new(1.0, 0.0), SimplexConstant::new(2.0, 1.0)];
/// let res = regress(&constants, 1e-7, 200, &f).unwrap();
///
/// assert_eq!(res.termination_reason, TerminationReason::Converged);
/// assert!((res.best_point[1] - 3.0).abs() < 1e-3);
/// ```
pub fn regress<F>(
    constants: &[SimplexConstant],
    tolerance: f64,
    max_evaluations: usize,
    f: &F,
) -> Result<RegressionResult, MinimizerError>
where
    F: ObjFn + ?Sized,
{
    NelderMeadSimplex::default().regress(constants, tolerance, max_evaluations, f)
}

#[cfg(test)]
mod minimize_neldermead_tests {
    use super::*;
    use float_cmp::{F64Margin, approx_eq};

    const MARGIN: F64Margin = F64Margin {
        epsilon: 1e-9,
        ulps: 10,
    };

    fn quadratic(x: &[f64]) -> f64 {
        x[0] * x[0] - 4.0 * x[0] + x[1] * x[1] - x[1] - x[0] * x[1]
    }

    fn quadratic_constants() -> Vec<SimplexConstant> {
        vec![SimplexConstant::new(0.0, 1.2), SimplexConstant::new(0.0, 0.8)]
    }

    #[test]
    fn termination_reason_strings() {
        assert_eq!(TerminationReason::Converged.to_string(), "Converged");
        assert_eq!(
            TerminationReason::MaxEvaluations.to_string(),
            "MaxFunctionEvaluations"
        );
        assert_eq!(
            "MaxFunctionEvaluations".parse::<TerminationReason>().unwrap(),
            TerminationReason::MaxEvaluations
        );
        assert_eq!(
            "max_evaluations".parse::<TerminationReason>().unwrap(),
            TerminationReason::MaxEvaluations
        );
        assert_eq!(
            "CONVERGED".parse::<TerminationReason>().unwrap(),
            TerminationReason::Converged
        );
        assert!("diverged".parse::<TerminationReason>().is_err());
    }

    #[test]
    fn budget_stops_run() {
        let res = regress(&quadratic_constants(), 1e-7, 10, &quadratic).unwrap();
        assert_eq!(res.termination_reason, TerminationReason::MaxEvaluations);
        assert_eq!(res.evaluation_count, 10);
        assert_eq!(res.iterations, 6);
        assert!(!res.converged());
        // best vertex after the final step, not the one ranked before it
        assert!(approx_eq!(f64, res.best_error, -6.96, MARGIN));
        assert!(approx_eq!(f64, res.best_point[0], 3.0, MARGIN));
        assert!(approx_eq!(f64, res.best_point[1], 2.2, MARGIN));
    }

    #[test]
    fn budget_of_one_runs_one_iteration() {
        let res = regress(&quadratic_constants(), 1e-7, 1, &quadratic).unwrap();
        assert_eq!(res.termination_reason, TerminationReason::MaxEvaluations);
        assert_eq!(res.iterations, 1);
        // reflection found a new best, so expansion was attempted as well
        assert_eq!(res.evaluation_count, 2);
        assert_eq!(res.objective_calls, 5);
        assert!(approx_eq!(f64, res.best_error, -5.88, MARGIN));
    }

    #[test]
    fn already_converged_start() {
        let res = regress(&quadratic_constants(), 1e-7, 200, &|_: &[f64]| 0.0).unwrap();
        assert_eq!(res.termination_reason, TerminationReason::Converged);
        assert_eq!(res.evaluation_count, 0);
        assert_eq!(res.iterations, 0);
        assert_eq!(res.objective_calls, 3);
        assert_eq!(res.best_error, 0.0);
    }

    #[test]
    fn one_dimension() {
        let res = regress(
            &[SimplexConstant::new(5.0, 1.0)],
            1e-10,
            500,
            &|x: &[f64]| (x[0] - 2.0).powi(2) + 1.0,
        )
        .unwrap();
        assert_eq!(res.best_point.len(), 1);
        assert_eq!(res.termination_reason, TerminationReason::Converged);
    }

    #[test]
    fn invalid_arguments() {
        let constants = quadratic_constants();
        assert!(matches!(
            regress(&[], 1e-7, 200, &quadratic),
            Err(MinimizerError::InvalidDimension)
        ));
        assert!(matches!(
            regress(&constants, 0.0, 200, &quadratic),
            Err(MinimizerError::InvalidTolerance)
        ));
        assert!(matches!(
            regress(&constants, f64::NAN, 200, &quadratic),
            Err(MinimizerError::InvalidTolerance)
        ));
        assert!(matches!(
            regress(&constants, 1e-7, 0, &quadratic),
            Err(MinimizerError::InvalidParameters(_))
        ));
        assert!(matches!(
            NelderMeadSimplex::new()
                .with_jitter(-1.0)
                .regress(&constants, 1e-7, 200, &quadratic),
            Err(MinimizerError::InvalidParameters(_))
        ));
    }

    #[test]
    fn minimizer_trait_matches_regress() {
        let opt = NelderMeadOptions::new(quadratic_constants())
            .with_tolerance(1e-7)
            .with_max_evaluations(200);
        let engine = NelderMeadSimplex::default();
        let res = engine.minimize(&opt, &quadratic).unwrap();
        assert_eq!(res, regress(&quadratic_constants(), 1e-7, 200, &quadratic).unwrap());
        assert!(res.converged());
        assert_eq!(res.xmin().len(), 2);
        assert_eq!(res.fmin(), res.best_error);
        assert_eq!(res.fn_evals(), res.evaluation_count);
        assert_eq!(res.iters(), res.iterations);
    }

    #[test]
    fn options_defaults() {
        let opt = NelderMeadOptions::new(quadratic_constants());
        assert_eq!(opt.tolerance(), 1e-8);
        assert_eq!(opt.max_evaluations(), 1000);
        assert_eq!(opt.constants().len(), 2);
        assert_eq!(NelderMeadSimplex::default().jitter(), 1e-10);
    }
}
