use crate::error::MinimizerError;
use std::error::Error;

pub mod nelder_mead;
pub mod simplex;

pub use self::nelder_mead::{
    NelderMeadOptions, NelderMeadSimplex, RegressionResult, TerminationReason, regress,
};
pub use self::simplex::{RankProfile, Simplex, SimplexConstant};

// Define a trait for the objective function
pub trait ObjFn {
    fn call(&self, x: &[f64]) -> Result<f64, MinimizerError>;
}

impl<F> ObjFn for F
where
    F: Fn(&[f64]) -> f64,
{
    fn call(&self, x: &[f64]) -> Result<f64, MinimizerError> {
        Ok(self(x))
    }
}

/// Wrapper for objective functions that can fail.
///
/// The error is handed back to the caller of the minimizer unchanged, boxed
/// inside [`MinimizerError::ObjectiveFunction`].
#[derive(Clone)]
pub struct FallibleFn<F>(pub F);

impl<F> FallibleFn<F> {
    pub fn new(f: F) -> Self {
        FallibleFn(f)
    }
}

impl<F, E> ObjFn for FallibleFn<F>
where
    F: Fn(&[f64]) -> Result<f64, E>,
    E: Into<Box<dyn Error + Send + Sync + 'static>>,
{
    fn call(&self, x: &[f64]) -> Result<f64, MinimizerError> {
        (self.0)(x).map_err(|e| MinimizerError::ObjectiveFunction(e.into()))
    }
}

pub trait Minimizer<O> {
    type Output: MinimizerResult;

    /// Run the optimization described by `opt` against `f`
    fn minimize<F>(&self, opt: &O, f: &F) -> Result<Self::Output, MinimizerError>
    where
        F: ObjFn + ?Sized;
}

pub trait MinimizerResult {
    fn xmin(&self) -> &[f64];
    fn fmin(&self) -> f64;
    fn fn_evals(&self) -> usize;
    fn iters(&self) -> usize;
    fn converged(&self) -> bool;
}
