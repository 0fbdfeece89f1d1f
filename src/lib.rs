//! Derivative-free minimization with the Nelder-Mead downhill simplex.
//!
//! ```
//! use nmsimplex::prelude::*;
//!
//! // x^2 - 4x + y^2 - y - xy has its minimum of -7 at (3, 2)
//! let f = |x: &[f64]| x[0] * x[0] - 4.0 * x[0] + x[1] * x[1] - x[1] - x[0] * x[1];
//! let constants = [SimplexConstant::new(0.0, 1.2), SimplexConstant::new(0.0, 0.8)];
//!
//! let res = regress(&constants, 1e-7, 200, &f).unwrap();
//! assert_eq!(res.termination_reason, TerminationReason::Converged);
//! assert!((res.best_point[0] - 3.0).abs() < 1e-2);
//! assert!((res.best_point[1] - 2.0).abs() < 1e-2);
//! ```
pub mod error;
pub mod minimize;
pub mod point;
pub mod prelude;
