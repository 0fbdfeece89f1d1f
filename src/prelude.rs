//! nmsimplex prelude.
//!
//! This module contains the most used types, traits and functions that you
//! can import easily as a group.
//!
//! ```
//! use nmsimplex::prelude::*;
//!
//! ```

#[doc(no_inline)]
pub use crate::error::MinimizerError;

#[doc(no_inline)]
pub use crate::minimize::{
    FallibleFn, Minimizer, MinimizerResult, NelderMeadOptions, NelderMeadSimplex, ObjFn,
    RankProfile, RegressionResult, Simplex, SimplexConstant, TerminationReason, regress,
};

#[doc(no_inline)]
pub use crate::point::Point;
