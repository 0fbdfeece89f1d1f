use std::error::Error;
use std::fmt;

/// Error types for the simplex minimizer
#[derive(Debug)]
pub enum MinimizerError {
    DimensionMismatch { expected: usize, found: usize },
    InvalidDimension,
    InvalidParameters(String),
    InvalidTolerance,
    ObjectiveFunction(Box<dyn Error + Send + Sync + 'static>),
}

impl fmt::Display for MinimizerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MinimizerError::DimensionMismatch { expected, found } => {
                write!(
                    f,
                    "Dimension mismatch: expected {} coordinates, found {}",
                    expected, found
                )
            }
            MinimizerError::InvalidDimension => write!(f, "Invalid dimension or empty vector"),
            MinimizerError::InvalidParameters(msg) => {
                write!(f, "Invalid parameters: {}", msg)
            }
            MinimizerError::InvalidTolerance => write!(f, "Tolerance must be positive"),
            MinimizerError::ObjectiveFunction(err) => {
                write!(f, "Objective function failed: {}", err)
            }
        }
    }
}

impl Error for MinimizerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MinimizerError::ObjectiveFunction(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = MinimizerError::DimensionMismatch {
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: expected 3 coordinates, found 2"
        );
        assert_eq!(
            MinimizerError::InvalidTolerance.to_string(),
            "Tolerance must be positive"
        );
        assert_eq!(
            MinimizerError::InvalidParameters("max_evaluations must be positive".to_string())
                .to_string(),
            "Invalid parameters: max_evaluations must be positive"
        );
    }

    #[test]
    fn objective_failure_keeps_source() {
        let inner: Box<dyn Error + Send + Sync> = "model diverged".into();
        let err = MinimizerError::ObjectiveFunction(inner);
        assert_eq!(err.to_string(), "Objective function failed: model diverged");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("model diverged"));
        assert!(MinimizerError::InvalidDimension.source().is_none());
    }
}
