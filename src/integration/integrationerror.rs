use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationFailure {
    NotANumber,
    Infinite
}

impl EvaluationFailure {
    pub fn classify(y: f64) -> Option<EvaluationFailure> {
        if y.is_nan() {
            Some(EvaluationFailure::NotANumber)
        } else if y.is_infinite() {
            Some(EvaluationFailure::Infinite)
        } else {
            None
        }
    }
}

impl fmt::Display for EvaluationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationFailure::NotANumber => write!(f, "result is not a number (domain error)"),
            EvaluationFailure::Infinite => write!(f, "result is infinite (pole or overflow)")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("subdivision count must be at least 1 and leave room for N + 1 samples, got {n}")]
    InvalidSubdivision { n: usize },

    #[error("reference resolution must be at least 2 points, got {resolution}")]
    InvalidReferenceResolution { resolution: usize },

    #[error("function cannot be evaluated at x = {x}: {cause}")]
    Evaluation { x: f64, cause: EvaluationFailure },

    #[error("relative error is undefined because the reference integral is zero")]
    DivisionByZero,
}
