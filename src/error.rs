use derive_builder::UninitializedFieldError;
use thiserror::Error;

/// Boxed error produced by a fallible gradient function.
pub type GradientError = Box<dyn std::error::Error + Send + Sync>;

/// The result type used across the crate.
pub type Result<T> = std::result::Result<T, OptimizeError>;

/// Rejected optimizer settings, reported by `GradientDescentBuilder::build`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("`{0}` must be set before building the optimizer")]
    MissingField(&'static str),
    #[error("`{name}` must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

impl From<UninitializedFieldError> for ConfigurationError {
    fn from(err: UninitializedFieldError) -> Self {
        Self::MissingField(err.field_name())
    }
}

/// Failures while stepping along the gradient.
#[derive(Error, Debug)]
pub enum ComputationError {
    #[error("gradient evaluation failed at iteration {iteration}")]
    Gradient {
        iteration: usize,
        #[source]
        source: GradientError,
    },
    #[error(
        "gradient has {got} components but the coordinate has {expected} (iteration {iteration})"
    )]
    DimensionMismatch {
        iteration: usize,
        expected: usize,
        got: usize,
    },
    #[error("gradient has non-finite components at iteration {iteration}")]
    NonFinite { iteration: usize },
}

#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Computation(#[from] ComputationError),
}
