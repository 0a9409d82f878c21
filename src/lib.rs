pub mod error;
pub mod initializer;
pub mod optimizers;
pub mod shared;
pub mod trace;

pub use error::{ComputationError, ConfigurationError, OptimizeError, Result};
pub use optimizers::{GradientDescent, GradientDescentBuilder, Minimum};
