//! Starting points for a descent run.

use ndarray::Array1;
use ndarray_rand::RandomExt;
use rand::distributions::Uniform;
use rand::Rng;

use crate::shared::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initializer {
    Zeros,
    Ones,
    Random,
}

/// Builds a `dim`-dimensional coordinate. `Random` samples uniformly from
/// `range`, which defaults to `[-1, 1)`.
///
/// # Panics
/// If `Random` is requested with an empty range (`low >= high`).
pub fn initialize<A: Scalar>(
    initializer: Initializer,
    dim: usize,
    range: Option<(A, A)>,
) -> Array1<A> {
    initialize_using(initializer, dim, range, &mut rand::thread_rng())
}

/// Same as [`initialize`], drawing from the given generator.
pub fn initialize_using<A: Scalar, R: Rng + ?Sized>(
    initializer: Initializer,
    dim: usize,
    range: Option<(A, A)>,
    rng: &mut R,
) -> Array1<A> {
    let (start, end) = range.unwrap_or_else(|| (A::neg(A::one()), A::one()));
    match initializer {
        Initializer::Zeros => Array1::zeros(dim),
        Initializer::Ones => Array1::ones(dim),
        Initializer::Random => Array1::random_using(dim, Uniform::new(start, end), rng),
    }
}
