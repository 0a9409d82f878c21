use ndarray::NdFloat;
use ndarray_rand::rand_distr::uniform::SampleUniform;

pub trait Scalar: NdFloat + SampleUniform + Default {
    const DEFAULT_LEARNING_RATE: Self;
    const DEFAULT_TOLERANCE: Self;
}

impl Scalar for f32 {
    const DEFAULT_LEARNING_RATE: Self = 0.1;
    const DEFAULT_TOLERANCE: Self = 1e-8;
}

impl Scalar for f64 {
    const DEFAULT_LEARNING_RATE: Self = 0.1;
    const DEFAULT_TOLERANCE: Self = 1e-8;
}
