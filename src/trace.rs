use std::fmt;

use ndarray::Array1;

use crate::shared::Scalar;

/// One descent step: where it landed and how far it moved.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord<A> {
    pub iteration: usize,
    pub coordinate: Array1<A>,
    pub step_size: A,
}

impl<A: Scalar> fmt::Display for IterationRecord<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[gd] iter {:>6} | step {:>13.6e} | at {}",
            self.iteration, self.step_size, self.coordinate
        )
    }
}
