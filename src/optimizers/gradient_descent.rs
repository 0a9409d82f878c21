use std::fmt;
use std::sync::Arc;

use derive_builder::Builder;
use log::{debug, log_enabled, trace, Level};
use ndarray::{Array1, ArrayView1};

use crate::error::{ComputationError, ConfigurationError, GradientError, Result};
use crate::shared::Scalar;
use crate::trace::IterationRecord;

/// Gradient of the objective, shared between clones of an optimizer.
pub type GradientFn<A> =
    Arc<dyn Fn(ArrayView1<A>) -> std::result::Result<Array1<A>, GradientError> + Send + Sync>;

/// Fixed-step gradient descent.
///
/// Each iteration moves the coordinate by `-learning_rate * gradient(x)` and
/// stops once that step is shorter than `tol`, or after `max_iters` steps.
/// The configuration cannot change after `build()`.
#[derive(Builder, Clone)]
#[builder(build_fn(validate = "Self::validate", error = "ConfigurationError"))]
pub struct GradientDescent<A: Scalar> {
    #[builder(setter(custom))]
    gradient: GradientFn<A>,
    #[builder(default = "A::DEFAULT_LEARNING_RATE")]
    learning_rate: A,
    #[builder(default = "100")]
    max_iters: usize,
    #[builder(default = "A::DEFAULT_TOLERANCE")]
    tol: A,
    /// Abort with `ComputationError::NonFinite` instead of letting NaN/inf
    /// propagate through the coordinate.
    #[builder(default)]
    fail_on_non_finite: bool,
    /// Keep every `IterationRecord` in the returned `Minimum`.
    #[builder(default)]
    collect_trace: bool,
}

impl<A: Scalar> GradientDescentBuilder<A> {
    pub fn gradient<F>(&mut self, gradient: F) -> &mut Self
    where
        F: Fn(ArrayView1<A>) -> Array1<A> + Send + Sync + 'static,
    {
        let gradient: GradientFn<A> = Arc::new(move |x| Ok(gradient(x)));
        self.gradient = Some(gradient);
        self
    }

    /// Sets a gradient that may fail. An `Err` aborts the run with
    /// `ComputationError::Gradient`.
    pub fn try_gradient<F, E>(&mut self, gradient: F) -> &mut Self
    where
        F: Fn(ArrayView1<A>) -> std::result::Result<Array1<A>, E> + Send + Sync + 'static,
        E: Into<GradientError>,
    {
        let gradient: GradientFn<A> = Arc::new(move |x| gradient(x).map_err(Into::into));
        self.gradient = Some(gradient);
        self
    }

    fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        if let Some(learning_rate) = self.learning_rate {
            check_positive("learning_rate", learning_rate)?;
        }
        if let Some(tol) = self.tol {
            check_positive("tol", tol)?;
        }
        Ok(())
    }
}

fn check_positive<A: Scalar>(
    name: &'static str,
    value: A,
) -> std::result::Result<(), ConfigurationError> {
    if value.is_finite() && value > A::zero() {
        return Ok(());
    }
    Err(ConfigurationError::InvalidParameter {
        name,
        value: value.to_f64().unwrap_or(f64::NAN),
    })
}

/// Outcome of a descent run.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum<A> {
    pub coordinate: Array1<A>,
    /// Gradient evaluations made by this run.
    pub iterations: usize,
    /// Length of the last step taken, `None` if no step was taken.
    pub step_size: Option<A>,
    /// `false` when the run stopped on the iteration cap.
    pub converged: bool,
    pub history: Option<Vec<IterationRecord<A>>>,
}

impl<A: Scalar> GradientDescent<A> {
    pub fn builder() -> GradientDescentBuilder<A> {
        GradientDescentBuilder::default()
    }

    pub fn learning_rate(&self) -> A {
        self.learning_rate
    }

    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    pub fn tol(&self) -> A {
        self.tol
    }

    pub fn fail_on_non_finite(&self) -> bool {
        self.fail_on_non_finite
    }

    pub fn collect_trace(&self) -> bool {
        self.collect_trace
    }

    /// Descends from `coordinate` and returns the final point. A run that
    /// hits the iteration cap is not an error; its last coordinate is
    /// returned as is.
    pub fn find_minimum(&self, coordinate: Array1<A>) -> Result<Array1<A>> {
        self.find_minimum_from(coordinate, 0)
    }

    /// Continues a search whose first `iteration` steps were already taken.
    pub fn find_minimum_from(&self, coordinate: Array1<A>, iteration: usize) -> Result<Array1<A>> {
        self.minimize_from(coordinate, iteration)
            .map(|minimum| minimum.coordinate)
    }

    pub fn minimize(&self, coordinate: Array1<A>) -> Result<Minimum<A>> {
        self.minimize_from(coordinate, 0)
    }

    pub fn minimize_from(&self, mut coordinate: Array1<A>, iteration: usize) -> Result<Minimum<A>> {
        let mut history = self.collect_trace.then(Vec::new);
        let mut step_size = None;

        for k in iteration..self.max_iters {
            let step = self.step(coordinate.view(), k)?;
            let new_coordinate = &coordinate + &step;
            let size = step.dot(&step).sqrt();
            step_size = Some(size);

            if self.collect_trace || log_enabled!(Level::Trace) {
                let record = IterationRecord {
                    iteration: k,
                    coordinate: new_coordinate.clone(),
                    step_size: size,
                };
                trace!("{record}");
                if let Some(history) = history.as_mut() {
                    history.push(record);
                }
            }

            if size < self.tol {
                debug!("converged at iteration {k}: {new_coordinate}");
                return Ok(Minimum {
                    coordinate: new_coordinate,
                    iterations: k - iteration + 1,
                    step_size,
                    converged: true,
                    history,
                });
            }
            coordinate = new_coordinate;
        }

        debug!(
            "returning {coordinate} after reaching the cap of {} iterations",
            self.max_iters
        );
        Ok(Minimum {
            coordinate,
            iterations: self.max_iters.saturating_sub(iteration),
            step_size,
            converged: false,
            history,
        })
    }

    /// `-learning_rate * gradient(coordinate)`, checked for shape and,
    /// optionally, finiteness.
    fn step(
        &self,
        coordinate: ArrayView1<A>,
        iteration: usize,
    ) -> std::result::Result<Array1<A>, ComputationError> {
        let gradient = (self.gradient)(coordinate)
            .map_err(|source| ComputationError::Gradient { iteration, source })?;
        if gradient.len() != coordinate.len() {
            return Err(ComputationError::DimensionMismatch {
                iteration,
                expected: coordinate.len(),
                got: gradient.len(),
            });
        }
        if self.fail_on_non_finite && !gradient.iter().all(|g| g.is_finite()) {
            return Err(ComputationError::NonFinite { iteration });
        }
        let learning_rate = self.learning_rate;
        Ok(gradient.mapv_into(|g| -(learning_rate * g)))
    }
}

impl<A: Scalar> fmt::Debug for GradientDescent<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradientDescent")
            .field("learning_rate", &self.learning_rate)
            .field("max_iters", &self.max_iters)
            .field("tol", &self.tol)
            .field("fail_on_non_finite", &self.fail_on_non_finite)
            .field("collect_trace", &self.collect_trace)
            .finish_non_exhaustive()
    }
}
