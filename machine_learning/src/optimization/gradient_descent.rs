use super::Optimizer;
use crate::{
    MlErr, Result,
    params::{Gradient, ParamSet},
};

/// Minibatch stochastic gradient descent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`, must be finite
    ///   and positive.
    pub fn new(learning_rate: f64) -> Result<Self> {
        if !(learning_rate.is_finite() && learning_rate > 0.) {
            return Err(MlErr::invalid_config(
                "learning_rate",
                format!("must be finite and positive, got {learning_rate}"),
            ));
        }

        Ok(Self { learning_rate })
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the batch averaged gradient:
    /// `p <- p - learning_rate * g / batch_size`.
    ///
    /// Normalizing by the size of the batch at hand keeps the step independent of it, including
    /// a smaller last batch.
    fn update_params(
        &mut self,
        params: &mut ParamSet,
        grad: &Gradient,
        batch_size: usize,
    ) -> Result<()> {
        if batch_size == 0 {
            return Err(MlErr::invalid_config("batch_size", "must be greater than 0"));
        }

        grad.check_matches(params)?;

        let lr = self.learning_rate / batch_size as f64;
        params.values_mut().scaled_add(-lr, &grad.values());
        Ok(())
    }
}
