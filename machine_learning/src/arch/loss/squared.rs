use ndarray::{Array1, ArrayView1};

use super::LossFn;
use crate::{MlErr, Result};

/// Halved squared error: `loss_i = (prediction_i - target_i)^2 / 2`.
///
/// The halving keeps the derivative at `prediction_i - target_i`, learning rates are tuned for
/// this convention.
#[derive(Debug, Default, Clone, Copy)]
pub struct SquaredLoss;

impl SquaredLoss {
    /// Returns a new `SquaredLoss`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for SquaredLoss {
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>> {
        MlErr::check_len("targets", y.len(), y_pred.len())?;
        Ok((&y_pred - &y).mapv_into(|e| e * e / 2.))
    }

    fn loss_prime(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>> {
        MlErr::check_len("targets", y.len(), y_pred.len())?;
        Ok(&y_pred - &y)
    }
}
