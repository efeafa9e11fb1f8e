use ndarray::{Array1, ArrayView1};

use crate::Result;

/// A differentiable per example loss.
///
/// Predictions and targets must have the same length, implementations fail with a shape
/// mismatch instead of broadcasting.
pub trait LossFn {
    /// Computes the loss of every example.
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>>;

    /// Computes `dloss_i / dprediction_i` for every example.
    fn loss_prime(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>>;

    /// Computes the mean loss over the batch, used for monitoring only.
    fn mean_loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        Ok(self.loss(y_pred, y)?.mean().unwrap_or_default())
    }

    /// Computes the loss summed over the batch, the quantity gradients are taken of.
    fn total_loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
        Ok(self.loss(y_pred, y)?.sum())
    }
}
