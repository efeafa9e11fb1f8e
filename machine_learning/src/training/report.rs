use std::fmt;

use ndarray::{Array1, ArrayView1};

use crate::{MlErr, Result, params::ParamSet};

/// Statistics of a single completed epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    /// The 1-based epoch index.
    pub epoch: usize,
    /// The mean loss over the whole dataset with the parameters at the end of the epoch.
    pub loss: f64,
    /// The amount of minibatches processed during the epoch.
    pub steps: usize,
}

impl fmt::Display for EpochStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch {}, loss {}", self.epoch, self.loss)
    }
}

/// The outcome of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub history: Vec<EpochStats>,
    pub steps: usize,
    pub params: ParamSet,
}

impl TrainReport {
    /// Returns the loss reported after the last epoch, if any ran.
    pub fn final_loss(&self) -> Option<f64> {
        self.history.last().map(|stats| stats.loss)
    }

    /// Compares the learned parameters against a known ground truth.
    ///
    /// # Arguments
    /// * `true_weights` - The weights the data was generated with.
    /// * `true_bias` - The bias the data was generated with.
    ///
    /// # Returns
    /// `truth - learned` for both tensors, or a shape mismatch if the learned parameters don't
    /// hold a `weights` tensor of the same length and a `bias`.
    pub fn estimation_error(&self, true_weights: &[f64], true_bias: f64) -> Result<EstimationError> {
        let missing = |what| MlErr::ShapeMismatch {
            what,
            got: 0,
            expected: 1,
        };

        let w = self.params.tensor("weights").ok_or_else(|| missing("weights"))?;
        let b = self.params.tensor("bias").ok_or_else(|| missing("bias"))?;
        MlErr::check_len("true weights", true_weights.len(), w.len())?;
        MlErr::check_len("bias", b.len(), 1)?;

        Ok(EstimationError {
            weights: &ArrayView1::from(true_weights) - &w,
            bias: true_bias - b[0],
        })
    }
}

/// The difference between ground truth and learned parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationError {
    pub weights: Array1<f64>,
    pub bias: f64,
}

impl EstimationError {
    /// Returns the largest absolute error over every parameter.
    pub fn max_abs(&self) -> f64 {
        self.weights
            .iter()
            .fold(self.bias.abs(), |acc, e| acc.max(e.abs()))
    }
}

impl fmt::Display for EstimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error in estimating weights: {}", self.weights)?;
        write!(f, "error in estimating bias: {}", self.bias)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::params::ParamLayout;

    fn report(values: Array1<f64>) -> TrainReport {
        let layout = ParamLayout::new([("weights", values.len() - 1), ("bias", 1)]);
        TrainReport {
            history: vec![],
            steps: 0,
            params: ParamSet::new(layout, values).unwrap(),
        }
    }

    #[test]
    fn epoch_line_format() {
        let stats = EpochStats {
            epoch: 2,
            loss: 0.5,
            steps: 100,
        };
        assert_eq!(stats.to_string(), "epoch 2, loss 0.5");
    }

    #[test]
    fn error_is_truth_minus_learned() {
        let err = report(array![1.5, -3., 4.])
            .estimation_error(&[2., -3.5], 4.25)
            .unwrap();

        assert_eq!(err.weights, array![0.5, -0.5]);
        assert_eq!(err.bias, 0.25);
        assert_eq!(err.max_abs(), 0.5);
    }

    #[test]
    fn error_needs_matching_weights() {
        let err = report(array![1., 2., 3.])
            .estimation_error(&[1.], 0.)
            .unwrap_err();
        assert!(matches!(err, MlErr::ShapeMismatch { got: 1, expected: 2, .. }));
    }

    #[test]
    fn final_loss_of_empty_history() {
        assert_eq!(report(array![0., 0.]).final_loss(), None);
    }
}
