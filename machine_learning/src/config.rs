use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{MlErr, Result, dataset::SyntheticSpec};

/// Every knob of a synthetic linear regression run.
///
/// Missing fields fall back to their defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub num_examples: usize,
    pub num_inputs: usize,
    pub true_weights: Vec<f64>,
    pub true_bias: f64,
    pub noise_std: f64,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub num_epochs: usize,
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_examples: 1000,
            num_inputs: 2,
            true_weights: vec![2., -3.4],
            true_bias: 4.2,
            noise_std: 0.01,
            batch_size: 10,
            learning_rate: 0.03,
            num_epochs: 3,
            seed: 42,
        }
    }
}

impl TrainingConfig {
    /// Checks every hyperparameter, before any training step is taken.
    ///
    /// # Returns
    /// The first invalid field found, as an `MlErr::InvalidConfig`.
    pub fn validate(&self) -> Result<()> {
        self.synthetic_spec().validate()?;
        self.batch_size()?;

        if !(self.learning_rate.is_finite() && self.learning_rate > 0.) {
            return Err(MlErr::invalid_config(
                "learning_rate",
                format!("must be finite and positive, got {}", self.learning_rate),
            ));
        }

        Ok(())
    }

    /// Returns the dataset part of the config.
    pub fn synthetic_spec(&self) -> SyntheticSpec {
        SyntheticSpec {
            num_examples: self.num_examples,
            num_inputs: self.num_inputs,
            true_weights: self.true_weights.clone(),
            true_bias: self.true_bias,
            noise_std: self.noise_std,
        }
    }

    /// Returns the batch size, or an error if it is 0.
    pub fn batch_size(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.batch_size)
            .ok_or_else(|| MlErr::invalid_config("batch_size", "must be greater than 0"))
    }
}
