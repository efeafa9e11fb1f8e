use log::info;
use rand::{SeedableRng, rngs::StdRng};
use tokio_util::sync::CancellationToken;

use super::{EpochStats, EstimationError, TrainReport, TrainerBuilder};
use crate::{
    Result,
    arch::{LinearRegression, loss::SquaredLoss},
    config::TrainingConfig,
    dataset::Dataset,
    gradient::Backprop,
    optimization::GradientDescent,
};

/// The outcome of training on synthetic data with a known ground truth.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticRun {
    pub report: TrainReport,
    pub error: EstimationError,
}

/// Generates a synthetic linear dataset from `config` and fits a linear regression to it with
/// squared loss, analytic gradients and minibatch gradient descent.
///
/// A single generator seeded with `config.seed` draws the data, the initial parameters and
/// every epoch's shuffle, so equal configs give equal runs.
///
/// # Arguments
/// * `config` - The run's configuration, validated before anything else.
/// * `cancel` - Cancels the run at the next minibatch boundary.
/// * `on_epoch` - Receives each epoch's statistics as soon as it completes.
///
/// # Returns
/// The training report and the parameter estimation error.
pub fn train_synthetic<F>(
    config: &TrainingConfig,
    cancel: CancellationToken,
    on_epoch: F,
) -> Result<SyntheticRun>
where
    F: FnMut(&EpochStats),
{
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let dataset = Dataset::synthetic(&config.synthetic_spec(), &mut rng)?;

    info!(
        "generated {} examples with {} features, noise_std={}",
        dataset.len(),
        dataset.num_inputs(),
        config.noise_std
    );

    let model = LinearRegression::new(config.num_inputs);
    let optimizer = GradientDescent::new(config.learning_rate)?;

    let mut trainer = TrainerBuilder::new(model, SquaredLoss, Backprop, optimizer)
        .batch_size(config.batch_size)
        .num_epochs(config.num_epochs)
        .cancel_token(cancel)
        .build(dataset, rng)?;

    let report = trainer.train_with(on_epoch)?;
    let error = report.estimation_error(&config.true_weights, config.true_bias)?;

    Ok(SyntheticRun { report, error })
}
