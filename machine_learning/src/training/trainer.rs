use log::{debug, info, warn};
use rand::Rng;
use tokio_util::sync::CancellationToken;

use super::{EpochStats, TrainReport, TrainerState};
use crate::{
    MlErr, Result,
    arch::{Model, loss::LossFn},
    dataset::Dataset,
    gradient::GradientProvider,
    optimization::Optimizer,
    params::ParamSet,
    sampler::BatchSampler,
};

/// Drives minibatch training of a model over a dataset for a fixed amount of epochs.
///
/// Every minibatch runs predict, loss, gradient and update in that order, strictly one after the
/// other, so each gradient is taken at the parameters left by the previous update. The trainer
/// exclusively owns the parameters and only lends them mutably to the optimizer.
///
/// Built through `TrainerBuilder`.
pub struct Trainer<M, L, G, O, R>
where
    M: Model,
    L: LossFn,
    G: GradientProvider<M, L>,
    O: Optimizer,
    R: Rng,
{
    pub(super) model: M,
    pub(super) loss_fn: L,
    pub(super) grad_provider: G,
    pub(super) optimizer: O,

    pub(super) dataset: Dataset,
    pub(super) sampler: BatchSampler,
    pub(super) params: ParamSet,
    pub(super) rng: R,
    pub(super) cancel: CancellationToken,

    pub(super) num_epochs: usize,
    pub(super) epoch: usize,
    pub(super) step: usize,
    pub(super) state: TrainerState,
    pub(super) history: Vec<EpochStats>,
}

impl<M, L, G, O, R> Trainer<M, L, G, O, R>
where
    M: Model,
    L: LossFn,
    G: GradientProvider<M, L>,
    O: Optimizer,
    R: Rng,
{
    pub fn state(&self) -> TrainerState {
        self.state
    }

    /// Returns the amount of completed epochs.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    /// Returns the amount of parameter updates taken so far.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn num_epochs(&self) -> usize {
        self.num_epochs
    }

    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn history(&self) -> &[EpochStats] {
        &self.history
    }

    /// Returns a handle that cancels this run at the next minibatch boundary.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Computes the mean loss over the whole dataset with the current parameters.
    pub fn full_loss(&self) -> Result<f64> {
        let y_pred = self.model.predict(&self.params, self.dataset.features())?;
        self.loss_fn.mean_loss(y_pred.view(), self.dataset.labels())
    }

    /// Runs a single epoch.
    ///
    /// # Returns
    /// The epoch's statistics, `None` once every epoch ran, or the error that aborted the run.
    /// After an error the trainer is `Aborted` and won't run again.
    pub fn run_epoch(&mut self) -> Result<Option<EpochStats>> {
        if self.state.is_terminal() {
            return Ok(None);
        }

        if self.epoch == self.num_epochs {
            self.finish();
            return Ok(None);
        }

        match self.try_run_epoch() {
            Ok(stats) => Ok(Some(stats)),
            Err(e) => {
                self.state = TrainerState::Aborted;
                warn!("training aborted: {e}");
                Err(e)
            }
        }
    }

    /// Runs every remaining epoch, see `train_with`.
    pub fn train(&mut self) -> Result<TrainReport> {
        self.train_with(|_| {})
    }

    /// Runs every remaining epoch, handing each epoch's statistics to `on_epoch` as soon as
    /// it completes.
    ///
    /// # Returns
    /// The run's report, or the first error found.
    pub fn train_with<F>(&mut self, mut on_epoch: F) -> Result<TrainReport>
    where
        F: FnMut(&EpochStats),
    {
        while let Some(stats) = self.run_epoch()? {
            on_epoch(&stats);
        }

        Ok(self.report())
    }

    /// Returns a snapshot of the run so far.
    pub fn report(&self) -> TrainReport {
        TrainReport {
            history: self.history.clone(),
            steps: self.step,
            params: self.params.clone(),
        }
    }

    /// Consumes the trainer, handing over the learned parameters.
    pub fn into_params(self) -> ParamSet {
        self.params
    }

    fn try_run_epoch(&mut self) -> Result<EpochStats> {
        let epoch = self.epoch + 1;
        self.state = TrainerState::EpochRunning { epoch };

        let batches = self.sampler.iterate(&self.dataset, &mut self.rng);
        let mut steps = 0;

        for batch in batches {
            if self.cancel.is_cancelled() {
                return Err(MlErr::Cancelled {
                    epoch,
                    step: self.step,
                });
            }

            let y_pred = self.model.predict(&self.params, batch.x())?;
            let batch_loss = self.loss_fn.mean_loss(y_pred.view(), batch.y())?;

            let grad = self.grad_provider.gradient(
                &self.params,
                batch.x(),
                batch.y(),
                &self.model,
                &self.loss_fn,
            )?;

            self.optimizer
                .update_params(&mut self.params, &grad, batch.len())?;

            self.step += 1;
            steps += 1;
            debug!(epoch = epoch, step = self.step, batch_size = batch.len(); "batch loss {batch_loss}");
        }

        self.state = TrainerState::EpochComplete { epoch };

        let loss = self.full_loss()?;
        if !loss.is_finite() {
            return Err(MlErr::NumericDivergence { epoch, loss });
        }

        let stats = EpochStats { epoch, loss, steps };
        info!("{stats}");

        self.epoch = epoch;
        self.history.push(stats);

        if self.epoch == self.num_epochs {
            self.finish();
        }

        Ok(stats)
    }

    fn finish(&mut self) {
        self.state = TrainerState::Finished;
        info!(
            "training finished after {} epochs and {} steps",
            self.epoch, self.step
        );
    }
}
