use std::num::NonZeroUsize;

use rand::Rng;
use tokio_util::sync::CancellationToken;

use super::{Trainer, TrainerState};
use crate::{
    MlErr, Result,
    arch::{Model, loss::LossFn},
    dataset::Dataset,
    gradient::GradientProvider,
    initialization::init_params,
    optimization::Optimizer,
    params::ParamSet,
    sampler::BatchSampler,
};

pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_NUM_EPOCHS: usize = 3;

/// Builds `Trainer`s out of their components.
pub struct TrainerBuilder<M, L, G, O> {
    model: M,
    loss_fn: L,
    grad_provider: G,
    optimizer: O,

    batch_size: usize,
    num_epochs: usize,
    params: Option<ParamSet>,
    cancel: Option<CancellationToken>,
}

impl<M, L, G, O> TrainerBuilder<M, L, G, O>
where
    M: Model,
    L: LossFn,
    G: GradientProvider<M, L>,
    O: Optimizer,
{
    /// Creates a new `TrainerBuilder`.
    ///
    /// # Arguments
    /// * `model` - The model that will be trained.
    /// * `loss_fn` - The loss function used to measure the difference between a model's output
    ///   and the expected one.
    /// * `grad_provider` - How to differentiate the loss with respect to the parameters.
    /// * `optimizer` - The optimizer that dictates how to update the parameters on each batch.
    pub fn new(model: M, loss_fn: L, grad_provider: G, optimizer: O) -> Self {
        Self {
            model,
            loss_fn,
            grad_provider,
            optimizer,
            batch_size: DEFAULT_BATCH_SIZE,
            num_epochs: DEFAULT_NUM_EPOCHS,
            params: None,
            cancel: None,
        }
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn num_epochs(mut self, num_epochs: usize) -> Self {
        self.num_epochs = num_epochs;
        self
    }

    /// Starts training from these parameters instead of the default initialization.
    pub fn params(mut self, params: ParamSet) -> Self {
        self.params = Some(params);
        self
    }

    /// Lets the caller cancel the run between minibatches.
    pub fn cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Validates the setup and initializes the parameters.
    ///
    /// Unless explicit parameters were given, biases start at zero and every other tensor is
    /// drawn from `rng` with a small deviation.
    ///
    /// # Arguments
    /// * `dataset` - The dataset the model will be trained with.
    /// * `rng` - The random number generator for initialization and shuffling.
    ///
    /// # Returns
    /// A trainer ready to run its first epoch, or an invalid configuration error.
    pub fn build<R: Rng>(self, dataset: Dataset, mut rng: R) -> Result<Trainer<M, L, G, O, R>> {
        let batch_size = NonZeroUsize::new(self.batch_size)
            .ok_or_else(|| MlErr::invalid_config("batch_size", "must be greater than 0"))?;

        let layout = self.model.layout();

        let params = match self.params {
            Some(params) => {
                params.check_layout(&layout)?;
                params
            }
            None => init_params(layout, &mut rng)?,
        };

        Ok(Trainer {
            model: self.model,
            loss_fn: self.loss_fn,
            grad_provider: self.grad_provider,
            optimizer: self.optimizer,
            dataset,
            sampler: BatchSampler::new(batch_size),
            params,
            rng,
            cancel: self.cancel.unwrap_or_default(),
            num_epochs: self.num_epochs,
            epoch: 0,
            step: 0,
            state: TrainerState::Initializing,
            history: Vec::new(),
        })
    }
}
