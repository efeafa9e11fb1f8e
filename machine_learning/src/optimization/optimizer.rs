use crate::{
    Result,
    params::{Gradient, ParamSet},
};

/// An optimization algorithm: the only writer of a model's parameters during training.
pub trait Optimizer {
    /// Updates the parameters in place according to the algorithm's learning rule.
    ///
    /// # Arguments
    /// * `params` - The parameters that are going to be modified.
    /// * `grad` - The gradient of the loss summed over the current batch.
    /// * `batch_size` - The amount of examples `grad` was summed over.
    ///
    /// # Returns
    /// A shape mismatch if `grad` doesn't match `params`.
    fn update_params(
        &mut self,
        params: &mut ParamSet,
        grad: &Gradient,
        batch_size: usize,
    ) -> Result<()>;
}
