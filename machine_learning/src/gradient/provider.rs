use ndarray::{ArrayView1, ArrayView2};

use crate::{
    Result,
    arch::{Model, loss::LossFn},
    params::{Gradient, ParamSet},
};

/// Computes the gradient of the summed batch loss with respect to every parameter.
///
/// The training loop is agnostic to how this happens: analytically, numerically or through any
/// other differentiation scheme.
///
/// Implementations must be deterministic for identical inputs and must not modify `params`.
pub trait GradientProvider<M: Model, L: LossFn> {
    /// Computes the gradient at the current parameters.
    ///
    /// # Arguments
    /// * `params` - The current parameters.
    /// * `x` - The feature batch.
    /// * `y` - The targets of the batch.
    /// * `model` - The model being trained.
    /// * `loss_fn` - The loss function.
    ///
    /// # Returns
    /// `d(sum_i loss_i) / dparams`, shaped like `params`.
    fn gradient(
        &self,
        params: &ParamSet,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        model: &M,
        loss_fn: &L,
    ) -> Result<Gradient>;
}
