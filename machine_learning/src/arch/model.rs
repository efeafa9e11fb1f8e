use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::{
    Result,
    params::{Gradient, ParamLayout, ParamSet},
};

/// A pure function of a feature batch and a parameter set.
///
/// A `Model` does not own its parameters, it only describes their layout and how to evaluate
/// itself with them. Calls share no mutable state.
pub trait Model {
    /// Returns the layout of the parameters this model expects.
    fn layout(&self) -> ParamLayout;

    /// Computes one prediction per row of `x`.
    ///
    /// # Arguments
    /// * `params` - The model's parameters.
    /// * `x` - The feature batch, one sample per row.
    ///
    /// # Returns
    /// The predictions, or a shape mismatch if `params` or `x` don't fit the model.
    fn predict(&self, params: &ParamSet, x: ArrayView2<f64>) -> Result<Array1<f64>>;
}

/// A `Model` that knows its own derivatives.
pub trait DifferentiableModel: Model {
    /// Backpropagates the derivative of the loss with respect to each prediction into the
    /// parameters.
    ///
    /// # Arguments
    /// * `params` - The parameters the predictions were made with.
    /// * `x` - The feature batch.
    /// * `d_pred` - `dloss_i / dprediction_i` for every row of `x`.
    ///
    /// # Returns
    /// The gradient of the loss summed over the batch.
    fn backward(
        &self,
        params: &ParamSet,
        x: ArrayView2<f64>,
        d_pred: ArrayView1<f64>,
    ) -> Result<Gradient>;
}
