use ndarray::{ArrayView1, ArrayView2};

use super::GradientProvider;
use crate::{
    Result,
    arch::{DifferentiableModel, loss::LossFn},
    params::{Gradient, ParamSet},
};

/// Analytic gradients through the chain rule: the loss derivative with respect to each
/// prediction is backpropagated by the model itself.
///
/// For a linear model under squared loss this is `X^T (Xw + b - y)` for the weights and
/// `sum(Xw + b - y)` for the bias.
#[derive(Debug, Default, Clone, Copy)]
pub struct Backprop;

impl<M, L> GradientProvider<M, L> for Backprop
where
    M: DifferentiableModel,
    L: LossFn,
{
    fn gradient(
        &self,
        params: &ParamSet,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        model: &M,
        loss_fn: &L,
    ) -> Result<Gradient> {
        let y_pred = model.predict(params, x)?;
        let d_pred = loss_fn.loss_prime(y_pred.view(), y)?;
        model.backward(params, x, d_pred.view())
    }
}
