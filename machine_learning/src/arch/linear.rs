use ndarray::{Array1, ArrayView1, ArrayView2};

use super::{DifferentiableModel, Model};
use crate::{
    MlErr, Result,
    params::{Gradient, ParamLayout, ParamSet},
};

/// Linear regression: `prediction_i = x_i · weights + bias`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearRegression {
    num_inputs: usize,
}

impl LinearRegression {
    /// Creates a new `LinearRegression` over `num_inputs` features.
    pub fn new(num_inputs: usize) -> Self {
        Self { num_inputs }
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Splits the parameters into `(weights, bias)` after checking they fit this model.
    fn view_params<'a>(&self, params: &'a ParamSet) -> Result<(ArrayView1<'a, f64>, f64)> {
        params.check_layout(&self.layout())?;

        let not_found = |what| MlErr::ShapeMismatch {
            what,
            got: 0,
            expected: 1,
        };

        let w = params.tensor("weights").ok_or_else(|| not_found("weights"))?;
        let b = params.tensor("bias").ok_or_else(|| not_found("bias"))?;
        Ok((w, b[0]))
    }
}

impl Model for LinearRegression {
    fn layout(&self) -> ParamLayout {
        ParamLayout::new([("weights", self.num_inputs), ("bias", 1)])
    }

    fn predict(&self, params: &ParamSet, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        MlErr::check_len("features", x.ncols(), self.num_inputs)?;
        let (w, b) = self.view_params(params)?;

        Ok(x.dot(&w) + b)
    }
}

impl DifferentiableModel for LinearRegression {
    fn backward(
        &self,
        params: &ParamSet,
        x: ArrayView2<f64>,
        d_pred: ArrayView1<f64>,
    ) -> Result<Gradient> {
        MlErr::check_len("features", x.ncols(), self.num_inputs)?;
        MlErr::check_len("prediction deltas", d_pred.len(), x.nrows())?;
        self.view_params(params)?;

        let mut grad = Gradient::zeros_like(params);

        if let Some(mut dw) = grad.tensor_mut("weights") {
            dw.assign(&x.t().dot(&d_pred));
        }

        if let Some(mut db) = grad.tensor_mut("bias") {
            db[0] = d_pred.sum();
        }

        Ok(grad)
    }
}
