use ndarray::{ArrayView1, ArrayView2};

use super::GradientProvider;
use crate::{
    Result,
    arch::{Model, loss::LossFn},
    params::{Gradient, ParamSet},
};

/// A gradient provided by a user supplied function of `(params, x, y)`.
///
/// The model and loss are ignored, the function is trusted to differentiate the right loss.
/// Its output is still checked against the shape of `params`.
pub struct FnGradient<F>(F);

impl<F> FnGradient<F>
where
    F: Fn(&ParamSet, ArrayView2<f64>, ArrayView1<f64>) -> Result<Gradient>,
{
    /// Creates a new `FnGradient` wrapping `f`.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<M, L, F> GradientProvider<M, L> for FnGradient<F>
where
    M: Model,
    L: LossFn,
    F: Fn(&ParamSet, ArrayView2<f64>, ArrayView1<f64>) -> Result<Gradient>,
{
    fn gradient(
        &self,
        params: &ParamSet,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        _model: &M,
        _loss_fn: &L,
    ) -> Result<Gradient> {
        let grad = (self.0)(params, x, y)?;
        grad.check_matches(params)?;
        Ok(grad)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array1, array};

    use super::*;
    use crate::{
        MlErr,
        arch::{LinearRegression, loss::SquaredLoss},
        params::ParamLayout,
    };

    #[test]
    fn forwards_the_closure_result() {
        let model = LinearRegression::new(1);
        let params = ParamSet::new(model.layout(), array![0., 0.]).unwrap();

        let provider = FnGradient::new(|p: &ParamSet, _x: ArrayView2<f64>, y: ArrayView1<f64>| {
            Gradient::new(p.layout().clone(), Array1::from_elem(p.len(), y.sum()))
        });

        let grad = provider
            .gradient(&params, array![[1.]].view(), array![3.].view(), &model, &SquaredLoss)
            .unwrap();
        assert_eq!(grad.values(), array![3., 3.]);
    }

    #[test]
    fn rejects_misshaped_gradients() {
        let model = LinearRegression::new(1);
        let params = ParamSet::new(model.layout(), array![0., 0.]).unwrap();

        let provider = FnGradient::new(|_: &ParamSet, _: ArrayView2<f64>, _: ArrayView1<f64>| {
            Gradient::new(ParamLayout::new([("weights", 3)]), Array1::zeros(3))
        });

        let err = provider
            .gradient(&params, array![[1.]].view(), array![3.].view(), &model, &SquaredLoss)
            .unwrap_err();
        assert!(matches!(err, MlErr::ShapeMismatch { what: "gradient", .. }));
    }
}
