use ndarray::{ArrayView1, ArrayView2};

use super::GradientProvider;
use crate::{
    MlErr, Result,
    arch::{Model, loss::LossFn},
    params::{Gradient, ParamSet},
};

/// The default perturbation for `FiniteDifference`.
pub const DEFAULT_STEP: f64 = 1e-4;

/// Numerical gradients by central differences on the summed batch loss:
/// `(L(p + h e_i) - L(p - h e_i)) / 2h` for every parameter `i`.
///
/// Works with any model, at the price of two forward passes per parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDifference {
    step: f64,
}

impl FiniteDifference {
    /// Creates a new `FiniteDifference`.
    ///
    /// # Arguments
    /// * `step` - The perturbation `h`, must be finite and positive.
    pub fn new(step: f64) -> Result<Self> {
        if !(step.is_finite() && step > 0.) {
            return Err(MlErr::invalid_config(
                "step",
                format!("must be finite and positive, got {step}"),
            ));
        }

        Ok(Self { step })
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Default for FiniteDifference {
    fn default() -> Self {
        Self { step: DEFAULT_STEP }
    }
}

impl<M, L> GradientProvider<M, L> for FiniteDifference
where
    M: Model,
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
        let h = self.step;
        let mut shifted = params.clone();
        let mut grad = Gradient::zeros_like(params);

        let total_loss = |shifted: &ParamSet| -> Result<f64> {
            let y_pred = model.predict(shifted, x)?;
            loss_fn.total_loss(y_pred.view(), y)
        };

        for i in 0..params.len() {
            let p = params.values()[i];

            shifted.values_mut()[i] = p + h;
            let plus = total_loss(&shifted)?;

            shifted.values_mut()[i] = p - h;
            let minus = total_loss(&shifted)?;

            shifted.values_mut()[i] = p;
            grad.values_mut()[i] = (plus - minus) / (2. * h);
        }

        Ok(grad)
    }
}
