use machine_learning::{
    Result,
    arch::{DifferentiableModel, LinearRegression, Model, loss::SquaredLoss},
    gradient::{Backprop, FiniteDifference, FnGradient, GradientProvider},
    params::{Gradient, ParamLayout, ParamSet},
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use ndarray_rand::RandomExt;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;

const TRIALS: usize = 20;

fn assert_close(analytic: &Gradient, numeric: &Gradient) {
    assert_eq!(analytic.layout(), numeric.layout());

    for (a, n) in analytic.values().iter().zip(numeric.values()) {
        let scale = a.abs().max(n.abs()).max(1e-6);
        assert!(
            (a - n).abs() / scale <= 1e-2,
            "analytic {} vs numeric {}",
            analytic.values(),
            numeric.values()
        );
    }
}

fn random_case(
    rng: &mut StdRng,
    layout: ParamLayout,
    num_inputs: usize,
) -> (ParamSet, Array2<f64>, Array1<f64>) {
    let batch_size = rng.random_range(1..=16);
    let values = Array1::random_using(layout.size(), StandardNormal, rng);
    let params = ParamSet::new(layout, values).unwrap();
    let x = Array2::random_using((batch_size, num_inputs), StandardNormal, rng);
    let y = Array1::random_using(batch_size, StandardNormal, rng);
    (params, x, y)
}

#[test]
fn analytic_linear_gradient_matches_central_differences() {
    let mut rng = StdRng::seed_from_u64(1234);
    let numeric = FiniteDifference::new(1e-4).unwrap();

    for _ in 0..TRIALS {
        let num_inputs = rng.random_range(1..=5);
        let model = LinearRegression::new(num_inputs);
        let (params, x, y) = random_case(&mut rng, model.layout(), num_inputs);

        let a = Backprop
            .gradient(&params, x.view(), y.view(), &model, &SquaredLoss)
            .unwrap();
        let n = numeric
            .gradient(&params, x.view(), y.view(), &model, &SquaredLoss)
            .unwrap();

        assert_close(&a, &n);
    }
}

#[test]
fn closed_form_function_matches_backprop() {
    let closed_form = FnGradient::new(|p: &ParamSet, x: ArrayView2<f64>, y: ArrayView1<f64>| {
        let (w, b) = (p.tensor("weights").unwrap(), p.tensor("bias").unwrap()[0]);
        let r = x.dot(&w) + b - y;

        let mut values = x.t().dot(&r).to_vec();
        values.push(r.sum());
        Gradient::new(p.layout().clone(), Array1::from_vec(values))
    });

    let mut rng = StdRng::seed_from_u64(99);
    let model = LinearRegression::new(3);

    for _ in 0..TRIALS {
        let (params, x, y) = random_case(&mut rng, model.layout(), 3);

        let a = Backprop
            .gradient(&params, x.view(), y.view(), &model, &SquaredLoss)
            .unwrap();
        let c = closed_form
            .gradient(&params, x.view(), y.view(), &model, &SquaredLoss)
            .unwrap();

        assert_close(&a, &c);
    }
}

/// `prediction_i = scale * tanh(x_i · weights) + bias`, a nonlinear model plugged into the same
/// gradient machinery.
struct TanhRegression {
    num_inputs: usize,
}

impl Model for TanhRegression {
    fn layout(&self) -> ParamLayout {
        ParamLayout::new([("weights", self.num_inputs), ("scale", 1), ("bias", 1)])
    }

    fn predict(&self, params: &ParamSet, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        let w = params.tensor("weights").unwrap();
        let scale = params.tensor("scale").unwrap()[0];
        let bias = params.tensor("bias").unwrap()[0];
        Ok(x.dot(&w).mapv_into(|z| scale * z.tanh() + bias))
    }
}

impl DifferentiableModel for TanhRegression {
    fn backward(
        &self,
        params: &ParamSet,
        x: ArrayView2<f64>,
        d_pred: ArrayView1<f64>,
    ) -> Result<Gradient> {
        let w = params.tensor("weights").unwrap();
        let scale = params.tensor("scale").unwrap()[0];
        let t = x.dot(&w).mapv_into(f64::tanh);

        let dz = &d_pred * &t.mapv(|t| scale * (1. - t * t));
        let mut grad = Gradient::zeros_like(params);
        grad.tensor_mut("weights").unwrap().assign(&x.t().dot(&dz));
        grad.tensor_mut("scale").unwrap()[0] = (&d_pred * &t).sum();
        grad.tensor_mut("bias").unwrap()[0] = d_pred.sum();
        Ok(grad)
    }
}

#[test]
fn nonlinear_backprop_matches_central_differences() {
    let mut rng = StdRng::seed_from_u64(5);
    let numeric = FiniteDifference::default();

    for _ in 0..TRIALS {
        let model = TanhRegression { num_inputs: 2 };
        let (params, x, y) = random_case(&mut rng, model.layout(), 2);

        let a = Backprop
            .gradient(&params, x.view(), y.view(), &model, &SquaredLoss)
            .unwrap();
        let n = numeric
            .gradient(&params, x.view(), y.view(), &model, &SquaredLoss)
            .unwrap();

        assert_close(&a, &n);
    }
}

#[test]
fn providers_are_deterministic_and_side_effect_free() {
    let mut rng = StdRng::seed_from_u64(3);
    let model = LinearRegression::new(2);
    let (params, x, y) = random_case(&mut rng, model.layout(), 2);
    let before = params.clone();

    let numeric = FiniteDifference::default();
    let first = numeric
        .gradient(&params, x.view(), y.view(), &model, &SquaredLoss)
        .unwrap();
    let second = numeric
        .gradient(&params, x.view(), y.view(), &model, &SquaredLoss)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(params, before);
}
