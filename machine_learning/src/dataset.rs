use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_rand::RandomExt;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Normal, StandardNormal};

use crate::{MlErr, Result};

/// The size and ground truth of a synthetic linear dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSpec {
    pub num_examples: usize,
    pub num_inputs: usize,
    pub true_weights: Vec<f64>,
    pub true_bias: f64,
    /// The deviation of the label noise, 0 yields exact labels.
    pub noise_std: f64,
}

impl SyntheticSpec {
    /// Returns the first field that can't describe a dataset.
    pub fn validate(&self) -> Result<()> {
        if self.num_examples == 0 {
            return Err(MlErr::invalid_config("num_examples", "must be greater than 0"));
        }

        if self.true_weights.len() != self.num_inputs {
            return Err(MlErr::invalid_config(
                "true_weights",
                format!(
                    "expected {} weights, got {}",
                    self.num_inputs,
                    self.true_weights.len()
                ),
            ));
        }

        if !self.true_weights.iter().all(|w| w.is_finite()) || !self.true_bias.is_finite() {
            return Err(MlErr::invalid_config(
                "true_weights",
                "ground truth parameters must be finite",
            ));
        }

        if !(self.noise_std.is_finite() && self.noise_std >= 0.) {
            return Err(MlErr::invalid_config(
                "noise_std",
                format!("must be finite and non negative, got {}", self.noise_std),
            ));
        }

        Ok(())
    }
}

/// An in memory supervised dataset: a `(N, d)` feature matrix and its `N` labels.
///
/// Datasets are read only once built, training only ever borrows them.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The feature matrix, one sample per row.
    /// * `y` - The labels, one per row of `x`.
    ///
    /// # Returns
    /// A new `Dataset` or an error if the dataset is empty or the lengths don't match.
    pub fn new(x: Array2<f64>, y: Array1<f64>) -> Result<Self> {
        MlErr::check_len("labels", y.len(), x.nrows())?;

        if x.nrows() == 0 {
            return Err(MlErr::invalid_config("num_examples", "dataset must be non-empty"));
        }

        Ok(Self { x, y })
    }

    /// Creates a new `Dataset` from a row major buffer where each row is `[x_0, ..., x_d-1, y]`.
    ///
    /// # Arguments
    /// * `data` - The raw samples.
    /// * `num_inputs` - The amount of features per sample.
    ///
    /// # Returns
    /// A new `Dataset` or an error if `data` doesn't split into whole rows.
    pub fn from_flat(data: Vec<f64>, num_inputs: usize) -> Result<Self> {
        let row = num_inputs
            .checked_add(1)
            .ok_or_else(|| MlErr::invalid_config("num_inputs", "too many features per row"))?;
        let rem = data.len() % row;
        MlErr::check_len("flat dataset remainder", rem, 0)?;

        let raw = Array2::from_shape_vec((data.len() / row, row), data).map_err(|_| {
            MlErr::ShapeMismatch {
                what: "flat dataset",
                got: rem,
                expected: 0,
            }
        })?;

        let x = raw.slice(ndarray::s![.., ..num_inputs]).to_owned();
        let y = raw.column(num_inputs).to_owned();
        Self::new(x, y)
    }

    /// Generates a synthetic linear dataset `y = x · true_weights + true_bias + noise`.
    ///
    /// Every feature is drawn from a standard normal distribution and the noise from a normal
    /// distribution with mean 0 and `noise_std` deviation, independently per example.
    ///
    /// # Arguments
    /// * `spec` - The size and ground truth of the dataset.
    /// * `rng` - A random number generator.
    ///
    /// # Returns
    /// A new `Dataset` or an invalid configuration error.
    pub fn synthetic<R: Rng + ?Sized>(spec: &SyntheticSpec, rng: &mut R) -> Result<Self> {
        spec.validate()?;

        let shape = (spec.num_examples, spec.num_inputs);
        let x = Array2::<f64>::random_using(shape, StandardNormal, rng);
        let mut y = x.dot(&ArrayView1::from(&spec.true_weights)) + spec.true_bias;

        if spec.noise_std > 0. {
            let noise = Normal::new(0., spec.noise_std)?;
            y += &Array1::random_using(spec.num_examples, noise, rng);
        }

        Self::new(x, y)
    }

    /// Returns the amount of samples.
    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the amount of features per sample.
    pub fn num_inputs(&self) -> usize {
        self.x.ncols()
    }

    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn labels(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    /// Copies the rows at `indices`, in that order.
    ///
    /// # Panics
    /// If any index is out of bounds.
    pub fn select(&self, indices: &[usize]) -> (Array2<f64>, Array1<f64>) {
        (self.x.select(Axis(0), indices), self.y.select(Axis(0), indices))
    }
}

/// Generates a synthetic linear dataset from a fixed seed, see `Dataset::synthetic`.
pub fn generate(
    num_examples: usize,
    num_inputs: usize,
    true_weights: &[f64],
    true_bias: f64,
    noise_std: f64,
    seed: u64,
) -> Result<Dataset> {
    let spec = SyntheticSpec {
        num_examples,
        num_inputs,
        true_weights: true_weights.to_vec(),
        true_bias,
        noise_std,
    };

    Dataset::synthetic(&spec, &mut StdRng::seed_from_u64(seed))
}
