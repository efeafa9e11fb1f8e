use ndarray::{Array1, s};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Normal;

use crate::{
    MlErr, Result,
    params::{ParamLayout, ParamSet},
};

/// The standard deviation used for the default weight initialization.
pub const INIT_STD_DEV: f64 = 0.01;

/// The tensor name that always starts at zero.
pub const BIAS: &str = "bias";

/// Creates the initial parameters for a layout: tensors named `bias` start at zero and every
/// other tensor is drawn from a normal distribution with mean 0 and `INIT_STD_DEV` deviation.
///
/// Tensors are drawn in layout order, so the same rng state always yields the same parameters.
///
/// # Arguments
/// * `layout` - The layout of the parameters to create.
/// * `rng` - A random number generator.
///
/// # Returns
/// The initialized parameters.
pub fn init_params<R: Rng + ?Sized>(layout: ParamLayout, rng: &mut R) -> Result<ParamSet> {
    init_params_with(layout, INIT_STD_DEV, rng)
}

/// Like `init_params`, with a custom deviation for the non bias tensors.
///
/// # Returns
/// The initialized parameters, or an invalid configuration error if `std_dev` is negative or not
/// finite.
pub fn init_params_with<R: Rng + ?Sized>(
    layout: ParamLayout,
    std_dev: f64,
    rng: &mut R,
) -> Result<ParamSet> {
    if !(std_dev.is_finite() && std_dev >= 0.) {
        return Err(MlErr::invalid_config(
            "std_dev",
            format!("must be finite and non negative, got {std_dev}"),
        ));
    }

    let dist = Normal::new(0., std_dev)?;

    let drawn: Vec<_> = layout
        .iter()
        .filter(|(name, _)| *name != BIAS)
        .map(|(_, range)| range)
        .collect();

    let mut params = ParamSet::zeros(layout);

    for range in drawn {
        let values = Array1::random_using(range.len(), dist, rng);
        params.values_mut().slice_mut(s![range]).assign(&values);
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn zeroes_bias_and_draws_small_weights() {
        let layout = ParamLayout::new([("weights", 64), ("bias", 1)]);
        let params = init_params(layout.clone(), &mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(params.layout(), &layout);
        assert_eq!(params.tensor("bias").unwrap(), array![0.]);

        let weights = params.tensor("weights").unwrap();
        assert!(weights.iter().all(|w| w.abs() < 0.1));
        assert!(weights.iter().any(|w| *w != 0.));
    }

    #[test]
    fn draws_every_non_bias_tensor() {
        let layout = ParamLayout::new([("hidden", 3), ("bias", 2), ("output", 3)]);
        let params = init_params(layout, &mut StdRng::seed_from_u64(1)).unwrap();

        assert!(params.tensor("hidden").unwrap().iter().all(|w| *w != 0.));
        assert!(params.tensor("output").unwrap().iter().all(|w| *w != 0.));
        assert_eq!(params.tensor("bias").unwrap(), array![0., 0.]);
    }

    #[test]
    fn equal_seeds_give_equal_params() {
        let layout = ParamLayout::new([("weights", 5), ("bias", 1)]);

        let a = init_params(layout.clone(), &mut StdRng::seed_from_u64(3)).unwrap();
        let b = init_params(layout.clone(), &mut StdRng::seed_from_u64(3)).unwrap();
        let c = init_params(layout, &mut StdRng::seed_from_u64(4)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn custom_deviation_is_validated() {
        let layout = ParamLayout::new([("weights", 1)]);
        let mut rng = StdRng::seed_from_u64(0);

        let params = init_params_with(layout.clone(), 0., &mut rng).unwrap();
        assert_eq!(params.values(), array![0.]);

        for std_dev in [-1., f64::NAN, f64::INFINITY] {
            let err = init_params_with(layout.clone(), std_dev, &mut rng).unwrap_err();
            assert!(matches!(err, MlErr::InvalidConfig { field: "std_dev", .. }));
        }
    }
}
