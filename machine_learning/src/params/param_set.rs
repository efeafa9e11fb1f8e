use ndarray::{Array1, ArrayView1, ArrayViewMut1, s};

use super::ParamLayout;
use crate::{MlErr, Result};

/// The trainable state of a model: a layout and a flat buffer of exactly `layout.size()` values.
///
/// The buffer can only be mutated through fixed length views, so the shape of every tensor is
/// settled at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSet {
    layout: ParamLayout,
    values: Array1<f64>,
}

impl ParamSet {
    /// Creates a new `ParamSet` from an already filled buffer.
    ///
    /// # Arguments
    /// * `layout` - How the buffer splits into named tensors.
    /// * `values` - The flat parameter values.
    ///
    /// # Returns
    /// A new `ParamSet` or a shape mismatch if `values` doesn't have `layout.size()` elements.
    pub fn new(layout: ParamLayout, values: Array1<f64>) -> Result<Self> {
        MlErr::check_len("parameters", values.len(), layout.size())?;
        Ok(Self { layout, values })
    }

    /// Creates a new `ParamSet` full of zeros.
    pub fn zeros(layout: ParamLayout) -> Self {
        let values = Array1::zeros(layout.size());
        Self { layout, values }
    }

    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the whole flat buffer.
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    /// Returns the whole flat buffer for in place updates.
    pub fn values_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        self.values.view_mut()
    }

    /// Returns a view of a named tensor.
    pub fn tensor(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        let range = self.layout.range(name)?;
        Some(self.values.slice(s![range]))
    }

    /// Returns a mutable view of a named tensor.
    pub fn tensor_mut(&mut self, name: &str) -> Option<ArrayViewMut1<'_, f64>> {
        let range = self.layout.range(name)?;
        Some(self.values.slice_mut(s![range]))
    }

    /// Returns whether every value is finite.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Returns an error if `layout` is not this set's layout: every tensor must appear with the
    /// same name, length and position.
    pub fn check_layout(&self, layout: &ParamLayout) -> Result<()> {
        MlErr::check_len("parameter tensors", layout.len(), self.layout.len())?;

        let tensors = layout.iter().zip(self.layout.iter()).enumerate();

        for (pos, ((name, got), (_, expected))) in tensors {
            let expected_pos = self.layout.iter().position(|(other, _)| other == name);
            MlErr::check_len(name, expected_pos.unwrap_or(self.layout.len()), pos)?;
            MlErr::check_len(name, got.len(), expected.len())?;
        }

        Ok(())
    }
}

/// The derivative of the summed batch loss with respect to each parameter.
///
/// A `Gradient` shares its layout with the `ParamSet` it was computed for and lives for a single
/// optimization step.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    layout: ParamLayout,
    values: Array1<f64>,
}

impl Gradient {
    /// Creates a new `Gradient`.
    ///
    /// # Returns
    /// A new `Gradient` or a shape mismatch if `values` doesn't have `layout.size()` elements.
    pub fn new(layout: ParamLayout, values: Array1<f64>) -> Result<Self> {
        MlErr::check_len("gradient", values.len(), layout.size())?;
        Ok(Self { layout, values })
    }

    /// Creates a zeroed gradient shaped like `params`.
    pub fn zeros_like(params: &ParamSet) -> Self {
        Self {
            layout: params.layout().clone(),
            values: Array1::zeros(params.len()),
        }
    }

    pub fn layout(&self) -> &ParamLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    pub fn values_mut(&mut self) -> ArrayViewMut1<'_, f64> {
        self.values.view_mut()
    }

    pub fn tensor(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        let range = self.layout.range(name)?;
        Some(self.values.slice(s![range]))
    }

    pub fn tensor_mut(&mut self, name: &str) -> Option<ArrayViewMut1<'_, f64>> {
        let range = self.layout.range(name)?;
        Some(self.values.slice_mut(s![range]))
    }

    /// Returns an error if this gradient cannot be applied to `params`.
    pub fn check_matches(&self, params: &ParamSet) -> Result<()> {
        MlErr::check_len("gradient", self.len(), params.len())?;
        params.check_layout(&self.layout)
    }
}
