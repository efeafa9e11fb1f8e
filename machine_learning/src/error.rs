use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::NormalError;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    /// A hyperparameter or setup value is invalid, raised before any training step runs.
    InvalidConfig { field: &'static str, reason: String },
    /// Two tensors that must agree in length do not.
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// The full dataset loss stopped being finite after an epoch.
    NumericDivergence { epoch: usize, loss: f64 },
    /// The run was cancelled at a minibatch boundary.
    Cancelled { epoch: usize, step: usize },
}

impl MlErr {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    /// Returns an error when `got != expected`.
    pub(crate) fn check_len(what: &'static str, got: usize, expected: usize) -> Result<()> {
        if got != expected {
            return Err(Self::ShapeMismatch {
                what,
                got,
                expected,
            });
        }

        Ok(())
    }
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::InvalidConfig { field, reason } => {
                write!(f, "invalid configuration for {field}: {reason}")
            }
            MlErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a shape mismatch for {what}, got {got} and expected {expected}"
            ),
            MlErr::NumericDivergence { epoch, loss } => {
                write!(f, "training diverged at epoch {epoch}: loss is {loss}")
            }
            MlErr::Cancelled { epoch, step } => {
                write!(f, "training cancelled during epoch {epoch} after {step} steps")
            }
        }
    }
}

impl Error for MlErr {}

impl From<NormalError> for MlErr {
    fn from(value: NormalError) -> Self {
        Self::invalid_config("std_dev", value.to_string())
    }
}
