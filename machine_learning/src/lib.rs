pub mod arch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod gradient;
pub mod initialization;
pub mod optimization;
pub mod params;
pub mod sampler;
pub mod training;

pub use error::{MlErr, Result};
