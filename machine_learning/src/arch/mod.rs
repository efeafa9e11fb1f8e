mod linear;
pub mod loss;
mod model;

pub use linear::LinearRegression;
pub use model::{DifferentiableModel, Model};
