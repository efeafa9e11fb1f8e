mod layout;
mod param_set;

pub use layout::ParamLayout;
pub use param_set::{Gradient, ParamSet};
