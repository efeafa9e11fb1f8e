mod loss_fn;
mod squared;

pub use loss_fn::LossFn;
pub use squared::SquaredLoss;
