mod backprop;
mod closure;
mod finite_difference;
mod provider;

pub use backprop::Backprop;
pub use closure::FnGradient;
pub use finite_difference::FiniteDifference;
pub use provider::GradientProvider;
