mod builder;
mod report;
mod state;
mod synthetic;
mod trainer;

pub use builder::TrainerBuilder;
pub use report::{EpochStats, EstimationError, TrainReport};
pub use state::TrainerState;
pub use synthetic::{SyntheticRun, train_synthetic};
pub use trainer::Trainer;
