use std::fmt;

/// Where a `Trainer` stands in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerState {
    /// Parameters are allocated and no step was taken yet.
    Initializing,
    /// Minibatches of this (1-based) epoch are being processed.
    EpochRunning { epoch: usize },
    /// Every minibatch of this epoch was processed, the full loss is being reported.
    EpochComplete { epoch: usize },
    /// The configured amount of epochs ran.
    Finished,
    /// A component failed or the run was cancelled, no more steps will be taken.
    Aborted,
}

impl TrainerState {
    /// Returns whether no more epochs will run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Aborted)
    }
}

impl fmt::Display for TrainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initializing => write!(f, "initializing"),
            Self::EpochRunning { epoch } => write!(f, "running epoch {epoch}"),
            Self::EpochComplete { epoch } => write!(f, "completed epoch {epoch}"),
            Self::Finished => write!(f, "finished"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}
