pub mod human;
pub mod play;
pub mod train;

pub use human::HumanMode;
pub use play::{PlayMode, PlaySummary};
pub use train::{
    EpisodeReport, StepStatus, StopReason, TrainConfig, TrainMode, TrainSummary, CHECKPOINT_NAME,
};
