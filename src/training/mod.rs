//! Self-play data collection: the single-episode driver, per-agent
//! trajectory stores, the batch loop, and rolling outcome metrics.

pub mod episode;
pub mod metrics;
pub mod trainer;
pub mod trajectory;

pub use episode::{
    play_episode, EpisodeOptions, EpisodeReport, EpisodeStatus, RecordingMode, Seat,
};
pub use trainer::{stream_seed, SelfPlay, SelfPlayConfig, SelfPlaySummary};
pub use trajectory::{Trajectory, Transition};
