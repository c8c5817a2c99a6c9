//! The agent controller and its per-episode state.

pub mod controller;
pub mod episode;
pub mod path;

pub use controller::{TrainingSummary, WumpusAgent};
pub use episode::{EpisodeContext, Phase};
pub use path::PathStack;
