//! Q-learning agent for the Wumpus World
//!
//! This crate provides:
//! - Bit-packed state encoding with configurable state aliasing
//! - A sparse action-value table with flat text persistence
//! - Priority-ordered reward shaping and the one-step Q-learning update
//! - Epsilon-greedy exploration with per-mode decay, and a manual policy
//! - The agent controller driven by an external simulator
//!
//! The simulator calls [`WumpusAgent::initialize`] at the start of every
//! episode, [`WumpusAgent::process`] once per tick with the current
//! [`Percept`](types::Percept), and [`WumpusAgent::game_over`] at the end.

pub mod adapters;
pub mod agent;
pub mod app;
pub mod cli;
pub mod error;
pub mod identifiers;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use agent::{Phase, TrainingSummary, WumpusAgent};
pub use app::AgentConfig;
pub use error::{Error, Result};
pub use types::{Action, ActionSet, Mode, Orientation, Percept, Pose};
