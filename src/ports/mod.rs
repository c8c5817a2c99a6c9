//! Ports (trait boundaries) for external dependencies.
//!
//! The learning core owns these traits; storage formats and action sources
//! plug in behind them.

pub mod policy;
pub mod repository;

pub use policy::ActionPolicy;
pub use repository::ModelRepository;
