//! Subcommands of the `wumpus-agent` binary.

pub mod config;
pub mod inspect;
