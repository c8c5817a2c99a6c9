//! CLI infrastructure for the Wumpus agent
//!
//! This module provides the command-line interface for inspecting trained
//! models and the configuration an agent would start with.

pub mod commands;
pub mod output;

/// Install the `fern` logger used by the binary.
pub fn setup_logging(verbose: bool) -> Result<(), fern::InitError> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
