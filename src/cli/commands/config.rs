//! Config command - Show the configuration an agent would start with

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::app::AgentConfig;

#[derive(Parser, Debug)]
#[command(about = "Print the resolved agent configuration as JSON")]
pub struct ConfigArgs {
    /// Parameters file (defaults to $WUMPUS_PARAMETERS or parameters.txt)
    #[arg(long, short = 'p')]
    pub parameters: Option<PathBuf>,

    /// Start from the backtracking preset instead of the default agent
    #[arg(long, default_value_t = false)]
    pub backtracking: bool,
}

/// Resolve the configuration for the given arguments.
pub fn resolve(args: &ConfigArgs) -> AgentConfig {
    let loaded = match &args.parameters {
        Some(path) => AgentConfig::load_from(path),
        None => AgentConfig::load(),
    };
    if args.backtracking {
        let preset = AgentConfig::backtracking();
        AgentConfig {
            action_set: preset.action_set,
            state_layout: preset.state_layout,
            backtracking: preset.backtracking,
            auto_grab: preset.auto_grab,
            ..loaded
        }
    } else {
        loaded
    }
}

pub fn execute(args: ConfigArgs) -> Result<()> {
    let config = resolve(&args);
    let json = serde_json::to_string_pretty(&config).context("Failed to serialize configuration")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::types::ActionSet;

    #[test]
    fn test_backtracking_keeps_loaded_rates() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("parameters.txt");
        std::fs::write(&path, "1 - - 35 0.25 0.5").unwrap();

        let config = resolve(&ConfigArgs {
            parameters: Some(path),
            backtracking: true,
        });
        assert_eq!(config.epsilon_seeking, 35);
        assert_eq!(config.learning_rate, 0.25);
        assert_eq!(config.action_set, ActionSet::Navigation);
        assert!(config.backtracking && config.auto_grab);
    }
}
