//! Agent configuration and its loading from a parameters file and the
//! environment.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    q_learning::{StateLayout, TerminalStrategy, reward::RewardSchedule},
    types::ActionSet,
};

/// Parameters file read when `WUMPUS_PARAMETERS` is not set.
pub const DEFAULT_PARAMETERS_FILE: &str = "parameters.txt";

/// Environment variable naming the parameters file.
pub const PARAMETERS_ENV: &str = "WUMPUS_PARAMETERS";

/// Configuration for creating a Wumpus agent.
///
/// # Examples
///
/// ```
/// use wumpus_agent::app::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_epsilon(20, 10)
///     .with_learning(0.5, 0.9)
///     .with_seed(42);
/// assert_eq!(config.effective_epsilon_seeking(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// When false, both exploration rates are forced to zero
    pub training_enabled: bool,
    pub model_load_path: Option<PathBuf>,
    pub model_save_path: Option<PathBuf>,
    /// Exploration while looking for the gold, in percentage points
    pub epsilon_seeking: u32,
    /// Exploration while carrying the gold, in percentage points
    pub epsilon_carrying: u32,
    /// Percentage points removed from a mode's epsilon per goal event
    pub epsilon_step: u32,
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    pub action_set: ActionSet,
    pub state_layout: StateLayout,
    pub rewards: RewardSchedule,
    pub terminal: TerminalStrategy,
    /// Replay the recorded path home once the gold is grabbed
    pub backtracking: bool,
    /// Grab as soon as Glitter is perceived instead of learning to
    pub auto_grab: bool,
    /// Safety ceiling on ticks per episode
    pub max_steps: usize,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            training_enabled: true,
            model_load_path: None,
            model_save_path: None,
            epsilon_seeking: 10,
            epsilon_carrying: 10,
            epsilon_step: 1,
            learning_rate: 0.1,
            discount_factor: 0.9,
            action_set: ActionSet::Full,
            state_layout: StateLayout::with_gold(),
            rewards: RewardSchedule::default(),
            terminal: TerminalStrategy::Pin,
            backtracking: false,
            auto_grab: false,
            max_steps: 1000,
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Navigation-only agent that grabs on sight and retraces its path home.
    pub fn backtracking() -> Self {
        Self {
            action_set: ActionSet::Navigation,
            state_layout: StateLayout::pose_only(),
            backtracking: true,
            auto_grab: true,
            ..Self::default()
        }
    }

    /// Set both exploration rates (percentage points).
    pub fn with_epsilon(mut self, seeking: u32, carrying: u32) -> Self {
        self.epsilon_seeking = seeking;
        self.epsilon_carrying = carrying;
        self
    }

    /// Set the learning rate and discount factor.
    pub fn with_learning(mut self, learning_rate: f64, discount_factor: f64) -> Self {
        self.learning_rate = learning_rate;
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_training(mut self, enabled: bool) -> Self {
        self.training_enabled = enabled;
        self
    }

    pub fn with_model_paths(mut self, load: Option<PathBuf>, save: Option<PathBuf>) -> Self {
        self.model_load_path = load;
        self.model_save_path = save;
        self
    }

    pub fn with_action_set(mut self, action_set: ActionSet) -> Self {
        self.action_set = action_set;
        self
    }

    pub fn with_state_layout(mut self, layout: StateLayout) -> Self {
        self.state_layout = layout;
        self
    }

    pub fn with_rewards(mut self, rewards: RewardSchedule) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn with_terminal(mut self, terminal: TerminalStrategy) -> Self {
        self.terminal = terminal;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn effective_epsilon_seeking(&self) -> u32 {
        if self.training_enabled {
            self.epsilon_seeking
        } else {
            0
        }
    }

    pub fn effective_epsilon_carrying(&self) -> u32 {
        if self.training_enabled {
            self.epsilon_carrying
        } else {
            0
        }
    }

    /// Load the parameters file named by `WUMPUS_PARAMETERS` (or
    /// `parameters.txt`), then apply environment overrides.
    ///
    /// Never fails: a missing or unreadable file falls back to defaults
    /// with a warning.
    pub fn load() -> Self {
        let path = std::env::var_os(PARAMETERS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PARAMETERS_FILE));
        Self::load_from(&path)
    }

    /// Like [`AgentConfig::load`] with an explicit parameters file.
    pub fn load_from(path: &Path) -> Self {
        let mut config = match Self::from_parameters_file(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err}; using default parameters");
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Read a parameters file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigUnavailable`] if the file cannot be read and
    /// [`Error::InvalidParameter`] if a token does not parse.
    pub fn from_parameters_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::ConfigUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::default().with_parameters(&contents)
    }

    /// Apply a whitespace-separated parameter list:
    ///
    /// `training load save epsilon learning_rate discount_factor`, or
    /// `training load save epsilon_seeking epsilon_carrying learning_rate discount_factor`.
    ///
    /// A path of `-` means "none".
    pub fn with_parameters(mut self, contents: &str) -> Result<Self> {
        let tokens: Vec<&str> = contents.split_whitespace().collect();
        let (seeking, carrying, rates) = match tokens.len() {
            6 => (tokens[3], tokens[3], &tokens[4..6]),
            7 => (tokens[3], tokens[4], &tokens[5..7]),
            n => {
                return Err(Error::InvalidConfiguration {
                    message: format!("parameters file has {n} tokens, expected 6 or 7"),
                });
            }
        };
        self.training_enabled = parse_flag("training", tokens[0])?;
        self.model_load_path = parse_path(tokens[1]);
        self.model_save_path = parse_path(tokens[2]);
        self.epsilon_seeking = parse_value("epsilon_seeking", seeking)?;
        self.epsilon_carrying = parse_value("epsilon_carrying", carrying)?;
        self.learning_rate = parse_value("learning_rate", rates[0])?;
        self.discount_factor = parse_value("discount_factor", rates[1])?;
        Ok(self)
    }

    /// Apply `WUMPUS_*` overrides from a variable lookup.
    ///
    /// Values that fail to parse are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = get("WUMPUS_TRAINING") {
            override_with(&mut self.training_enabled, parse_flag("WUMPUS_TRAINING", &value));
        }
        if let Some(value) = get("WUMPUS_MODEL_LOAD") {
            self.model_load_path = parse_path(&value);
        }
        if let Some(value) = get("WUMPUS_MODEL_SAVE") {
            self.model_save_path = parse_path(&value);
        }
        if let Some(value) = get("WUMPUS_EPSILON") {
            if let Some(epsilon) = ok_or_warn(parse_value::<u32>("WUMPUS_EPSILON", &value)) {
                self.epsilon_seeking = epsilon;
                self.epsilon_carrying = epsilon;
            }
        }
        if let Some(value) = get("WUMPUS_EPSILON_SEEKING") {
            override_with(
                &mut self.epsilon_seeking,
                parse_value("WUMPUS_EPSILON_SEEKING", &value),
            );
        }
        if let Some(value) = get("WUMPUS_EPSILON_CARRYING") {
            override_with(
                &mut self.epsilon_carrying,
                parse_value("WUMPUS_EPSILON_CARRYING", &value),
            );
        }
        if let Some(value) = get("WUMPUS_LEARNING_RATE") {
            override_with(
                &mut self.learning_rate,
                parse_value("WUMPUS_LEARNING_RATE", &value),
            );
        }
        if let Some(value) = get("WUMPUS_DISCOUNT_FACTOR") {
            override_with(
                &mut self.discount_factor,
                parse_value("WUMPUS_DISCOUNT_FACTOR", &value),
            );
        }
    }
}

fn ok_or_warn<T>(result: Result<T>) -> Option<T> {
    result.map_err(|err| log::warn!("{err}; keeping previous value")).ok()
}

fn override_with<T>(slot: &mut T, result: Result<T>) {
    if let Some(value) = ok_or_warn(result) {
        *slot = value;
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|err: T::Err| Error::InvalidParameter {
        name: name.to_string(),
        value: raw.to_string(),
        reason: err.to_string(),
    })
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::InvalidParameter {
            name: name.to_string(),
            value: raw.to_string(),
            reason: "expected 0/1 or true/false".to_string(),
        }),
    }
}

fn parse_path(raw: &str) -> Option<PathBuf> {
    match raw.trim() {
        "" | "-" => None,
        path => Some(PathBuf::from(path)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_six_token_parameters_share_epsilon() {
        let config = AgentConfig::default()
            .with_parameters("1 model.txt out.txt 25 0.5 0.95")
            .unwrap();
        assert!(config.training_enabled);
        assert_eq!(config.model_load_path, Some(PathBuf::from("model.txt")));
        assert_eq!(config.model_save_path, Some(PathBuf::from("out.txt")));
        assert_eq!(config.epsilon_seeking, 25);
        assert_eq!(config.epsilon_carrying, 25);
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.discount_factor, 0.95);
    }

    #[test]
    fn test_seven_token_parameters_split_epsilon() {
        let config = AgentConfig::default()
            .with_parameters("0\n-\nsave.txt\n30\n5\n1.0\n1.0\n")
            .unwrap();
        assert!(!config.training_enabled);
        assert_eq!(config.model_load_path, None);
        assert_eq!(config.epsilon_seeking, 30);
        assert_eq!(config.epsilon_carrying, 5);
        assert_eq!(config.effective_epsilon_seeking(), 0);
        assert_eq!(config.effective_epsilon_carrying(), 0);
    }

    #[test]
    fn test_bad_parameters_are_errors() {
        assert!(AgentConfig::default().with_parameters("1 a b").is_err());
        assert!(matches!(
            AgentConfig::default().with_parameters("maybe a b 1 0.1 0.9"),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("parameters.txt");
        assert!(matches!(
            AgentConfig::from_parameters_file(&missing),
            Err(Error::ConfigUnavailable { .. })
        ));
        let config = AgentConfig::load_from(&missing);
        assert_eq!(config.max_steps, AgentConfig::default().max_steps);
    }

    #[test]
    fn test_file_is_read() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("parameters.txt");
        fs::write(&path, "1 in.txt out.txt 15 0.2 0.8\n").unwrap();
        let config = AgentConfig::from_parameters_file(&path).unwrap();
        assert_eq!(config.epsilon_seeking, 15);
        assert_eq!(config.learning_rate, 0.2);
    }

    #[test]
    fn test_overrides_apply_and_skip_garbage() {
        let vars: HashMap<&str, &str> = [
            ("WUMPUS_EPSILON", "40"),
            ("WUMPUS_EPSILON_CARRYING", "3"),
            ("WUMPUS_LEARNING_RATE", "fast"),
            ("WUMPUS_MODEL_SAVE", "trained.txt"),
            ("WUMPUS_TRAINING", "false"),
        ]
        .into_iter()
        .collect();

        let mut config = AgentConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|value| value.to_string()));

        assert_eq!(config.epsilon_seeking, 40);
        assert_eq!(config.epsilon_carrying, 3);
        assert_eq!(config.learning_rate, AgentConfig::default().learning_rate);
        assert_eq!(config.model_save_path, Some(PathBuf::from("trained.txt")));
        assert!(!config.training_enabled);
    }

    #[test]
    fn test_config_serializes_to_json() {
        let config = AgentConfig::backtracking().with_seed(9);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["action_set"], "navigation");
        assert_eq!(json["state_layout"][2], "orientation");
        let back: AgentConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
