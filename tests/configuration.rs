use std::{collections::HashMap, fs, path::PathBuf};

use clap::Parser;
use tempfile::tempdir;
use wumpus_agent::{
    ActionSet, AgentConfig, Error,
    cli::commands::{
        config::{ConfigArgs, resolve},
        inspect::{InspectArgs, execute},
    },
};

#[test]
fn parameters_file_with_shared_epsilon() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("parameters.txt");
    fs::write(&path, "1 - q.txt 20 0.2 0.95\n").unwrap();

    let config = AgentConfig::from_parameters_file(&path).unwrap();
    assert!(config.training_enabled);
    assert_eq!(config.model_load_path, None);
    assert_eq!(config.model_save_path, Some(PathBuf::from("q.txt")));
    assert_eq!(config.epsilon_seeking, 20);
    assert_eq!(config.epsilon_carrying, 20);
    assert_eq!(config.learning_rate, 0.2);
    assert_eq!(config.discount_factor, 0.95);
}

#[test]
fn parameters_file_with_split_epsilon() {
    let config = AgentConfig::default()
        .with_parameters("0 in.txt out.txt 15 5 0.1 0.9")
        .unwrap();
    assert!(!config.training_enabled);
    assert_eq!(config.epsilon_seeking, 15);
    assert_eq!(config.epsilon_carrying, 5);
    assert_eq!(config.effective_epsilon_seeking(), 0);
    assert_eq!(config.model_load_path, Some(PathBuf::from("in.txt")));
}

#[test]
fn bad_parameters_are_rejected() {
    assert!(matches!(
        AgentConfig::default().with_parameters("1 - -"),
        Err(Error::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        AgentConfig::default().with_parameters("1 - - ten 0.1 0.9"),
        Err(Error::InvalidParameter { .. })
    ));
}

#[test]
fn missing_parameters_file_falls_back_to_defaults() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("absent.txt");
    assert!(matches!(
        AgentConfig::from_parameters_file(&path),
        Err(Error::ConfigUnavailable { .. })
    ));

    let mut expected = AgentConfig::default();
    expected.apply_overrides(|key| std::env::var(key).ok());
    assert_eq!(AgentConfig::load_from(&path), expected);
}

#[test]
fn overrides_take_precedence_and_ignore_garbage() {
    let vars: HashMap<&str, &str> = [
        ("WUMPUS_TRAINING", "false"),
        ("WUMPUS_EPSILON", "30"),
        ("WUMPUS_EPSILON_CARRYING", "7"),
        ("WUMPUS_LEARNING_RATE", "fast"),
        ("WUMPUS_MODEL_SAVE", "saved.txt"),
    ]
    .into_iter()
    .collect();

    let mut config = AgentConfig::default();
    config.apply_overrides(|key| vars.get(key).map(|value| value.to_string()));

    assert!(!config.training_enabled);
    assert_eq!(config.epsilon_seeking, 30);
    assert_eq!(config.epsilon_carrying, 7);
    assert_eq!(config.learning_rate, 0.1);
    assert_eq!(config.model_save_path, Some(PathBuf::from("saved.txt")));
}

#[test]
fn config_command_applies_backtracking_preset() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("parameters.txt");
    fs::write(&path, "1 - - 25 0.3 0.8").unwrap();

    let args = ConfigArgs::parse_from([
        "config",
        "--parameters",
        path.to_str().unwrap(),
        "--backtracking",
    ]);
    let config = resolve(&args);

    assert_eq!(config.epsilon_seeking, 25);
    assert_eq!(config.action_set, ActionSet::Navigation);
    assert!(config.backtracking);
    assert!(config.auto_grab);
}

#[test]
fn inspect_command_reads_saved_model() {
    let tmp = tempdir().unwrap();
    let model = tmp.path().join("model.txt");
    fs::write(&model, "0 1 0 0 0\n10 0 0 0 -2.5\n").unwrap();

    let args = InspectArgs::parse_from([
        "inspect",
        model.to_str().unwrap(),
        "--actions",
        "navigation",
        "--layout",
        "x,y,orientation",
    ]);
    execute(args).expect("inspecting a valid model should succeed");
}

#[test]
fn inspect_command_reports_malformed_model() {
    let tmp = tempdir().unwrap();
    let model = tmp.path().join("model.txt");
    fs::write(&model, "0 1 0\n").unwrap();

    let args = InspectArgs::parse_from(["inspect", model.to_str().unwrap()]);
    let err = execute(args).unwrap_err();
    assert!(err.to_string().contains("Failed to load model"));
}
