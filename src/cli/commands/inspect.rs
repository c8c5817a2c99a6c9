//! Inspect command - Show what a trained model has learned

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::TextModelRepository,
    cli::output::{format_number, print_kv, print_section, print_state_row, print_subsection},
    ports::ModelRepository,
    q_learning::{StateLayout, ValueTable},
    types::ActionSet,
};

#[derive(Parser, Debug)]
#[command(about = "Inspect a trained model file")]
pub struct InspectArgs {
    /// Path to the model file
    pub model: PathBuf,

    /// Action set the model was trained with (navigation or full)
    #[arg(long, short = 'a', default_value = "full")]
    pub actions: ActionSet,

    /// State fields, most significant first (e.g. x,y,orientation,gold)
    #[arg(long, short = 'l', default_value = "x,y,orientation,gold")]
    pub layout: StateLayout,

    /// Only list this many states
    #[arg(long)]
    pub limit: Option<usize>,
}

/// One state's greedy choice.
#[derive(Debug, Clone, PartialEq)]
pub struct StateReport {
    pub state: u32,
    pub description: String,
    pub best_action: String,
    pub best_value: f64,
}

/// Greedy action per state, in ascending state order.
pub fn report(table: &ValueTable, actions: ActionSet, layout: &StateLayout) -> Vec<StateReport> {
    table
        .iter()
        .map(|(state, _)| StateReport {
            state: state.value(),
            description: layout.describe(state),
            best_action: table.best_action(state, actions).to_string(),
            best_value: table.best_value(state),
        })
        .collect()
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let table = TextModelRepository::new()
        .load(&args.model, args.actions.width())
        .with_context(|| format!("Failed to load model {}", args.model.display()))?;

    print_section(&format!("Model {}", args.model.display()));
    print_kv("States", &format_number(table.len()));
    print_kv(
        "Encodable states",
        &format_number(args.layout.state_count() as usize),
    );
    print_kv("Action set", &args.actions.to_string());
    print_kv("Layout", &args.layout.to_string());

    let rows = report(&table, args.actions, &args.layout);
    let shown = args.limit.unwrap_or(rows.len());

    print_subsection("Greedy policy");
    for row in rows.iter().take(shown) {
        print_state_row(row.state, &row.description, &row.best_action, row.best_value);
    }
    if shown < rows.len() {
        println!("  ... {} more", rows.len() - shown);
    }

    Ok(())
}
