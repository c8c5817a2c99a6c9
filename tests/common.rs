//! Shared helpers for the agent integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use wumpus_agent::{
    AgentConfig, Action, Mode,
    identifiers::StateId,
    ports::ActionPolicy,
    q_learning::{
        EpsilonGreedyPolicy, ExplorationSchedule, ValueTable, policy::Convergence,
    },
};

/// Deterministic configuration: no exploration, fixed seed.
pub fn greedy_config() -> AgentConfig {
    AgentConfig::default().with_epsilon(0, 0).with_seed(7)
}

/// Plays a fixed action script while delegating exploration bookkeeping to
/// an epsilon-greedy policy, so decay can be observed without random moves.
pub struct ScriptedPolicy {
    script: VecDeque<Action>,
    bookkeeping: EpsilonGreedyPolicy,
}

impl ScriptedPolicy {
    pub fn new(script: &[Action], config: &AgentConfig) -> Self {
        let bookkeeping = EpsilonGreedyPolicy::new(
            config.action_set,
            ExplorationSchedule::new(config.epsilon_seeking, config.epsilon_step),
            ExplorationSchedule::new(config.epsilon_carrying, config.epsilon_step),
        );
        Self {
            script: script.iter().copied().collect(),
            bookkeeping,
        }
    }
}

impl ActionPolicy for ScriptedPolicy {
    fn select_action(&mut self, table: &ValueTable, state: StateId, mode: Mode) -> Action {
        self.script.pop_front().unwrap_or_else(|| {
            EpsilonGreedyPolicy::greedy(wumpus_agent::ActionSet::Full)
                .with_seed(Some(0))
                .select_action(table, state, mode)
        })
    }

    fn record_goal(&mut self, mode: Mode, episodes_completed: usize) {
        self.bookkeeping.record_goal(mode, episodes_completed);
    }

    fn epsilon(&self, mode: Mode) -> u32 {
        self.bookkeeping.epsilon(mode)
    }

    fn convergence(&self) -> Convergence {
        self.bookkeeping.convergence()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
