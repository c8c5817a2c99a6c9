//! Action selection policies
//!
//! [`EpsilonGreedyPolicy`] explores with a per-mode probability that decays
//! each time that mode's goal is reached. [`ManualPolicy`] takes keystroke
//! commands from a reader and exists for driving the agent by hand.

use std::{fmt, io::BufRead};

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    identifiers::StateId,
    ports::ActionPolicy,
    q_learning::q_table::ValueTable,
    types::{Action, ActionSet, Mode},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Exploration rate for one mode, in percentage points, decaying linearly.
///
/// The current rate is always `max(0, initial - decays * step)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplorationSchedule {
    initial: u32,
    step: u32,
    decays: u32,
    converged_at: Option<usize>,
}

impl ExplorationSchedule {
    pub fn new(initial: u32, step: u32) -> Self {
        Self {
            initial: initial.min(100),
            step,
            decays: 0,
            converged_at: None,
        }
    }

    /// A schedule that never explores.
    pub fn greedy() -> Self {
        Self::new(0, 0)
    }

    /// Current exploration rate in percentage points.
    pub fn epsilon(&self) -> u32 {
        self.initial
            .saturating_sub(self.decays.saturating_mul(self.step))
    }

    /// Apply one decay step. The first time the rate reaches zero the
    /// episode count is recorded.
    pub fn decay(&mut self, episodes_completed: usize) {
        if self.epsilon() == 0 {
            return;
        }
        self.decays += 1;
        if self.epsilon() == 0 && self.converged_at.is_none() {
            self.converged_at = Some(episodes_completed);
        }
    }

    pub fn converged_at(&self) -> Option<usize> {
        self.converged_at
    }
}

/// Episode counts at which each mode's exploration reached zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Convergence {
    pub seeking: Option<usize>,
    pub carrying: Option<usize>,
}

impl fmt::Display for Convergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |value: Option<usize>| value.map_or_else(|| "n/a".to_string(), |n| n.to_string());
        write!(
            f,
            "seeking={}, carrying={}",
            show(self.seeking),
            show(self.carrying)
        )
    }
}

/// ε-greedy action selection with one exploration schedule per mode.
#[derive(Debug, Clone)]
pub struct EpsilonGreedyPolicy {
    actions: ActionSet,
    seeking: ExplorationSchedule,
    carrying: ExplorationSchedule,
    rng: StdRng,
}

impl EpsilonGreedyPolicy {
    pub fn new(
        actions: ActionSet,
        seeking: ExplorationSchedule,
        carrying: ExplorationSchedule,
    ) -> Self {
        Self {
            actions,
            seeking,
            carrying,
            rng: build_rng(None),
        }
    }

    /// Pure exploitation: always the table's best action.
    pub fn greedy(actions: ActionSet) -> Self {
        Self::new(
            actions,
            ExplorationSchedule::greedy(),
            ExplorationSchedule::greedy(),
        )
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.rng = build_rng(seed);
        self
    }

    pub fn schedule(&self, mode: Mode) -> &ExplorationSchedule {
        match mode {
            Mode::Seeking => &self.seeking,
            Mode::Carrying => &self.carrying,
        }
    }

    fn schedule_mut(&mut self, mode: Mode) -> &mut ExplorationSchedule {
        match mode {
            Mode::Seeking => &mut self.seeking,
            Mode::Carrying => &mut self.carrying,
        }
    }
}

impl ActionPolicy for EpsilonGreedyPolicy {
    fn select_action(&mut self, table: &ValueTable, state: StateId, mode: Mode) -> Action {
        let roll: u32 = self.rng.random_range(1..=100);
        if roll <= self.epsilon(mode) {
            // Explore: random action
            let actions = self.actions.actions();
            *actions.choose(&mut self.rng).unwrap_or(&actions[0])
        } else {
            // Exploit: greedy action based on Q-values
            table.best_action(state, self.actions)
        }
    }

    fn record_goal(&mut self, mode: Mode, episodes_completed: usize) {
        let schedule = self.schedule_mut(mode);
        schedule.decay(episodes_completed);
        log::debug!("{mode} epsilon decayed to {}%", schedule.epsilon());
    }

    fn epsilon(&self, mode: Mode) -> u32 {
        self.schedule(mode).epsilon()
    }

    fn convergence(&self) -> Convergence {
        Convergence {
            seeking: self.seeking.converged_at(),
            carrying: self.carrying.converged_at(),
        }
    }

    fn name(&self) -> &str {
        "epsilon-greedy"
    }
}

/// Human-driven policy reading one command per line.
///
/// Commands are the short or long action names accepted by
/// [`Action`]'s `FromStr` (`f`, `l`, `r`, `g`, `s`, `c`, ...). Unknown
/// commands are skipped. When input runs out the table's best action is
/// used so the agent still answers every tick.
pub struct ManualPolicy {
    input: Box<dyn BufRead + Send>,
    actions: ActionSet,
}

impl ManualPolicy {
    pub fn new(input: Box<dyn BufRead + Send>, actions: ActionSet) -> Self {
        Self { input, actions }
    }

    fn next_command(&mut self) -> Option<Action> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => match line.trim().parse::<Action>() {
                    Ok(action) => return Some(action),
                    Err(err) => log::warn!("{err}"),
                },
                Err(err) => {
                    log::warn!("failed to read command: {err}");
                    return None;
                }
            }
        }
    }
}

impl fmt::Debug for ManualPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualPolicy")
            .field("actions", &self.actions)
            .finish()
    }
}

impl ActionPolicy for ManualPolicy {
    fn select_action(&mut self, table: &ValueTable, state: StateId, _mode: Mode) -> Action {
        self.next_command().unwrap_or_else(|| {
            log::debug!("no manual command available, falling back to greedy action");
            table.best_action(state, self.actions)
        })
    }

    fn name(&self) -> &str {
        "manual"
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_schedule_decays_to_floor() {
        let mut schedule = ExplorationSchedule::new(3, 1);
        for episode in 0..10 {
            schedule.decay(episode);
            assert_eq!(schedule.epsilon(), 3u32.saturating_sub(episode as u32 + 1));
        }
        assert_eq!(schedule.epsilon(), 0);
        assert_eq!(schedule.converged_at(), Some(2));
    }

    #[test]
    fn test_schedule_step_overshoot_clamps() {
        let mut schedule = ExplorationSchedule::new(5, 2);
        schedule.decay(0);
        schedule.decay(1);
        schedule.decay(2);
        assert_eq!(schedule.epsilon(), 0);
        assert_eq!(schedule.converged_at(), Some(2));
    }

    #[test]
    fn test_greedy_schedule_never_converges() {
        let mut schedule = ExplorationSchedule::greedy();
        schedule.decay(4);
        assert_eq!(schedule.epsilon(), 0);
        assert_eq!(schedule.converged_at(), None);
    }

    #[test]
    fn test_greedy_policy_follows_table() {
        let mut table = ValueTable::new(6);
        let state = StateId::new(12);
        table.set(state, 4, 3.0);
        let mut policy = EpsilonGreedyPolicy::greedy(ActionSet::Full).with_seed(Some(1));
        for _ in 0..1000 {
            assert_eq!(
                policy.select_action(&table, state, Mode::Seeking),
                Action::Shoot
            );
        }
    }

    #[test]
    fn test_full_exploration_covers_every_action() {
        let table = ValueTable::new(4);
        let mut policy = EpsilonGreedyPolicy::new(
            ActionSet::Navigation,
            ExplorationSchedule::new(100, 1),
            ExplorationSchedule::greedy(),
        )
        .with_seed(Some(7));
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(policy.select_action(&table, StateId::new(0), Mode::Seeking));
        }
        assert_eq!(seen.len(), 4);
        assert!(!seen.contains(&Action::Climb));
    }

    #[test]
    fn test_record_goal_touches_only_its_mode() {
        let mut policy = EpsilonGreedyPolicy::new(
            ActionSet::Full,
            ExplorationSchedule::new(10, 1),
            ExplorationSchedule::new(1, 1),
        );
        policy.record_goal(Mode::Carrying, 6);
        assert_eq!(policy.epsilon(Mode::Seeking), 10);
        assert_eq!(policy.epsilon(Mode::Carrying), 0);
        assert_eq!(
            policy.convergence(),
            Convergence {
                seeking: None,
                carrying: Some(6)
            }
        );
        assert_eq!(policy.convergence().to_string(), "seeking=n/a, carrying=6");
    }

    #[test]
    fn test_manual_policy_reads_commands() {
        let input = Cursor::new("f\njump\nl\n");
        let mut policy = ManualPolicy::new(Box::new(input), ActionSet::Full);
        let mut table = ValueTable::new(6);
        let state = StateId::new(0);
        table.set(state, 5, 1.0);

        assert_eq!(policy.select_action(&table, state, Mode::Seeking), Action::GoForward);
        assert_eq!(policy.select_action(&table, state, Mode::Seeking), Action::TurnLeft);
        // Input exhausted: greedy fallback.
        assert_eq!(policy.select_action(&table, state, Mode::Seeking), Action::Climb);
    }
}
