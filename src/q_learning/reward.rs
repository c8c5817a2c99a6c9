//! Reward shaping for the just-completed transition.
//!
//! Rules are checked in priority order and the first match wins. A scream
//! must be checked before the generic penalty, since a shot that kills the
//! Wumpus is also a Shoot.

use serde::{Deserialize, Serialize};

use crate::types::{Action, Percept};

/// Reward magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardSchedule {
    /// Wumpus killed
    pub scream: f64,
    /// Gold grabbed
    pub goal: f64,
    /// Wasted shot, grab or climb, or a bump into a wall
    pub penalty: f64,
    /// Any ordinary move or turn
    pub step: f64,
    /// Written at game over after climbing out with the gold
    pub exit: f64,
    /// Written at game over after dying or leaving empty-handed
    pub death: f64,
}

impl Default for RewardSchedule {
    fn default() -> Self {
        Self {
            scream: 10.0,
            goal: 100.0,
            penalty: -100.0,
            step: -1.0,
            exit: 100.0,
            death: -100.0,
        }
    }
}

/// What happened between the previous tick and this one.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub previous_action: Action,
    pub previous_percept: Percept,
    pub current_percept: Percept,
    pub carrying_gold: bool,
}

/// Classification of a transition, in rule priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardEvent {
    TargetKilled,
    GoalGrabbed,
    Penalty,
    Step,
}

impl RewardEvent {
    /// Events whose value is handled by the terminal strategy instead of a
    /// plain TD update.
    pub fn is_terminal(self) -> bool {
        matches!(self, RewardEvent::GoalGrabbed)
    }
}

/// Turns transitions into scalar rewards.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardModel {
    schedule: RewardSchedule,
}

impl RewardModel {
    pub fn new(schedule: RewardSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &RewardSchedule {
        &self.schedule
    }

    pub fn classify(&self, transition: &Transition) -> RewardEvent {
        let action = transition.previous_action;
        if transition.current_percept.scream {
            RewardEvent::TargetKilled
        } else if action == Action::Grab
            && transition.previous_percept.glitter
            && !transition.carrying_gold
        {
            RewardEvent::GoalGrabbed
        } else if matches!(action, Action::Climb | Action::Shoot | Action::Grab)
            || transition.current_percept.bump
        {
            // Invalid climb, missed shot or empty grab.
            RewardEvent::Penalty
        } else {
            RewardEvent::Step
        }
    }

    pub fn value(&self, event: RewardEvent) -> f64 {
        match event {
            RewardEvent::TargetKilled => self.schedule.scream,
            RewardEvent::GoalGrabbed => self.schedule.goal,
            RewardEvent::Penalty => self.schedule.penalty,
            RewardEvent::Step => self.schedule.step,
        }
    }

    pub fn reward(&self, transition: &Transition) -> f64 {
        self.value(self.classify(transition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(action: Action, previous: Percept, current: Percept) -> Transition {
        Transition {
            previous_action: action,
            previous_percept: previous,
            current_percept: current,
            carrying_gold: false,
        }
    }

    #[test]
    fn test_scream_beats_penalty() {
        let model = RewardModel::default();
        let t = transition(
            Action::Shoot,
            Percept::default(),
            Percept::default().with_scream().with_bump(),
        );
        assert_eq!(model.classify(&t), RewardEvent::TargetKilled);
        assert_eq!(model.reward(&t), 10.0);
    }

    #[test]
    fn test_grab_on_glitter_is_goal() {
        let model = RewardModel::default();
        let t = transition(
            Action::Grab,
            Percept::default().with_glitter(),
            Percept::default(),
        );
        assert_eq!(model.classify(&t), RewardEvent::GoalGrabbed);
        assert_eq!(model.reward(&t), 100.0);
    }

    #[test]
    fn test_invalid_actions_and_bumps_are_penalised() {
        let model = RewardModel::default();
        for action in [Action::Grab, Action::Shoot, Action::Climb] {
            let t = transition(action, Percept::default(), Percept::default());
            assert_eq!(model.reward(&t), -100.0, "{action}");
        }
        let bump = transition(
            Action::GoForward,
            Percept::default(),
            Percept::default().with_bump(),
        );
        assert_eq!(model.classify(&bump), RewardEvent::Penalty);
    }

    #[test]
    fn test_ordinary_moves_cost_a_step() {
        let model = RewardModel::default();
        for action in [Action::GoForward, Action::TurnLeft, Action::TurnRight] {
            let t = transition(action, Percept::default(), Percept::default().with_breeze());
            assert_eq!(model.classify(&t), RewardEvent::Step);
            assert_eq!(model.reward(&t), -1.0);
        }
    }

    #[test]
    fn test_custom_schedule() {
        let model = RewardModel::new(RewardSchedule {
            goal: 100_000.0,
            penalty: -100_000.0,
            ..RewardSchedule::default()
        });
        let t = transition(
            Action::Grab,
            Percept::default().with_glitter(),
            Percept::default(),
        );
        assert_eq!(model.reward(&t), 100_000.0);
    }
}
