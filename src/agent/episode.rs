//! Per-episode bookkeeping.

use crate::{
    agent::path::PathStack,
    identifiers::StateId,
    types::{Action, Mode, Percept, Pose},
};

/// Controller lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    Seeking,
    Carrying,
    Terminal,
}

/// State that lives for one episode and is reset by `initialize`.
#[derive(Debug, Clone, Default)]
pub struct EpisodeContext {
    pub pose: Pose,
    pub previous_state: Option<StateId>,
    pub previous_action: Option<Action>,
    pub previous_percept: Percept,
    pub steps: usize,
    pub carrying_gold: bool,
    pub wumpus_dead: bool,
    pub path: PathStack,
}

impl EpisodeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        if self.carrying_gold {
            Mode::Carrying
        } else {
            Mode::Seeking
        }
    }

    /// Update pose and flags from the previous action and the percept that
    /// followed it. Returns true if this tick confirmed a gold grab.
    pub fn observe(&mut self, percept: &Percept) -> bool {
        let Some(action) = self.previous_action else {
            return false;
        };
        match action {
            Action::GoForward if !percept.bump => self.pose.advance(),
            Action::GoForward => {
                if !self.carrying_gold {
                    self.path.retract_forward();
                }
            }
            Action::TurnLeft | Action::TurnRight => self.pose.turn(action),
            Action::Shoot if percept.scream => self.wumpus_dead = true,
            Action::Grab if self.previous_percept.glitter && !self.carrying_gold => {
                self.carrying_gold = true;
                return true;
            }
            _ => {}
        }
        false
    }
}
