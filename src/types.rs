//! Core vocabulary shared between the agent and the world simulator.
//!
//! The simulator owns the physics; these types only describe what crosses
//! the boundary each tick (a [`Percept`] in, an [`Action`] out) and the pose
//! the agent tracks for itself.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Actions the simulator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    GoForward,
    TurnLeft,
    TurnRight,
    Grab,
    Shoot,
    Climb,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::GoForward,
        Action::TurnLeft,
        Action::TurnRight,
        Action::Grab,
        Action::Shoot,
        Action::Climb,
    ];

    /// The turn that undoes this one, if this is a turn.
    pub fn inverse_turn(self) -> Option<Action> {
        match self {
            Action::TurnLeft => Some(Action::TurnRight),
            Action::TurnRight => Some(Action::TurnLeft),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::GoForward => "forward",
            Action::TurnLeft => "left",
            Action::TurnRight => "right",
            Action::Grab => "grab",
            Action::Shoot => "shoot",
            Action::Climb => "climb",
        };
        f.write_str(label)
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f" | "w" | "forward" | "go_forward" => Ok(Action::GoForward),
            "l" | "a" | "left" | "turn_left" => Ok(Action::TurnLeft),
            "r" | "d" | "right" | "turn_right" => Ok(Action::TurnRight),
            "g" | "grab" => Ok(Action::Grab),
            "s" | "shoot" => Ok(Action::Shoot),
            "c" | "climb" => Ok(Action::Climb),
            _ => Err(Error::ParseAction {
                input: s.to_string(),
                expected: "forward/f, left/l, right/r, grab/g, shoot/s, climb/c".to_string(),
            }),
        }
    }
}

/// The actions that have a slot in the value table, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSet {
    /// GoForward, TurnLeft, TurnRight, Shoot. Grab and Climb are left to the
    /// controller (auto-grab and path replay).
    Navigation,
    /// All six actions; grabbing and climbing are learned.
    #[default]
    Full,
}

impl ActionSet {
    const NAVIGATION: [Action; 4] = [
        Action::GoForward,
        Action::TurnLeft,
        Action::TurnRight,
        Action::Shoot,
    ];

    pub fn actions(self) -> &'static [Action] {
        match self {
            ActionSet::Navigation => &Self::NAVIGATION,
            ActionSet::Full => &Action::ALL,
        }
    }

    /// Length of each value-table row.
    pub fn width(self) -> usize {
        self.actions().len()
    }

    /// Slot of `action` in the value table, or `None` if it has no slot.
    pub fn index_of(self, action: Action) -> Option<usize> {
        self.actions().iter().position(|&candidate| candidate == action)
    }

    /// Action stored at `index`. Out-of-range indices fall back to the first slot.
    pub fn action_at(self, index: usize) -> Action {
        let actions = self.actions();
        actions.get(index).copied().unwrap_or(actions[0])
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionSet::Navigation => "navigation",
            ActionSet::Full => "full",
        };
        f.write_str(label)
    }
}

impl FromStr for ActionSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "navigation" | "nav" | "4" => Ok(ActionSet::Navigation),
            "full" | "6" => Ok(ActionSet::Full),
            _ => Err(Error::ParseActionSet {
                input: s.to_string(),
                expected: "navigation/4, full/6".to_string(),
            }),
        }
    }
}

/// Sensory report from the simulator for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Percept {
    pub stench: bool,
    pub breeze: bool,
    pub glitter: bool,
    pub bump: bool,
    pub scream: bool,
}

impl Percept {
    pub fn with_stench(mut self) -> Self {
        self.stench = true;
        self
    }

    pub fn with_breeze(mut self) -> Self {
        self.breeze = true;
        self
    }

    pub fn with_glitter(mut self) -> Self {
        self.glitter = true;
        self
    }

    pub fn with_bump(mut self) -> Self {
        self.bump = true;
        self
    }

    pub fn with_scream(mut self) -> Self {
        self.scream = true;
        self
    }
}

/// Facing direction. Values are cyclic in counter-clockwise order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Right = 0,
    Up = 1,
    Left = 2,
    Down = 3,
}

impl Orientation {
    pub fn from_index(index: u32) -> Self {
        match index % 4 {
            0 => Orientation::Right,
            1 => Orientation::Up,
            2 => Orientation::Left,
            _ => Orientation::Down,
        }
    }

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn turned_left(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn turned_right(self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Orientation::Right => "right",
            Orientation::Up => "up",
            Orientation::Left => "left",
            Orientation::Down => "down",
        };
        f.write_str(label)
    }
}

/// Where the agent believes it is. The entrance is (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: i32,
    pub y: i32,
    pub orientation: Orientation,
}

impl Pose {
    pub fn new(x: i32, y: i32, orientation: Orientation) -> Self {
        Self { x, y, orientation }
    }

    pub fn at_entrance(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Step one cell in the facing direction.
    pub fn advance(&mut self) {
        match self.orientation {
            Orientation::Right => self.x += 1,
            Orientation::Up => self.y += 1,
            Orientation::Left => self.x -= 1,
            Orientation::Down => self.y -= 1,
        }
    }

    /// Apply a turn action. Non-turn actions leave the pose unchanged.
    pub fn turn(&mut self, action: Action) {
        match action {
            Action::TurnLeft => self.orientation = self.orientation.turned_left(),
            Action::TurnRight => self.orientation = self.orientation.turned_right(),
            _ => {}
        }
    }
}

/// Behavioural mode, used to pick the exploration rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Seeking,
    Carrying,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Seeking => f.write_str("seeking"),
            Mode::Carrying => f.write_str("carrying"),
        }
    }
}
