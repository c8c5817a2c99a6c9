//! Bit-packing state encoder.
//!
//! A [`StateLayout`] lists the fields that make up a state, most significant
//! first. Each field occupies a fixed number of bits, and the concatenated
//! bit string is read as an unsigned integer. Fields left out of the layout
//! are aliased away: situations that differ only in those fields share a key.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    identifiers::StateId,
    types::{Orientation, Percept, Pose},
};

/// Largest coordinate a 3-bit field can hold.
pub const MAX_COORDINATE: u32 = 0b111;

/// One field of the packed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateField {
    X,
    Y,
    Orientation,
    CarryingGold,
    Stench,
    Breeze,
    Glitter,
}

impl StateField {
    pub fn width(self) -> u32 {
        match self {
            StateField::X | StateField::Y => 3,
            StateField::Orientation => 2,
            StateField::CarryingGold
            | StateField::Stench
            | StateField::Breeze
            | StateField::Glitter => 1,
        }
    }

    fn mask(self) -> u32 {
        (1 << self.width()) - 1
    }
}

impl fmt::Display for StateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StateField::X => "x",
            StateField::Y => "y",
            StateField::Orientation => "orientation",
            StateField::CarryingGold => "gold",
            StateField::Stench => "stench",
            StateField::Breeze => "breeze",
            StateField::Glitter => "glitter",
        };
        f.write_str(label)
    }
}

impl FromStr for StateField {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(StateField::X),
            "y" => Ok(StateField::Y),
            "orientation" | "o" | "dir" => Ok(StateField::Orientation),
            "gold" | "carrying" | "carrying_gold" => Ok(StateField::CarryingGold),
            "stench" => Ok(StateField::Stench),
            "breeze" => Ok(StateField::Breeze),
            "glitter" => Ok(StateField::Glitter),
            _ => Err(Error::ParseStateField {
                input: s.to_string(),
                expected: "x, y, orientation, gold, stench, breeze, glitter".to_string(),
            }),
        }
    }
}

/// Everything the encoder may read when packing a state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Observation {
    pub pose: Pose,
    pub carrying_gold: bool,
    pub percept: Percept,
}

impl Observation {
    pub fn new(pose: Pose, carrying_gold: bool, percept: Percept) -> Self {
        Self {
            pose,
            carrying_gold,
            percept,
        }
    }
}

/// Ordered list of fields packed into a [`StateId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<StateField>", into = "Vec<StateField>")]
pub struct StateLayout {
    fields: Vec<StateField>,
}

impl StateLayout {
    /// Build a layout. Position and orientation are mandatory and no field
    /// may repeat.
    pub fn new(fields: Vec<StateField>) -> Result<Self> {
        for required in [StateField::X, StateField::Y, StateField::Orientation] {
            if !fields.contains(&required) {
                return Err(Error::InvalidConfiguration {
                    message: format!("state layout must include '{required}'"),
                });
            }
        }
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].contains(field) {
                return Err(Error::InvalidConfiguration {
                    message: format!("state layout lists '{field}' twice"),
                });
            }
        }
        Ok(Self { fields })
    }

    /// x, y, orientation: 8 bits, 256 states.
    pub fn pose_only() -> Self {
        Self {
            fields: vec![StateField::X, StateField::Y, StateField::Orientation],
        }
    }

    /// Pose plus the carrying-gold flag.
    pub fn with_gold() -> Self {
        Self {
            fields: vec![
                StateField::X,
                StateField::Y,
                StateField::Orientation,
                StateField::CarryingGold,
            ],
        }
    }

    pub fn fields(&self) -> &[StateField] {
        &self.fields
    }

    pub fn total_bits(&self) -> u32 {
        self.fields.iter().map(|field| field.width()).sum()
    }

    /// Number of distinct ids this layout can produce.
    pub fn state_count(&self) -> u64 {
        1u64 << self.total_bits()
    }

    /// Pack an observation into a state id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOutOfRange`] if x or y does not fit in
    /// three bits.
    pub fn encode(&self, observation: &Observation) -> Result<StateId> {
        let x = checked_coordinate('x', observation.pose.x)?;
        let y = checked_coordinate('y', observation.pose.y)?;
        Ok(self.pack(observation, x, y))
    }

    /// Pack an observation, clamping coordinates into the encodable range.
    pub fn encode_clamped(&self, observation: &Observation) -> StateId {
        let clamp = |value: i32| value.clamp(0, MAX_COORDINATE as i32) as u32;
        self.pack(
            observation,
            clamp(observation.pose.x),
            clamp(observation.pose.y),
        )
    }

    fn pack(&self, observation: &Observation, x: u32, y: u32) -> StateId {
        let percept = &observation.percept;
        let id = self.fields.iter().fold(0u32, |acc, &field| {
            let value = match field {
                StateField::X => x,
                StateField::Y => y,
                StateField::Orientation => observation.pose.orientation.index(),
                StateField::CarryingGold => u32::from(observation.carrying_gold),
                StateField::Stench => u32::from(percept.stench),
                StateField::Breeze => u32::from(percept.breeze),
                StateField::Glitter => u32::from(percept.glitter),
            };
            (acc << field.width()) | (value & field.mask())
        });
        StateId::new(id)
    }

    /// Split a state id back into its field values, in layout order.
    pub fn decode(&self, state: StateId) -> Vec<(StateField, u32)> {
        let mut remaining = state.value();
        let mut decoded: Vec<(StateField, u32)> = self
            .fields
            .iter()
            .rev()
            .map(|&field| {
                let value = remaining & field.mask();
                remaining >>= field.width();
                (field, value)
            })
            .collect();
        decoded.reverse();
        decoded
    }

    /// Render a decoded state as `x=1 y=0 orientation=up`.
    pub fn describe(&self, state: StateId) -> String {
        self.decode(state)
            .into_iter()
            .map(|(field, value)| match field {
                StateField::Orientation => {
                    format!("{field}={}", Orientation::from_index(value))
                }
                _ => format!("{field}={value}"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for StateLayout {
    fn default() -> Self {
        Self::with_gold()
    }
}

impl TryFrom<Vec<StateField>> for StateLayout {
    type Error = Error;

    fn try_from(fields: Vec<StateField>) -> Result<Self> {
        Self::new(fields)
    }
}

impl From<StateLayout> for Vec<StateField> {
    fn from(layout: StateLayout) -> Self {
        layout.fields
    }
}

impl fmt::Display for StateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.fields.iter().map(ToString::to_string).collect();
        f.write_str(&names.join(","))
    }
}

impl FromStr for StateLayout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let fields = s
            .split([',', ' '])
            .filter(|token| !token.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<StateField>>>()?;
        Self::new(fields)
    }
}

fn checked_coordinate(axis: char, value: i32) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|&coordinate| coordinate <= MAX_COORDINATE)
        .ok_or(Error::CoordinateOutOfRange {
            axis,
            value,
            max: MAX_COORDINATE,
        })
}
