//! Tabular Q-learning
//!
//! The pieces the agent controller composes each tick:
//!
//! - [`encoder`]: packs pose, gold and percept bits into a [`StateId`](crate::identifiers::StateId)
//! - [`q_table`]: sparse state → action-value rows
//! - [`reward`]: priority-ordered reward rules
//! - [`learner`]: the one-step TD update and terminal-value handling
//! - [`policy`]: epsilon-greedy and manual action selection
//!
//! ## Update rule
//!
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//!
//! ## Usage Example
//!
//! ```
//! use wumpus_agent::identifiers::StateId;
//! use wumpus_agent::q_learning::{TdLearner, TerminalStrategy, ValueTable};
//!
//! let mut table = ValueTable::new(4);
//! table.set(StateId::new(1), 0, 5.0);
//! table.insert_row(StateId::new(2), vec![2.0, 9.0, 0.0, 0.0])?;
//!
//! let learner = TdLearner::new(1.0, 1.0, TerminalStrategy::Pin);
//! let q = learner.update(&mut table, StateId::new(1), 0, 10.0, StateId::new(2));
//! assert_eq!(q, 19.0);
//! # Ok::<(), wumpus_agent::Error>(())
//! ```

pub mod encoder;
pub mod learner;
pub mod policy;
pub mod q_table;
pub mod reward;

// Public re-exports
pub use encoder::{Observation, StateField, StateLayout};
pub use learner::{TdLearner, TerminalStrategy};
pub use policy::{EpsilonGreedyPolicy, ExplorationSchedule, ManualPolicy};
pub use q_table::ValueTable;
pub use reward::{RewardModel, RewardSchedule};
