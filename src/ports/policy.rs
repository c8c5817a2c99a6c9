//! Policy port - abstraction over how the next action is chosen
//!
//! The controller asks a policy for an action once per tick. Learning
//! policies (epsilon-greedy) read the value table and adapt their
//! exploration over time; a human-driven policy simply reads commands.

use crate::{
    identifiers::StateId,
    q_learning::{policy::Convergence, q_table::ValueTable},
    types::{Action, Mode},
};

/// Action selector consulted by the agent controller.
///
/// # Examples
///
/// ```
/// use wumpus_agent::{
///     identifiers::StateId,
///     ports::ActionPolicy,
///     q_learning::ValueTable,
///     types::{Action, Mode},
/// };
///
/// struct AlwaysForward;
///
/// impl ActionPolicy for AlwaysForward {
///     fn select_action(&mut self, _table: &ValueTable, _state: StateId, _mode: Mode) -> Action {
///         Action::GoForward
///     }
///
///     fn name(&self) -> &str {
///         "always-forward"
///     }
/// }
/// ```
pub trait ActionPolicy: Send {
    /// Choose the next action for `state` in the given behavioural mode.
    ///
    /// Must always return an action; there is no error path back to the
    /// simulator.
    fn select_action(&mut self, table: &ValueTable, state: StateId, mode: Mode) -> Action;

    /// Notify the policy that the terminal reward event for `mode` fired
    /// (gold grabbed while seeking, climbed out while carrying).
    ///
    /// `episodes_completed` is the number of finished episodes at that point.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for policies that do not explore.
    fn record_goal(&mut self, _mode: Mode, _episodes_completed: usize) {}

    /// Current exploration rate for `mode`, in percentage points.
    ///
    /// # Default Implementation
    ///
    /// Returns 0, i.e. the policy never explores at random.
    fn epsilon(&self, _mode: Mode) -> u32 {
        0
    }

    /// Episode counts at which each mode stopped exploring.
    ///
    /// # Default Implementation
    ///
    /// Reports neither mode as converged.
    fn convergence(&self) -> Convergence {
        Convergence::default()
    }

    /// Get the policy's name, used in logs.
    fn name(&self) -> &str;
}
