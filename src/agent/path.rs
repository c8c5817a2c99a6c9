//! Path recording and replay for returning to the entrance.

use crate::types::Action;

/// LIFO record of the moves taken while seeking.
///
/// Forward moves are stored as-is and turns as their inverse. Once the gold
/// is in hand, [`PathStack::next_home_step`] turns the agent around before
/// the first forward move and then pops the stack, which walks the same
/// cells back to the entrance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathStack {
    steps: Vec<Action>,
    reversed: bool,
}

impl PathStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action taken while seeking. Actions that do not move or
    /// rotate the agent are not recorded.
    pub fn record(&mut self, action: Action) {
        match action {
            Action::GoForward => self.steps.push(Action::GoForward),
            Action::TurnLeft | Action::TurnRight => {
                if let Some(inverse) = action.inverse_turn() {
                    self.steps.push(inverse);
                }
            }
            _ => {}
        }
    }

    /// Forget the last forward move; used when it bumped into a wall.
    pub fn retract_forward(&mut self) {
        if self.steps.last() == Some(&Action::GoForward) {
            self.steps.pop();
        }
    }

    /// Next action on the way home. Climb once the stack is empty.
    pub fn next_home_step(&mut self) -> Action {
        match self.steps.last() {
            None => Action::Climb,
            Some(Action::GoForward) if !self.reversed => {
                // Half turn: this one now, the second on the next tick.
                self.reversed = true;
                self.steps.push(Action::TurnLeft);
                Action::TurnLeft
            }
            Some(_) => self.steps.pop().unwrap_or(Action::Climb),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pose;

    fn replay_home(path: &mut PathStack, mut pose: Pose) -> Pose {
        for _ in 0..100 {
            match path.next_home_step() {
                Action::Climb => return pose,
                Action::GoForward => pose.advance(),
                turn => pose.turn(turn),
            }
        }
        panic!("path replay did not terminate");
    }

    #[test]
    fn test_replay_returns_to_entrance() {
        let mut path = PathStack::new();
        let mut pose = Pose::default();
        for action in [
            Action::GoForward,
            Action::GoForward,
            Action::TurnLeft,
            Action::GoForward,
            Action::TurnRight,
            Action::GoForward,
        ] {
            path.record(action);
            match action {
                Action::GoForward => pose.advance(),
                turn => pose.turn(turn),
            }
        }
        assert_eq!((pose.x, pose.y), (3, 1));

        let home = replay_home(&mut path, pose);
        assert!(home.at_entrance());
    }

    #[test]
    fn test_trailing_turns_are_undone_first() {
        let mut path = PathStack::new();
        path.record(Action::GoForward);
        path.record(Action::TurnLeft);
        assert_eq!(path.next_home_step(), Action::TurnRight);
        assert_eq!(path.next_home_step(), Action::TurnLeft);
        assert_eq!(path.next_home_step(), Action::TurnLeft);
        assert_eq!(path.next_home_step(), Action::GoForward);
        assert_eq!(path.next_home_step(), Action::Climb);
    }

    #[test]
    fn test_retract_only_drops_forward() {
        let mut path = PathStack::new();
        path.record(Action::TurnLeft);
        path.retract_forward();
        assert_eq!(path.len(), 1);
        path.record(Action::GoForward);
        path.retract_forward();
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_non_moves_are_not_recorded() {
        let mut path = PathStack::new();
        path.record(Action::Shoot);
        path.record(Action::Grab);
        assert!(path.is_empty());
        assert_eq!(path.next_home_step(), Action::Climb);
    }
}
