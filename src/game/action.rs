use serde::{Deserialize, Serialize};

/// Absolute direction the snake is heading on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Clockwise ordering used to resolve relative turns
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    fn clockwise_index(&self) -> usize {
        match self {
            Direction::Right => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Up => 3,
        }
    }

    /// Next direction when turning right
    pub fn clockwise(&self) -> Direction {
        Self::CLOCKWISE[(self.clockwise_index() + 1) % 4]
    }

    /// Next direction when turning left
    pub fn counter_clockwise(&self) -> Direction {
        Self::CLOCKWISE[(self.clockwise_index() + 3) % 4]
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.clockwise().clockwise() == other
    }

    /// Unit step (dx, dy) in screen coordinates, y grows downwards
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Number of actions the agent chooses between
pub const NUM_ACTIONS: usize = 3;

/// Action relative to the snake's current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelativeAction {
    Straight,
    TurnRight,
    TurnLeft,
}

impl RelativeAction {
    pub const ALL: [RelativeAction; NUM_ACTIONS] = [
        RelativeAction::Straight,
        RelativeAction::TurnRight,
        RelativeAction::TurnLeft,
    ];

    pub fn index(&self) -> usize {
        match self {
            RelativeAction::Straight => 0,
            RelativeAction::TurnRight => 1,
            RelativeAction::TurnLeft => 2,
        }
    }

    /// Convert a discrete index back into an action
    ///
    /// Indices past the last action map to `TurnLeft`, matching how a
    /// one-hot vector that is neither straight nor right is read.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => RelativeAction::Straight,
            1 => RelativeAction::TurnRight,
            _ => RelativeAction::TurnLeft,
        }
    }

    pub fn one_hot(&self) -> [u8; NUM_ACTIONS] {
        let mut encoded = [0; NUM_ACTIONS];
        encoded[self.index()] = 1;
        encoded
    }

    pub fn from_one_hot(encoded: [u8; NUM_ACTIONS]) -> Self {
        match encoded {
            [1, 0, 0] => RelativeAction::Straight,
            [0, 1, 0] => RelativeAction::TurnRight,
            _ => RelativeAction::TurnLeft,
        }
    }

    /// Heading that results from applying this action to `current`
    pub fn apply(&self, current: Direction) -> Direction {
        match self {
            RelativeAction::Straight => current,
            RelativeAction::TurnRight => current.clockwise(),
            RelativeAction::TurnLeft => current.counter_clockwise(),
        }
    }

    /// Relative action that steers `current` towards `desired`
    ///
    /// Reversals cannot be expressed as a single relative action and are
    /// treated as going straight.
    pub fn toward(current: Direction, desired: Direction) -> Self {
        if desired == current.clockwise() {
            RelativeAction::TurnRight
        } else if desired == current.counter_clockwise() {
            RelativeAction::TurnLeft
        } else {
            RelativeAction::Straight
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clockwise_cycle() {
        assert_eq!(Direction::Right.clockwise(), Direction::Down);
        assert_eq!(Direction::Down.clockwise(), Direction::Left);
        assert_eq!(Direction::Left.clockwise(), Direction::Up);
        assert_eq!(Direction::Up.clockwise(), Direction::Right);

        for dir in Direction::CLOCKWISE {
            assert_eq!(dir.clockwise().counter_clockwise(), dir);
        }
    }

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_apply_relative_action() {
        assert_eq!(RelativeAction::Straight.apply(Direction::Up), Direction::Up);
        assert_eq!(RelativeAction::TurnRight.apply(Direction::Up), Direction::Right);
        assert_eq!(RelativeAction::TurnLeft.apply(Direction::Up), Direction::Left);
        assert_eq!(RelativeAction::TurnLeft.apply(Direction::Right), Direction::Up);
    }

    #[test]
    fn test_one_hot() {
        assert_eq!(RelativeAction::Straight.one_hot(), [1, 0, 0]);
        assert_eq!(RelativeAction::TurnRight.one_hot(), [0, 1, 0]);
        assert_eq!(RelativeAction::TurnLeft.one_hot(), [0, 0, 1]);

        for action in RelativeAction::ALL {
            assert_eq!(RelativeAction::from_one_hot(action.one_hot()), action);
            assert_eq!(RelativeAction::from_index(action.index()), action);
        }

        assert_eq!(RelativeAction::from_one_hot([0, 0, 0]), RelativeAction::TurnLeft);
    }

    #[test]
    fn test_toward() {
        assert_eq!(
            RelativeAction::toward(Direction::Right, Direction::Down),
            RelativeAction::TurnRight
        );
        assert_eq!(
            RelativeAction::toward(Direction::Right, Direction::Up),
            RelativeAction::TurnLeft
        );
        assert_eq!(
            RelativeAction::toward(Direction::Right, Direction::Right),
            RelativeAction::Straight
        );
        // Reversal is ignored
        assert_eq!(
            RelativeAction::toward(Direction::Right, Direction::Left),
            RelativeAction::Straight
        );
    }
}
