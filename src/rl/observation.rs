use crate::game::{Direction, GameState};

/// Number of features in an observation
pub const OBSERVATION_SIZE: usize = 15;

/// Fixed-layout feature vector fed to the Q-network
///
/// Layout:
/// - 0..3: danger straight, danger right, danger left
/// - 3..7: heading is Left, Right, Up, Down
/// - 7..11: food is left, right, up, down of the head
/// - 11..15: tail is left, right, up, down of the head
///
/// Values are raw 0/1 flags, no normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Observation(pub [u8; OBSERVATION_SIZE]);

impl Observation {
    pub fn features(&self) -> &[u8; OBSERVATION_SIZE] {
        &self.0
    }

    pub fn to_floats(&self) -> [f32; OBSERVATION_SIZE] {
        self.0.map(f32::from)
    }
}

/// Build the observation for the current state
pub fn create_observation(state: &GameState) -> Observation {
    let head = state.snake.head();
    let heading = state.snake.direction;
    let tail = state.snake.tail();

    let danger = |direction: Direction| state.is_collision(state.probe(direction));

    let flags = [
        danger(heading),
        danger(heading.clockwise()),
        danger(heading.counter_clockwise()),
        heading == Direction::Left,
        heading == Direction::Right,
        heading == Direction::Up,
        heading == Direction::Down,
        state.food.x < head.x,
        state.food.x > head.x,
        state.food.y < head.y,
        state.food.y > head.y,
        tail.x < head.x,
        tail.x > head.x,
        tail.y < head.y,
        tail.y > head.y,
    ];

    Observation(flags.map(u8::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, Snake};

    fn state_with(body: Vec<Position>, direction: Direction, food: Position) -> GameState {
        GameState::new(Snake::from_cells(body, direction), food, 640, 480, 20)
    }

    #[test]
    fn test_fresh_state_layout() {
        let state = state_with(
            vec![
                Position::new(320, 240),
                Position::new(300, 240),
                Position::new(280, 240),
            ],
            Direction::Right,
            Position::new(400, 100),
        );

        let obs = create_observation(&state);

        assert_eq!(
            obs.features(),
            &[
                0, 0, 0, // no danger
                0, 1, 0, 0, // heading right
                0, 1, 1, 0, // food right and up
                1, 0, 0, 0, // tail left
            ]
        );
    }

    #[test]
    fn test_direction_flags_one_hot() {
        for direction in Direction::CLOCKWISE {
            let state = state_with(vec![Position::new(320, 240)], direction, Position::new(0, 0));
            let obs = create_observation(&state);
            let dir_flags = &obs.features()[3..7];
            assert_eq!(dir_flags.iter().map(|&f| f as u32).sum::<u32>(), 1);
        }
    }

    #[test]
    fn test_wall_danger_is_relative() {
        // Heading up along the right wall: straight is free, right is the wall
        let state = state_with(
            vec![Position::new(620, 240), Position::new(620, 260)],
            Direction::Up,
            Position::new(0, 0),
        );
        let obs = create_observation(&state);
        assert_eq!(&obs.features()[0..3], &[0, 1, 0]);

        // Heading right into the top-right corner: straight and left are walls
        let state = state_with(
            vec![Position::new(620, 0), Position::new(600, 0)],
            Direction::Right,
            Position::new(0, 100),
        );
        let obs = create_observation(&state);
        assert_eq!(&obs.features()[0..3], &[1, 0, 1]);
    }

    #[test]
    fn test_body_danger() {
        // Body wraps round to sit on the left of a snake heading down
        let state = state_with(
            vec![
                Position::new(100, 100),
                Position::new(100, 80),
                Position::new(120, 80),
                Position::new(120, 100),
                Position::new(120, 120),
            ],
            Direction::Down,
            Position::new(300, 300),
        );
        let obs = create_observation(&state);
        // Left of Down is Right, where (120,100) sits
        assert_eq!(&obs.features()[0..3], &[0, 0, 1]);
    }

    #[test]
    fn test_food_aligned_gives_no_horizontal_flag() {
        let state = state_with(
            vec![Position::new(320, 240), Position::new(300, 240)],
            Direction::Right,
            Position::new(320, 400),
        );
        let obs = create_observation(&state);
        assert_eq!(&obs.features()[7..11], &[0, 0, 0, 1]);
    }

    #[test]
    fn test_tail_flags_single_cell() {
        let state = state_with(vec![Position::new(320, 240)], Direction::Right, Position::new(0, 0));
        let obs = create_observation(&state);
        assert_eq!(&obs.features()[11..15], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_to_floats() {
        let obs = Observation([1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
        let floats = obs.to_floats();
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[1], 0.0);
        assert_eq!(floats[14], 1.0);
    }
}
