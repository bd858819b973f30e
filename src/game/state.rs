use super::action::Direction;

/// A cell on the board, in pixel coordinates quantized to the block size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move one block of `block_size` pixels in a direction
    pub fn moved_in_direction(&self, direction: Direction, block_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * block_size, dy * block_size)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a straight snake trailing behind `head`
    pub fn new(head: Position, direction: Direction, length: usize, block_size: i32) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx * block_size, -dy * block_size);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Snake from explicit cells, head first
    pub fn from_cells(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty(), "snake needs at least one cell");
        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Last segment
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Body segments excluding head
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    /// Snake left the board
    Wall,
    /// Snake ran into itself
    SelfCollision,
    /// Too many steps for the current length
    Stalled,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub width: i32,
    pub height: i32,
    pub block_size: i32,
    pub score: u32,
    pub steps: u32,
    pub is_alive: bool,
}

impl GameState {
    pub fn new(snake: Snake, food: Position, width: i32, height: i32, block_size: i32) -> Self {
        Self {
            snake,
            food,
            width,
            height,
            block_size,
            score: 0,
            steps: 0,
            is_alive: true,
        }
    }

    /// Check if a position is on the board
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x <= self.width - self.block_size
            && pos.y >= 0
            && pos.y <= self.height - self.block_size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }

    /// True if `point` is off the board or on the body behind the head
    ///
    /// Works for hypothetical points as well as the real head.
    pub fn is_collision(&self, point: Position) -> bool {
        self.collision_at(point).is_some()
    }

    pub(crate) fn collision_at(&self, point: Position) -> Option<TerminationCause> {
        if !self.is_in_bounds(point) {
            return Some(TerminationCause::Wall);
        }

        if self.snake.collides_with_body(point) {
            return Some(TerminationCause::SelfCollision);
        }

        None
    }

    /// Cell one block away from the head in `direction`
    pub fn probe(&self, direction: Direction) -> Position {
        self.snake
            .head()
            .moved_in_direction(direction, self.block_size)
    }
}
