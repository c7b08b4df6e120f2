use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }

    /// The neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body plus its steering state.
///
/// `direction` is the heading used by the last step; `pending_direction`
/// is a single slot overwritten by input and copied into `direction` at
/// the start of every step.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates a straight snake of `length` cells with its head at `head`,
    /// trailing away from `direction`.
    #[must_use]
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let behind = direction.opposite();
        let body = std::iter::successors(Some(head), |cell| Some(cell.step(behind)))
            .take(length.max(1))
            .collect();

        Self {
            body,
            direction,
            pending_direction: direction,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
            pending_direction: direction,
        }
    }

    /// Buffers a steering request for the next step.
    ///
    /// Reversals of the current heading are dropped; anything else
    /// replaces whatever was buffered before. Returns whether the request
    /// was accepted.
    pub fn buffer_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }

        self.pending_direction = direction;
        true
    }

    /// Consumes the pending slot and returns the cell the head moves into.
    ///
    /// The result may lie outside the grid; bounds are the caller's concern.
    pub fn commit_direction(&mut self) -> Position {
        self.direction = self.pending_direction;
        self.head().step(self.direction)
    }

    /// Returns true when moving the head into `cell` hits the body.
    ///
    /// On a non-growing move the tail leaves its cell in the same step, so
    /// the tail does not block.
    #[must_use]
    pub fn blocks(&self, cell: Position, growing: bool) -> bool {
        let checked = if growing {
            self.body.len()
        } else {
            self.body.len() - 1
        };

        self.body.iter().take(checked).any(|segment| *segment == cell)
    }

    /// Moves the head into `next_head`, keeping the tail when `grow` is set.
    pub fn advance(&mut self, next_head: Position, grow: bool) {
        self.body.push_front(next_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the heading of the last step.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the heading the next step will take.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::input::Direction;

    use super::{Position, Snake};

    fn segments(snake: &Snake) -> Vec<Position> {
        snake.segments().copied().collect()
    }

    #[test]
    fn position_wrapping_keeps_coordinates_inside_bounds() {
        let bounds = GridSize {
            width: 10,
            height: 8,
        };

        let wrapped_left = Position { x: -1, y: 3 }.wrapped(bounds);
        let wrapped_bottom = Position { x: 4, y: 8 }.wrapped(bounds);

        assert_eq!(wrapped_left, Position { x: 9, y: 3 });
        assert_eq!(wrapped_bottom, Position { x: 4, y: 0 });
    }

    #[test]
    fn new_snake_trails_behind_head() {
        let snake = Snake::new(Position { x: 10, y: 10 }, Direction::Right, 3);

        assert_eq!(
            segments(&snake),
            vec![
                Position { x: 10, y: 10 },
                Position { x: 9, y: 10 },
                Position { x: 8, y: 10 },
            ]
        );
        assert_eq!(snake.tail(), Position { x: 8, y: 10 });
    }

    #[test]
    fn snake_moves_one_cell_per_step() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right, 3);

        let next = snake.commit_direction();
        snake.advance(next, false);

        assert_eq!(snake.head(), Position { x: 6, y: 5 });
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn snake_growth_keeps_previous_tail() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right, 3);

        let next = snake.commit_direction();
        snake.advance(next, true);

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position { x: 3, y: 5 });
    }

    #[test]
    fn direction_buffer_rejects_reverse() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Up, 3);

        assert!(!snake.buffer_direction(Direction::Down));
        assert_eq!(snake.pending_direction(), Direction::Up);
        assert_eq!(snake.commit_direction(), Position { x: 5, y: 4 });
    }

    #[test]
    fn direction_buffer_keeps_last_input_only() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right, 3);

        assert!(snake.buffer_direction(Direction::Up));
        assert!(snake.buffer_direction(Direction::Down));

        let next = snake.commit_direction();
        snake.advance(next, false);
        assert_eq!(snake.head(), Position { x: 5, y: 6 });

        // Nothing queued behind the consumed input.
        let next = snake.commit_direction();
        assert_eq!(next, Position { x: 5, y: 7 });
    }

    #[test]
    fn reversal_is_judged_against_committed_heading() {
        let mut snake = Snake::new(Position { x: 5, y: 5 }, Direction::Right, 3);

        // Up is buffered but not yet applied, so Down is still legal.
        assert!(snake.buffer_direction(Direction::Up));
        assert!(snake.buffer_direction(Direction::Down));
        assert!(!snake.buffer_direction(Direction::Left));
        assert_eq!(snake.pending_direction(), Direction::Down);
    }

    #[test]
    #[should_panic(expected = "at least one segment")]
    fn empty_segment_list_is_refused() {
        let _ = Snake::from_segments(Vec::new(), Direction::Up);
    }

    #[test]
    fn vacating_tail_does_not_block() {
        // A 2x2 loop: the head chases its own tail.
        let snake = Snake::from_segments(
            vec![
                Position { x: 1, y: 0 },
                Position { x: 1, y: 1 },
                Position { x: 0, y: 1 },
                Position { x: 0, y: 0 },
            ],
            Direction::Up,
        );
        let tail = Position { x: 0, y: 0 };

        assert!(!snake.blocks(tail, false));
        assert!(snake.blocks(tail, true));
        assert!(snake.blocks(Position { x: 1, y: 1 }, false));
    }
}
