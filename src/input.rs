use crate::config::{CELL_SIZE_PX, GridSize};
use crate::snake::Position;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit cell offset for one step in this direction.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// A click already normalised into surface pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    /// Clamps raw host coordinates onto the surface of `bounds`.
    ///
    /// Non-finite values collapse to 0 before clamping.
    #[must_use]
    pub fn clamped(x: f64, y: f64, bounds: GridSize) -> Self {
        let max_x = f64::from(bounds.pixel_width().saturating_sub(1));
        let max_y = f64::from(bounds.pixel_height().saturating_sub(1));

        Self {
            x: finite_or_zero(x).clamp(0.0, max_x),
            y: finite_or_zero(y).clamp(0.0, max_y),
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Pixel centre of a cell as the renderer draws it.
#[must_use]
pub fn cell_center(position: Position) -> PixelPoint {
    let cell = f64::from(CELL_SIZE_PX);
    PixelPoint {
        x: f64::from(position.x) * cell + cell / 2.0,
        y: f64::from(position.y) * cell + cell / 2.0,
    }
}

/// Maps a click to the direction pointing from the head towards it.
///
/// The axis with the larger offset wins; equal offsets prefer the
/// horizontal axis.
#[must_use]
pub fn direction_towards(head: Position, click: PixelPoint) -> Direction {
    let center = cell_center(head);
    let dx = click.x - center.x;
    let dy = click.y - center.y;

    if dx.abs() >= dy.abs() {
        if dx < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    } else if dy < 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, PixelPoint, direction_change_is_valid, direction_towards};
    use crate::config::DEFAULT_GRID;
    use crate::snake::Position;

    const HEAD: Position = Position { x: 10, y: 10 };

    fn click(x: f64, y: f64) -> PixelPoint {
        PixelPoint { x, y }
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn direction_change_rejects_reverse() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn larger_offset_selects_axis() {
        // Head centre is (168, 168).
        assert_eq!(direction_towards(HEAD, click(300.0, 200.0)), Direction::Right);
        assert_eq!(direction_towards(HEAD, click(0.0, 100.0)), Direction::Left);
        assert_eq!(direction_towards(HEAD, click(150.0, 0.0)), Direction::Up);
        assert_eq!(direction_towards(HEAD, click(180.0, 319.0)), Direction::Down);
    }

    #[test]
    fn tie_prefers_horizontal_axis() {
        assert_eq!(direction_towards(HEAD, click(178.0, 178.0)), Direction::Right);
        assert_eq!(direction_towards(HEAD, click(158.0, 158.0)), Direction::Left);
    }

    #[test]
    fn click_on_head_centre_maps_right() {
        assert_eq!(direction_towards(HEAD, click(168.0, 168.0)), Direction::Right);
    }

    #[test]
    fn clamping_pins_coordinates_to_surface() {
        let point = PixelPoint::clamped(-40.0, 9_000.0, DEFAULT_GRID);
        assert_eq!(point, click(0.0, 319.0));

        let point = PixelPoint::clamped(f64::NAN, f64::INFINITY, DEFAULT_GRID);
        assert_eq!(point, click(0.0, 0.0));
    }
}
