use crate::config::CELL_SIZE_PX;
use crate::game::{GameState, GameStatus};
use crate::palette::{Palette, Rgb};
use crate::snake::Position;

/// Gap left around each cell so neighbouring segments stay distinguishable.
const CELL_INSET_PX: f64 = 1.0;

/// Nominal glyph advance used to centre overlay text.
pub const TEXT_CHAR_WIDTH_PX: f64 = 8.0;

/// Nominal line height of overlay text.
pub const TEXT_LINE_HEIGHT_PX: f64 = 16.0;

const OVERLAY_BAND_HEIGHT_PX: f64 = 56.0;

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A 2D drawing target addressed in the game's pixel space.
///
/// Text is anchored at its top-left corner.
pub trait Surface {
    fn clear(&mut self, color: Rgb);
    fn fill_rect(&mut self, rect: PixelRect, color: Rgb);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Rgb);
}

/// Renders the full game frame from immutable state.
pub fn render<S: Surface + ?Sized>(surface: &mut S, state: &GameState, palette: &Palette) {
    surface.clear(palette.background);

    if let Some(food) = state.food {
        surface.fill_rect(cell_rect(food.position), palette.food);
    }

    render_snake(surface, state, palette);

    match state.status {
        GameStatus::Playing => {}
        GameStatus::GameOver => render_overlay(surface, state, palette, "GAME OVER"),
        GameStatus::Victory => render_overlay(surface, state, palette, "YOU WIN"),
    }
}

fn render_snake<S: Surface + ?Sized>(surface: &mut S, state: &GameState, palette: &Palette) {
    let head = state.snake.head();

    // Tail first so the head is painted last.
    for segment in state.snake.segments().rev() {
        let color = if *segment == head {
            palette.snake_head
        } else {
            palette.snake_body
        };
        surface.fill_rect(cell_rect(*segment), color);
    }
}

fn render_overlay<S: Surface + ?Sized>(
    surface: &mut S,
    state: &GameState,
    palette: &Palette,
    title: &str,
) {
    let width = f64::from(state.bounds().pixel_width());
    let height = f64::from(state.bounds().pixel_height());
    let band_top = ((height - OVERLAY_BAND_HEIGHT_PX) / 2.0).max(0.0);

    surface.fill_rect(
        PixelRect {
            x: 0.0,
            y: band_top,
            width,
            height: OVERLAY_BAND_HEIGHT_PX.min(height),
        },
        palette.overlay,
    );

    let score_line = format!("Score: {}", state.score);
    let text_top = band_top + (OVERLAY_BAND_HEIGHT_PX - 2.0 * TEXT_LINE_HEIGHT_PX) / 2.0;
    for (row, line) in [title, score_line.as_str()].into_iter().enumerate() {
        let text_width = line.chars().count() as f64 * TEXT_CHAR_WIDTH_PX;
        let x = ((width - text_width) / 2.0).max(0.0);
        let y = text_top + row as f64 * TEXT_LINE_HEIGHT_PX;
        surface.fill_text(line, x, y, palette.text);
    }
}

/// The on-surface rectangle of a grid cell, inset by the grid gap.
#[must_use]
pub fn cell_rect(position: Position) -> PixelRect {
    let cell = f64::from(CELL_SIZE_PX);
    PixelRect {
        x: f64::from(position.x) * cell + CELL_INSET_PX,
        y: f64::from(position.y) * cell + CELL_INSET_PX,
        width: cell - 2.0 * CELL_INSET_PX,
        height: cell - 2.0 * CELL_INSET_PX,
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::food::Food;
    use crate::game::{GameState, GameStatus};
    use crate::palette::{Palette, Rgb};
    use crate::snake::Position;

    use super::{PixelRect, Surface, cell_rect, render};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear(Rgb),
        Rect(PixelRect, Rgb),
        Text(String, Rgb),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, color: Rgb) {
            self.ops.push(Op::Clear(color));
        }

        fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
            self.ops.push(Op::Rect(rect, color));
        }

        fn fill_text(&mut self, text: &str, _x: f64, _y: f64, color: Rgb) {
            self.ops.push(Op::Text(text.to_owned(), color));
        }
    }

    fn state_with_food() -> GameState {
        let mut state =
            GameState::new_with_seed(GameConfig::default(), 21).expect("default config is valid");
        state.food = Some(Food::new(Position { x: 2, y: 3 }));
        state
    }

    #[test]
    fn frame_draws_background_food_then_snake_head_last() {
        let state = state_with_food();
        let palette = Palette::default();
        let mut surface = Recorder::default();

        render(&mut surface, &state, &palette);

        assert_eq!(surface.ops.len(), 1 + 1 + 3);
        assert_eq!(surface.ops[0], Op::Clear(palette.background));
        assert_eq!(
            surface.ops[1],
            Op::Rect(cell_rect(Position { x: 2, y: 3 }), palette.food)
        );
        assert_eq!(
            surface.ops[4],
            Op::Rect(cell_rect(Position { x: 10, y: 10 }), palette.snake_head)
        );
        assert!(
            surface.ops[2..4]
                .iter()
                .all(|op| matches!(op, Op::Rect(_, color) if *color == palette.snake_body))
        );
    }

    #[test]
    fn game_over_frame_adds_overlay_with_score() {
        let mut state = state_with_food();
        state.score = 7;
        state.status = GameStatus::GameOver;
        let palette = Palette::default();
        let mut surface = Recorder::default();

        render(&mut surface, &state, &palette);

        let texts: Vec<_> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["GAME OVER", "Score: 7"]);
        assert!(
            surface
                .ops
                .iter()
                .any(|op| matches!(op, Op::Rect(_, color) if *color == palette.overlay))
        );
    }

    #[test]
    fn victory_frame_without_food_still_renders() {
        let mut state = state_with_food();
        state.food = None;
        state.status = GameStatus::Victory;
        let mut surface = Recorder::default();

        render(&mut surface, &state, &Palette::default());

        assert!(surface.ops.contains(&Op::Text(
            "YOU WIN".to_owned(),
            Palette::default().text
        )));
    }

    #[test]
    fn cells_are_inset_inside_their_grid_square() {
        assert_eq!(
            cell_rect(Position { x: 1, y: 2 }),
            PixelRect {
                x: 17.0,
                y: 33.0,
                width: 14.0,
                height: 14.0,
            }
        );
    }
}
