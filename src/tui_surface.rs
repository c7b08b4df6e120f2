use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use unicode_width::UnicodeWidthChar;

use canvas_snake::palette::Rgb;
use canvas_snake::renderer::{PixelRect, Surface};

/// Surface pixels covered by one terminal column.
pub const COLUMN_WIDTH_PX: u32 = 8;

/// Surface pixels covered by one terminal row.
pub const ROW_HEIGHT_PX: u32 = 16;

/// Paints pixel-space drawing calls onto terminal cells inside `area`.
pub struct TuiSurface<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
}

impl<'a> TuiSurface<'a> {
    pub fn new(buffer: &'a mut Buffer, area: Rect) -> Self {
        Self { buffer, area }
    }

    fn paint_cells(&mut self, columns: (u16, u16), rows: (u16, u16), color: Color) {
        for row in rows.0..rows.1 {
            for column in columns.0..columns.1 {
                let Some((x, y)) = self.to_terminal(column, row) else {
                    continue;
                };
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ").set_bg(color);
                }
            }
        }
    }

    fn to_terminal(&self, column: u16, row: u16) -> Option<(u16, u16)> {
        let x = self.area.x.checked_add(column)?;
        let y = self.area.y.checked_add(row)?;
        if x >= self.area.right() || y >= self.area.bottom() {
            return None;
        }

        Some((x, y))
    }
}

impl Surface for TuiSurface<'_> {
    fn clear(&mut self, color: Rgb) {
        self.paint_cells((0, self.area.width), (0, self.area.height), to_color(color));
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        let columns = span(rect.x, rect.width, COLUMN_WIDTH_PX);
        let rows = span(rect.y, rect.height, ROW_HEIGHT_PX);
        self.paint_cells(columns, rows, to_color(color));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Rgb) {
        let mut column = to_cell_index(x, COLUMN_WIDTH_PX);
        let row = to_cell_index(y, ROW_HEIGHT_PX);
        let fg = to_color(color);

        for glyph in text.chars() {
            let width = glyph.width().unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            let Some((cell_x, cell_y)) = self.to_terminal(column, row) else {
                break;
            };
            if cell_x + width > self.area.right() {
                break;
            }
            if let Some(cell) = self.buffer.cell_mut((cell_x, cell_y)) {
                cell.set_char(glyph).set_fg(fg);
            }
            column += width;
        }
    }
}

/// Converts a terminal cell inside `area` to the surface pixel at its centre.
///
/// Cells outside `area` give coordinates outside the surface; the engine
/// clamps them.
#[must_use]
pub fn terminal_to_pixel(area: Rect, column: u16, row: u16) -> (f64, f64) {
    let local_x = f64::from(column) - f64::from(area.x);
    let local_y = f64::from(row) - f64::from(area.y);

    (
        local_x * f64::from(COLUMN_WIDTH_PX) + f64::from(COLUMN_WIDTH_PX) / 2.0,
        local_y * f64::from(ROW_HEIGHT_PX) + f64::from(ROW_HEIGHT_PX) / 2.0,
    )
}

/// Terminal columns and rows needed to show a surface of the given size.
#[must_use]
pub fn cells_for_surface(width_px: u32, height_px: u32) -> (u16, u16) {
    let columns = width_px.div_ceil(COLUMN_WIDTH_PX);
    let rows = height_px.div_ceil(ROW_HEIGHT_PX);
    (
        u16::try_from(columns).unwrap_or(u16::MAX),
        u16::try_from(rows).unwrap_or(u16::MAX),
    )
}

fn span(start: f64, length: f64, cell_px: u32) -> (u16, u16) {
    let cell = f64::from(cell_px);
    let first = (start.max(0.0) / cell).floor();
    let last = ((start + length).max(0.0) / cell).ceil();
    (saturate(first), saturate(last))
}

fn to_cell_index(pixel: f64, cell_px: u32) -> u16 {
    saturate((pixel.max(0.0) / f64::from(cell_px)).round())
}

fn saturate(value: f64) -> u16 {
    value.clamp(0.0, f64::from(u16::MAX)) as u16
}

fn to_color(Rgb([r, g, b]): Rgb) -> Color {
    Color::Rgb(r, g, b)
}
