//! `wasm-bindgen` bindings for the browser page.
//!
//! The page loads the module, sizes its canvas from `Game.width()` /
//! `Game.height()`, calls `tick(delta)` then `render(ctx)` every animation
//! frame and forwards normalised clicks to `click(x, y)`.

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::engine::Game;
use crate::palette::Rgb;
use crate::renderer::{PixelRect, Surface, TEXT_LINE_HEIGHT_PX};

#[wasm_bindgen(js_name = Game)]
pub struct WebGame {
    inner: Game,
}

#[wasm_bindgen(js_class = Game)]
impl WebGame {
    pub fn new() -> WebGame {
        WebGame { inner: Game::new() }
    }

    pub fn width() -> u32 {
        Game::width()
    }

    pub fn height() -> u32 {
        Game::height()
    }

    pub fn tick(&mut self, elapsed_milliseconds: f64) {
        self.inner.tick(elapsed_milliseconds);
    }

    pub fn click(&mut self, x: f64, y: f64) {
        self.inner.click(x, y);
    }

    pub fn restart(&mut self) {
        self.inner.restart();
    }

    pub fn score(&self) -> u32 {
        self.inner.score()
    }

    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let mut surface = CanvasSurface {
            ctx,
            width: f64::from(self.inner.surface_width()),
            height: f64::from(self.inner.surface_height()),
        };
        self.inner.render(&mut surface);
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, color: Rgb) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Rgb) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(&format!("{TEXT_LINE_HEIGHT_PX}px monospace"));
        self.ctx.set_text_baseline("top");
        if let Err(error) = self.ctx.fill_text(text, x, y) {
            warn!("fill_text failed: {error:?}");
        }
    }
}
