pub mod clock;
pub mod config;
pub mod engine;
pub mod food;
pub mod game;
pub mod input;
pub mod palette;
pub mod renderer;
pub mod snake;

#[cfg(feature = "web")]
pub mod web;

pub use engine::Game;
pub use renderer::{PixelRect, Surface};
