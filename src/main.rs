mod terminal_runtime;
mod tui_surface;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use canvas_snake::Game;
use canvas_snake::config::{BoundaryMode, ConfigError, GameConfig};
use canvas_snake::game::GameStatus;
use canvas_snake::input::{Direction, cell_center};
use canvas_snake::palette::{Palette, PaletteError};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use log::{LevelFilter, info};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use simplelog::{Config, WriteLogger};
use thiserror::Error;

use terminal_runtime::{TerminalSession, install_panic_hook};
use tui_surface::{TuiSurface, cells_for_surface, terminal_to_pixel};

const APP_DIR_NAME: &str = "canvas-snake";
const PALETTE_FILE_NAME: &str = "palette.json";
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(about = "Click-steered snake in the terminal")]
struct Cli {
    /// Seed for food placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON palette file.
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Let the snake pass through walls.
    #[arg(long)]
    wrap: bool,

    /// Write debug logs to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum HostError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to initialise logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

fn main() -> Result<(), HostError> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        WriteLogger::init(LevelFilter::Debug, Config::default(), File::create(path)?)?;
    }

    // Resolve everything fallible before raw mode so errors stay readable.
    let palette = resolve_palette(cli.palette.as_deref())?;
    let game = build_game(&cli)?.with_palette(palette);

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    run(&mut session, game)?;

    Ok(())
}

fn build_game(cli: &Cli) -> Result<Game, ConfigError> {
    let config = GameConfig {
        boundary: if cli.wrap {
            BoundaryMode::Wrap
        } else {
            BoundaryMode::Solid
        },
        ..GameConfig::default()
    };

    match cli.seed {
        Some(seed) => Game::with_config(config, seed),
        None if config == GameConfig::default() => Ok(Game::new()),
        None => Game::with_config(config, rand::random()),
    }
}

fn resolve_palette(explicit: Option<&Path>) -> Result<Palette, PaletteError> {
    if let Some(path) = explicit {
        return Palette::load(path);
    }

    let Some(path) = default_palette_path().filter(|path| path.exists()) else {
        return Ok(Palette::default());
    };

    match Palette::load(&path) {
        Ok(palette) => Ok(palette),
        Err(error) => {
            eprintln!("Ignoring palette: {error}");
            Ok(Palette::default())
        }
    }
}

fn default_palette_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(PALETTE_FILE_NAME);
    Some(base)
}

fn run(session: &mut TerminalSession, mut game: Game) -> io::Result<()> {
    let mut last_frame = Instant::now();
    let mut play_area = Rect::default();
    let mut last_status = game.status();

    info!("session started");

    loop {
        let now = Instant::now();
        let delta = now.duration_since(last_frame);
        last_frame = now;

        game.tick(delta.as_secs_f64() * 1_000.0);

        if game.status() != last_status {
            if game.status() != GameStatus::Playing {
                info!("round finished with score {}", game.score());
            }
            last_status = game.status();
        }

        session
            .terminal_mut()
            .draw(|frame| play_area = draw(frame, &game))?;

        if !event::poll(FRAME_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('r') => game.restart(),
                KeyCode::Up => steer_with_key(&mut game, Direction::Up),
                KeyCode::Down => steer_with_key(&mut game, Direction::Down),
                KeyCode::Left => steer_with_key(&mut game, Direction::Left),
                KeyCode::Right => steer_with_key(&mut game, Direction::Right),
                _ => {}
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let (x, y) = terminal_to_pixel(play_area, mouse.column, mouse.row);
                game.click(x, y);
            }
            _ => {}
        }
    }

    info!("session ended");
    Ok(())
}

/// Arrow keys become a click one cell beside the head.
fn steer_with_key(game: &mut Game, direction: Direction) {
    let center = cell_center(game.state().snake.head());
    let (dx, dy) = direction.delta();
    let cell = f64::from(canvas_snake::config::CELL_SIZE_PX);
    game.click(center.x + f64::from(dx) * cell, center.y + f64::from(dy) * cell);
}

/// Draws the board and status line; returns where the board landed.
fn draw(frame: &mut Frame<'_>, game: &Game) -> Rect {
    let (columns, rows) = cells_for_surface(game.surface_width(), game.surface_height());
    let [board_row, status_row] =
        Layout::vertical([Constraint::Length(rows), Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(frame.area());
    let [board] = Layout::horizontal([Constraint::Length(columns)])
        .flex(Flex::Center)
        .areas(board_row);

    if board.width < columns || board.height < rows {
        frame.render_widget(
            Paragraph::new(format!("Terminal too small: need {columns}x{}", rows + 1))
                .alignment(Alignment::Center),
            frame.area(),
        );
        return board;
    }

    game.render(&mut TuiSurface::new(frame.buffer_mut(), board));
    render_status(frame, status_row, game);

    board
}

fn render_status(frame: &mut Frame<'_>, area: Rect, game: &Game) {
    let hint = match game.status() {
        GameStatus::Playing => "click or arrows to steer, [q] quit",
        GameStatus::GameOver | GameStatus::Victory => "[r] restart, [q] quit",
    };
    let line = Line::from(format!("Score {}  {hint}", game.score()));

    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
