use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// CSS colour string, e.g. `#00ff00`.
    #[must_use]
    pub fn to_css(self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Colours used when drawing a frame.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgb,
    pub snake_head: Rgb,
    pub snake_body: Rgb,
    pub food: Rgb,
    /// Band behind the end-of-game text.
    pub overlay: Rgb,
    pub text: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::new(0, 0, 0),
            snake_head: Rgb::new(160, 255, 160),
            snake_body: Rgb::new(0, 255, 0),
            food: Rgb::new(0, 0, 255),
            overlay: Rgb::new(255, 0, 0),
            text: Rgb::new(255, 255, 255),
        }
    }
}

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("failed to read palette file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid palette file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Palette {
    /// Loads a palette from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, PaletteError> {
        let raw = fs::read_to_string(path).map_err(|source| PaletteError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&raw).map_err(|source| PaletteError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses a palette from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{Palette, PaletteError, Rgb};

    #[test]
    fn partial_json_keeps_defaults() {
        let palette =
            Palette::from_json(r#"{ "food": [255, 128, 0] }"#).expect("valid palette json");

        assert_eq!(palette.food, Rgb::new(255, 128, 0));
        assert_eq!(palette.background, Palette::default().background);
    }

    #[test]
    fn css_strings_are_lowercase_hex() {
        assert_eq!(Rgb::new(0, 255, 10).to_css(), "#00ff0a");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = unique_test_path("missing");

        assert!(matches!(Palette::load(&path), Err(PaletteError::Io { .. })));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        let result = Palette::load(&path);
        assert!(matches!(result, Err(PaletteError::Parse { .. })));

        let _ = fs::remove_file(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("canvas-snake-palette-tests")
            .join(format!("{label}-{nanos}.json"))
    }
}
