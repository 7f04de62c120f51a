use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::ConfigError;

const APP_DIR_NAME: &str = "torus-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 32;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 24;

/// Default simulation rate.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 13;

/// Fastest accepted simulation rate.
pub const MAX_TICKS_PER_SECOND: u32 = 120;

/// Largest accepted grid dimension on either axis.
pub const MAX_GRID_DIMENSION: u16 = 512;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// RGB colors used for every drawn element.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub snake: [u8; 3],
    pub food: [u8; 3],
    pub background: [u8; 3],
    pub grid_line: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            snake: [0, 255, 0],
            food: [255, 0, 0],
            background: [0, 0, 0],
            grid_line: [20, 20, 20],
        }
    }
}

impl Palette {
    #[must_use]
    pub fn snake_color(&self) -> Color {
        rgb(self.snake)
    }

    #[must_use]
    pub fn food_color(&self) -> Color {
        rgb(self.food)
    }

    #[must_use]
    pub fn background_color(&self) -> Color {
        rgb(self.background)
    }

    #[must_use]
    pub fn grid_line_color(&self) -> Color {
        rgb(self.grid_line)
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

/// User-tunable game settings.
///
/// Every field is optional in the settings file; absent fields keep their
/// defaults. Command-line flags are applied on top by the binary.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid_width: u16,
    pub grid_height: u16,
    pub ticks_per_second: u32,
    pub seed: Option<u64>,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            seed: None,
            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// Loads settings from the platform config directory.
    ///
    /// Returns defaults when there is no config directory or no settings file.
    pub fn load_default() -> Result<Self, ConfigError> {
        let Some(path) = settings_path() else {
            return Ok(Self::default());
        };

        Ok(read_settings(&path)?.unwrap_or_default())
    }

    /// Loads settings from an explicit path. A missing file is an error here.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        read_settings(path)?.ok_or_else(|| ConfigError::Read {
            path: path.to_path_buf(),
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    }

    /// Returns the configured grid dimensions.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize {
            width: self.grid_width,
            height: self.grid_height,
        }
    }

    /// Checks that the settings describe a playable game.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let grid = self.grid();
        let invalid = |reason| ConfigError::InvalidGrid {
            width: grid.width,
            height: grid.height,
            reason,
        };

        if grid.width == 0 || grid.height == 0 {
            return Err(invalid("dimensions must be positive"));
        }
        if grid.width > MAX_GRID_DIMENSION || grid.height > MAX_GRID_DIMENSION {
            return Err(invalid("dimensions must not exceed 512 cells"));
        }
        if grid.total_cells() < 2 {
            return Err(invalid("at least two cells are needed to place food"));
        }
        if !(1..=MAX_TICKS_PER_SECOND).contains(&self.ticks_per_second) {
            return Err(ConfigError::InvalidTickRate(self.ticks_per_second));
        }

        Ok(self)
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    Some(base)
}

fn read_settings(path: &Path) -> Result<Option<Settings>, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str::<Settings>(&raw)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use ratatui::style::Color;

    use super::{GridSize, Palette, Settings, read_settings};
    use crate::error::ConfigError;

    #[test]
    fn defaults_match_classic_board() {
        let settings = Settings::default();

        assert_eq!(
            settings.grid(),
            GridSize {
                width: 32,
                height: 24,
            }
        );
        assert_eq!(settings.ticks_per_second, 13);
        assert_eq!(settings.palette.snake_color(), Color::Rgb(0, 255, 0));
        assert_eq!(settings.palette.food_color(), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "grid_width": 10, "palette": { "food": [1, 2, 3] } }"#);

        let settings = read_settings(&path)
            .expect("partial file should parse")
            .expect("file exists");

        assert_eq!(settings.grid_width, 10);
        assert_eq!(settings.grid_height, 24);
        assert_eq!(settings.palette.food, [1, 2, 3]);
        assert_eq!(settings.palette.snake, Palette::default().snake);
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_file_reads_as_none() {
        let path = unique_test_path("missing");

        let loaded = read_settings(&path).expect("missing file is not an error");

        assert!(loaded.is_none());
        assert!(matches!(
            Settings::load_from_path(&path),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn malformed_file_returns_parse_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "not-json");

        assert!(matches!(
            read_settings(&path),
            Err(ConfigError::Parse { .. })
        ));
        cleanup_test_path(&path);
    }

    #[test]
    fn validation_rejects_unplayable_settings() {
        let empty = Settings {
            grid_width: 0,
            ..Settings::default()
        };
        let single_cell = Settings {
            grid_width: 1,
            grid_height: 1,
            ..Settings::default()
        };
        let frozen = Settings {
            ticks_per_second: 0,
            ..Settings::default()
        };

        assert!(matches!(
            empty.validate(),
            Err(ConfigError::InvalidGrid { .. })
        ));
        assert!(matches!(
            single_cell.validate(),
            Err(ConfigError::InvalidGrid { .. })
        ));
        assert!(matches!(
            frozen.validate(),
            Err(ConfigError::InvalidTickRate(0))
        ));
        assert!(Settings::default().validate().is_ok());
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("torus-snake-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
