//! Configuration types for the connectivity engine.
//!
//! All types implement [`serde::Deserialize`] so a configuration can be
//! loaded from a TOML file with [`load_config`] or parsed in memory with
//! [`AppConfig::from_toml_str`]. Every field falls back to the editor's
//! built-in default when absent.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining spacing and wall settings.
//! - [`SpacingConfig`] - Shift magnitudes and minimum gaps used by the shift engine.
//! - [`WallConfig`] - Wall drawing style and gesture tolerance.
//!
//! # Example
//!
//! ```
//! # use plenum::config::AppConfig;
//! let config = AppConfig::from_toml_str("[spacing]\ncollision_gap = 30.0\n").unwrap();
//! assert_eq!(config.spacing().collision_gap(), 30.0);
//! assert_eq!(config.spacing().horizontal_array_width(), 75.0);
//! ```

use std::{fs, path::Path};

use log::{debug, info};
use serde::Deserialize;

use crate::error::PlenumError;

/// Top-level configuration combining spacing and wall settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Shift spacing section.
    #[serde(default)]
    spacing: SpacingConfig,

    /// Wall editing section.
    #[serde(default)]
    walls: WallConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(spacing: SpacingConfig, walls: WallConfig) -> Self {
        Self { spacing, walls }
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PlenumError::Config`] when the text is not valid TOML or a
    /// field has the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self, PlenumError> {
        toml::from_str(content).map_err(|err| PlenumError::Config(err.to_string()))
    }

    /// Returns the spacing configuration.
    pub fn spacing(&self) -> &SpacingConfig {
        &self.spacing
    }

    /// Returns the wall configuration.
    pub fn walls(&self) -> &WallConfig {
        &self.walls
    }
}

/// Distances used when shifting connected shapes.
///
/// "Array width" is the editor's term for the spacing between consecutive
/// shapes attached along a line.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpacingConfig {
    /// Spacing added to the reference width for Left/Right shifts. Also the
    /// minimum gap kept by Left moves.
    horizontal_array_width: f64,

    /// Spacing added to the reference height for Up/Down shifts. Also the
    /// minimum gap kept by Up/Down moves.
    vertical_array_width: f64,

    /// Minimum gap kept by Right moves.
    gap_array_width: f64,

    /// Minimum gap kept when the caller supplies a custom distance.
    custom_min_gap: f64,

    /// Closest the moving and remaining bounds may come after a move.
    collision_gap: f64,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            horizontal_array_width: 75.0,
            vertical_array_width: 75.0,
            gap_array_width: 50.0,
            custom_min_gap: 20.0,
            collision_gap: 20.0,
        }
    }
}

impl SpacingConfig {
    pub fn horizontal_array_width(&self) -> f64 {
        self.horizontal_array_width
    }

    pub fn vertical_array_width(&self) -> f64 {
        self.vertical_array_width
    }

    pub fn gap_array_width(&self) -> f64 {
        self.gap_array_width
    }

    pub fn custom_min_gap(&self) -> f64 {
        self.custom_min_gap
    }

    pub fn collision_gap(&self) -> f64 {
        self.collision_gap
    }

    /// Returns a copy with a different collision gap.
    pub fn with_collision_gap(mut self, gap: f64) -> Self {
        self.collision_gap = gap;
        self
    }
}

/// Wall drawing settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Stroke thickness of newly drawn walls. Zero or less derives the
    /// thickness from the ruler units and drawing scale.
    thickness: f64,

    /// Whether the ruler measures in inches rather than metric units.
    use_inches: bool,

    /// Drawing scale of the ruler.
    drawing_scale: f64,

    /// Maximum distance between a gesture point and the wall segment it hits.
    hit_tolerance: f64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            thickness: 8.33325,
            use_inches: true,
            drawing_scale: 48.0,
            hit_tolerance: 5.0,
        }
    }
}

impl WallConfig {
    /// Configured thickness, which may be zero to request a derived one.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    pub fn use_inches(&self) -> bool {
        self.use_inches
    }

    pub fn drawing_scale(&self) -> f64 {
        self.drawing_scale
    }

    /// Thickness new walls are drawn with.
    ///
    /// Without an explicit thickness, walls are four inches (or ten
    /// centimetres) at the ruler's scale.
    pub fn effective_thickness(&self) -> f64 {
        if self.thickness > 0.0 {
            self.thickness
        } else if self.use_inches {
            8.33333 * 48.0 / self.drawing_scale
        } else {
            11.811023622047243 * 50.0 / self.drawing_scale
        }
    }

    pub fn hit_tolerance(&self) -> f64 {
        self.hit_tolerance
    }
}

/// Loads configuration from a TOML file.
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, PlenumError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading configuration");

    if !path.exists() {
        return Err(PlenumError::Config(format!(
            "missing configuration file: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)?;
    let config = AppConfig::from_toml_str(&content)?;
    debug!(config:?; "Configuration loaded");
    Ok(config)
}
