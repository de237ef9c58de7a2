//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority
//! (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`MPRISM_SECTION__KEY`)
//!
//! Every section has defaults matching the reference constants, so the app
//! also runs with no config files at all.

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use morphprism_core::PrismParams;
use morphprism_input::ControlBarBounds;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Prism shape configuration
    #[serde(default)]
    pub prism: PrismConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Control bar hit-region configuration
    #[serde(default)]
    pub control_bar: ControlBarConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // MPRISM_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("MPRISM_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Morphing Hexagonal Prism".to_string(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

/// Prism shape configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrismConfig {
    /// Polygon edge count
    pub sides: u32,
    /// Angular samples per edge
    pub subdivisions: u32,
    /// Cross-section radius
    pub radius: f32,
    /// Prism height
    pub height: f32,
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            sides: 6,
            subdivisions: 4,
            radius: 0.5,
            height: 1.0,
        }
    }
}

impl PrismConfig {
    /// Convert to the generator's parameter struct
    pub fn to_params(&self) -> PrismParams {
        PrismParams {
            sides: self.sides,
            subdivisions: self.subdivisions,
            radius: self.radius,
            height: self.height,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Eye position [x, y, z], looking at the origin
    pub eye: [f32; 3],
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 3.0],
            fov: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Drag rotation sensitivity (degrees per pixel)
    pub drag_sensitivity: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.5,
        }
    }
}

/// Control bar hit-region configuration (screen pixels)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlBarConfig {
    /// Left edge of the bar
    pub left: f32,
    /// Horizontal span of the bar
    pub width: f32,
    /// Top edge, measured up from the window's bottom edge
    pub top_offset: f32,
    /// Bottom edge, measured up from the window's bottom edge
    pub bottom_offset: f32,
}

impl Default for ControlBarConfig {
    fn default() -> Self {
        Self {
            left: 200.0,
            width: 400.0,
            top_offset: 50.0,
            bottom_offset: 30.0,
        }
    }
}

impl ControlBarConfig {
    /// Anchor the hit region to a window of the given height
    pub fn to_bounds(&self, window_height: f32) -> ControlBarBounds {
        ControlBarBounds::anchored(
            self.left,
            self.width,
            self.top_offset,
            self.bottom_offset,
            window_height,
        )
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Prism fill color [r, g, b, a]
    pub prism_color: [f32; 4],
    /// Control bar track color [r, g, b, a]
    pub track_color: [f32; 4],
    /// Control bar handle color [r, g, b, a]
    pub handle_color: [f32; 4],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0, 1.0],
            prism_color: [0.5, 0.5, 1.0, 1.0],
            track_color: [0.7, 0.7, 0.7, 1.0],
            handle_color: [0.3, 0.3, 1.0, 1.0],
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
