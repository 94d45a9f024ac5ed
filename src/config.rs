//! TOML configuration for the board.
//!
//! Values are layered with figment: built-in defaults, then the TOML file,
//! then `SWATCHBOARD_*` environment variables (`__` separates sections, e.g.
//! `SWATCHBOARD_DRAG__THRESHOLD=3`).

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::normalize_css;
use crate::drag::DragSettings;
use crate::stage::{Position, Stage, SwatchId};

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading/writing file
    Io(std::io::Error),
    /// Invalid or mistyped configuration value
    Extract(Box<figment::Error>),
    /// TOML serialization error
    Serialize(toml::ser::Error),
    /// A value outside its usable range
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Extract(e) => write!(f, "Config error: {}", e),
            Self::Serialize(e) => write!(f, "TOML serialize error: {}", e),
            Self::Invalid(s) => write!(f, "Invalid config value: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Extract(Box::new(e))
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize(e)
    }
}

/// Root configuration structure for TOML files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Stage settings
    pub stage: StageConfig,
    /// Drag tuning
    pub drag: DragSettings,
    /// Keyboard steps for the mixer sliders
    pub mixer: MixerConfig,
    /// Swatches placed at startup
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub swatches: Vec<SwatchSeed>,
}

/// Stage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Swatch diameter in stage units (one column, or half a row)
    pub swatch_size: f64,
    /// Random swatches added when no seeds are configured
    pub initial_swatches: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            swatch_size: 12.0,
            initial_swatches: 3,
        }
    }
}

/// Largest keyboard step; one step can sweep the whole hue range.
const MAX_STEP: i32 = 360;

/// Slider step sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerConfig {
    pub small_step: i32,
    pub large_step: i32,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            small_step: 1,
            large_step: 10,
        }
    }
}

/// A swatch placed at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwatchSeed {
    /// Any CSS color (hex, rgb(), hsl(), named)
    pub color: String,
    pub x: f64,
    pub y: f64,
}

impl BoardConfig {
    /// Load configuration, layering the optional TOML file and environment
    /// over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            let content = std::fs::read_to_string(path)?;
            figment = figment.merge(Toml::string(&content));
        }
        let config = figment
            .merge(Env::prefixed("SWATCHBOARD_").split("__"))
            .extract::<Self>()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string, without environment layering.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(content))
            .extract::<Self>()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the board cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.stage.swatch_size;
        if !size.is_finite() || size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "stage.swatch_size must be positive, got {size}"
            )));
        }
        let drag = &self.drag;
        if !drag.threshold.is_finite() || drag.threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "drag.threshold must be zero or more, got {}",
                drag.threshold
            )));
        }
        if !(0.0..=1.0).contains(&drag.overhang) {
            return Err(ConfigError::Invalid(format!(
                "drag.overhang must be between 0 and 1, got {}",
                drag.overhang
            )));
        }
        for (name, step) in [
            ("mixer.small_step", self.mixer.small_step),
            ("mixer.large_step", self.mixer.large_step),
        ] {
            if !(1..=MAX_STEP).contains(&step) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between 1 and {MAX_STEP}, got {step}"
                )));
            }
        }
        Ok(())
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Place the configured seed swatches on `stage`, in order.
    ///
    /// Seed colors are normalized to `rgb(r,g,b)`; a color that cannot be
    /// parsed is kept verbatim and opens in the mixer as the default color.
    pub fn seed_stage(&self, stage: &mut Stage) -> Vec<SwatchId> {
        self.swatches
            .iter()
            .map(|seed| {
                let fill = normalize_css(&seed.color).unwrap_or_else(|| {
                    warn!(color = %seed.color, "Unparseable seed color");
                    seed.color.clone()
                });
                stage.add(
                    fill,
                    Position::new(seed.x, seed.y),
                    self.stage.swatch_size,
                )
            })
            .collect()
    }
}
