//! One-shot conversions printed by the command line.

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::color::{Channel, Color, hex_string, parse_rgb_triple, rgb_string, rgb_to_hsl};

/// Error type for conversion input and output.
#[derive(Debug)]
pub enum ConvertError {
    /// Input is not an `H,S,L` triple
    InvalidHsl(String),
    /// Input does not contain an `rgb(...)` triple
    InvalidRgb(String),
    /// YAML serialization error
    Yaml(serde_yaml::Error),
    /// JSON serialization error
    Json(serde_json::Error),
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHsl(s) => write!(f, "Invalid HSL triple '{}', expected H,S,L", s),
            Self::InvalidRgb(s) => write!(f, "Invalid RGB color '{}', expected rgb(r, g, b)", s),
            Self::Yaml(e) => write!(f, "YAML serialize error: {}", e),
            Self::Json(e) => write!(f, "JSON serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<serde_yaml::Error> for ConvertError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// A color in every notation the board uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorReport {
    pub hsl: String,
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
    pub rgb: String,
    pub hex: String,
}

impl ColorReport {
    /// Report for an HSL color; RGB is derived from it.
    pub fn from_hsl(color: Color) -> Self {
        let rgb = color.to_rgb();
        Self {
            hsl: color.to_string(),
            hue: color.hue(),
            saturation: color.saturation(),
            lightness: color.lightness(),
            rgb: rgb_string(rgb),
            hex: hex_string(rgb),
        }
    }

    /// Report for an `rgb(...)`/`rgba(...)` string. The RGB fields echo the
    /// parsed input rather than the HSL round trip.
    pub fn from_rgb_text(text: &str) -> Result<Self, ConvertError> {
        let rgb = parse_rgb_triple(text).ok_or_else(|| ConvertError::InvalidRgb(text.to_string()))?;
        let color = rgb_to_hsl(rgb.red, rgb.green, rgb.blue);
        Ok(Self {
            rgb: rgb_string(rgb),
            hex: hex_string(rgb),
            ..Self::from_hsl(color)
        })
    }

    /// Serialize in the requested format.
    pub fn render(&self, format: OutputFormat) -> Result<String, ConvertError> {
        match format {
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)? + "\n"),
        }
    }
}

/// Parse `H,S,L` (optionally wrapped in `hsl(...)`, with `°`/`%` units)
/// into a clamped color.
pub fn parse_hsl_triple(text: &str) -> Result<Color, ConvertError> {
    let invalid = || ConvertError::InvalidHsl(text.to_string());

    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix("hsl(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);

    let parts: Vec<&str> = inner.split(',').collect();
    let &[h, s, l] = parts.as_slice() else {
        return Err(invalid());
    };

    let value = |channel: Channel, part: &str| -> Result<f64, ConvertError> {
        let number: f64 = part
            .trim()
            .trim_end_matches(['%', '°'])
            .parse()
            .map_err(|_| invalid())?;
        let clamped = channel.clamp(number).map_err(|_| invalid())?;
        Ok(f64::from(clamped))
    };

    Ok(Color::new(
        value(Channel::Hue, h)?,
        value(Channel::Saturation, s)?,
        value(Channel::Lightness, l)?,
    ))
}
