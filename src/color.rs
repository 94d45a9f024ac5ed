//! HSL <-> RGB conversion with integer clamping.
//!
//! HSL is the canonical representation of a swatch color: hue in whole
//! degrees (0-360), saturation and lightness in whole percent (0-100).
//! RGB is always derived from it with [`hsl_to_rgb`] and never stored as the
//! source of truth.

use std::fmt;
use std::sync::LazyLock;

use palette::Srgb;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Error returned by [`clamp`] for input that is not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClampError {
    /// The value was NaN
    NotANumber,
}

impl fmt::Display for ClampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "value is not a number"),
        }
    }
}

impl std::error::Error for ClampError {}

/// Round `value` to the nearest integer, then clamp it into `[min, max]`.
///
/// NaN yields [`ClampError::NotANumber`]; callers substitute their own
/// default instead of propagating it. Infinities clamp to the bounds.
///
/// ```
/// use swatchboard::color::clamp;
///
/// assert_eq!(clamp(370.0, 0, 360), Ok(360));
/// assert_eq!(clamp(-10.0, 0, 100), Ok(0));
/// assert_eq!(clamp(49.6, 0, 100), Ok(50));
/// ```
pub fn clamp(value: f64, min: i32, max: i32) -> Result<i32, ClampError> {
    if value.is_nan() {
        return Err(ClampError::NotANumber);
    }
    let rounded = value.round();
    Ok(rounded.min(f64::from(max)).max(f64::from(min)) as i32)
}

/// One of the three HSL channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Hue,
    Saturation,
    Lightness,
}

impl Channel {
    /// All channels in mixer order.
    pub const ALL: [Channel; 3] = [Channel::Hue, Channel::Saturation, Channel::Lightness];

    /// Inclusive range of valid values.
    pub const fn range(self) -> (i32, i32) {
        match self {
            Self::Hue => (0, 360),
            Self::Saturation | Self::Lightness => (0, 100),
        }
    }

    /// Value used when a channel has nothing valid to show.
    pub const fn default_value(self) -> i32 {
        match self {
            Self::Hue => 0,
            Self::Saturation => 100,
            Self::Lightness => 50,
        }
    }

    /// Position of the channel in [`Channel::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Hue => 0,
            Self::Saturation => 1,
            Self::Lightness => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Hue => "H",
            Self::Saturation => "S",
            Self::Lightness => "L",
        }
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Hue => "°",
            Self::Saturation | Self::Lightness => "%",
        }
    }

    /// Clamp `value` into this channel's range.
    pub fn clamp(self, value: f64) -> Result<i32, ClampError> {
        let (min, max) = self.range();
        clamp(value, min, max)
    }

    pub fn next(self) -> Self {
        match self {
            Self::Hue => Self::Saturation,
            Self::Saturation => Self::Lightness,
            Self::Lightness => Self::Hue,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Hue => Self::Lightness,
            Self::Saturation => Self::Hue,
            Self::Lightness => Self::Saturation,
        }
    }
}

/// A canonical HSL color with integer channels.
///
/// Fields are private so every write goes through clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    hue: u16,
    saturation: u8,
    lightness: u8,
}

impl Color {
    /// Hue 0, full saturation, half lightness (pure red).
    pub const DEFAULT: Color = Color {
        hue: 0,
        saturation: 100,
        lightness: 50,
    };

    /// Build a color, rounding and clamping each channel.
    ///
    /// NaN channels fall back to [`Channel::default_value`].
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        let channel = |c: Channel, v: f64| c.clamp(v).unwrap_or(c.default_value());
        Self {
            hue: channel(Channel::Hue, hue) as u16,
            saturation: channel(Channel::Saturation, saturation) as u8,
            lightness: channel(Channel::Lightness, lightness) as u8,
        }
    }

    pub fn hue(self) -> u16 {
        self.hue
    }

    pub fn saturation(self) -> u8 {
        self.saturation
    }

    pub fn lightness(self) -> u8 {
        self.lightness
    }

    pub fn get(self, channel: Channel) -> i32 {
        match channel {
            Channel::Hue => i32::from(self.hue),
            Channel::Saturation => i32::from(self.saturation),
            Channel::Lightness => i32::from(self.lightness),
        }
    }

    /// Copy of `self` with one channel replaced (clamped).
    ///
    /// A NaN value leaves the channel as it was.
    pub fn with(self, channel: Channel, value: f64) -> Self {
        let Ok(v) = channel.clamp(value) else {
            return self;
        };
        let mut next = self;
        match channel {
            Channel::Hue => next.hue = v as u16,
            Channel::Saturation => next.saturation = v as u8,
            Channel::Lightness => next.lightness = v as u8,
        }
        next
    }

    pub fn to_rgb(self) -> Srgb<u8> {
        hsl_to_rgb(self.hue, self.saturation, self.lightness)
    }

    pub fn from_rgb(rgb: Srgb<u8>) -> Self {
        rgb_to_hsl(rgb.red, rgb.green, rgb.blue)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Convert HSL (degrees, percent, percent) to 8-bit sRGB.
///
/// Channels are rounded to the nearest integer.
pub fn hsl_to_rgb(h: u16, s: u8, l: u8) -> Srgb<u8> {
    let h = f64::from(h) / 360.0;
    let s = f64::from(s) / 100.0;
    let l = f64::from(l) / 100.0;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    Srgb::new(to_byte(r), to_byte(g), to_byte(b))
}

/// Piecewise hue ramp between the chroma minimum `p` and midpoint `q`.
fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert 8-bit sRGB to HSL.
///
/// Grays (max == min) yield hue 0 and saturation 0. Hue is rounded to whole
/// degrees and may come out as 360 for reds just below the wrap point.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Color {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s)
    };

    Color::new(h * 360.0, s * 100.0, l * 100.0)
}

static RGB_TRIPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)").expect("rgb triple pattern is valid")
});

/// Extract an RGB triple from an `rgb(...)` or `rgba(...)` string.
///
/// Components above 255 saturate. Returns `None` when the text does not
/// contain a triple.
pub fn parse_rgb_triple(text: &str) -> Option<Srgb<u8>> {
    let caps = RGB_TRIPLE.captures(text)?;
    let component = |i: usize| -> Option<u8> {
        let value: u32 = caps.get(i)?.as_str().parse().unwrap_or(u32::MAX);
        Some(value.min(255) as u8)
    };
    Some(Srgb::new(component(1)?, component(2)?, component(3)?))
}

/// Format a color the way it is applied to a rendered surface.
pub fn rgb_string(rgb: Srgb<u8>) -> String {
    format!("rgb({},{},{})", rgb.red, rgb.green, rgb.blue)
}

/// Hex notation (`#rrggbb`).
pub fn hex_string(rgb: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}

/// Normalize any CSS color to the `rgb(r,g,b)` rendering form.
///
/// Returns `None` when `csscolorparser` cannot read the input.
pub fn normalize_css(text: &str) -> Option<String> {
    let color = text.parse::<csscolorparser::Color>().ok()?;
    let [r, g, b, _] = color.to_rgba8();
    Some(rgb_string(Srgb::new(r, g, b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(rgb: Srgb<u8>) -> (u8, u8, u8) {
        (rgb.red, rgb.green, rgb.blue)
    }

    #[test]
    fn clamp_rounds_then_clamps() {
        assert_eq!(clamp(370.0, 0, 360), Ok(360));
        assert_eq!(clamp(-10.0, 0, 100), Ok(0));
        assert_eq!(clamp(12.4, 0, 100), Ok(12));
        assert_eq!(clamp(12.5, 0, 100), Ok(13));
        assert_eq!(clamp(f64::INFINITY, 0, 100), Ok(100));
        assert_eq!(clamp(f64::NEG_INFINITY, 0, 100), Ok(0));
    }

    #[test]
    fn clamp_rejects_nan() {
        assert_eq!(clamp(f64::NAN, 0, 100), Err(ClampError::NotANumber));
    }

    #[test]
    fn clamp_is_idempotent() {
        let samples = [-1e9, -400.5, -0.5, 0.0, 0.49, 99.5, 180.2, 359.5, 360.0, 1e9];
        for x in samples {
            let once = clamp(x, 0, 360).unwrap();
            let twice = clamp(f64::from(once), 0, 360).unwrap();
            assert_eq!(once, twice, "clamp not idempotent for {x}");
        }
    }

    #[test]
    fn primaries() {
        assert_eq!(triple(hsl_to_rgb(0, 100, 50)), (255, 0, 0));
        assert_eq!(triple(hsl_to_rgb(120, 100, 50)), (0, 255, 0));
        assert_eq!(triple(hsl_to_rgb(240, 100, 50)), (0, 0, 255));
    }

    #[test]
    fn achromatic_rounds_half_up() {
        assert_eq!(triple(hsl_to_rgb(0, 0, 50)), (128, 128, 128));
        assert_eq!(triple(hsl_to_rgb(200, 0, 0)), (0, 0, 0));
        assert_eq!(triple(hsl_to_rgb(200, 0, 100)), (255, 255, 255));
    }

    #[test]
    fn gray_has_no_hue() {
        let c = rgb_to_hsl(128, 128, 128);
        assert_eq!((c.hue(), c.saturation(), c.lightness()), (0, 0, 50));
    }

    #[test]
    fn secondaries_to_hsl() {
        let yellow = rgb_to_hsl(255, 255, 0);
        assert_eq!(yellow.hue(), 60);
        let cyan = rgb_to_hsl(0, 255, 255);
        assert_eq!(cyan.hue(), 180);
        let magenta = rgb_to_hsl(255, 0, 255);
        assert_eq!(magenta.hue(), 300);
    }

    #[test]
    fn color_new_substitutes_defaults_for_nan() {
        let c = Color::new(f64::NAN, f64::NAN, f64::NAN);
        assert_eq!(c, Color::DEFAULT);
    }

    #[test]
    fn color_with_keeps_channel_on_nan() {
        let c = Color::new(200.0, 40.0, 60.0);
        assert_eq!(c.with(Channel::Saturation, f64::NAN), c);
        assert_eq!(c.with(Channel::Hue, 500.0).hue(), 360);
    }

    #[test]
    fn display_formats() {
        assert_eq!(Color::new(210.0, 80.0, 45.0).to_string(), "hsl(210, 80%, 45%)");
        assert_eq!(rgb_string(Srgb::new(1, 2, 3)), "rgb(1,2,3)");
        assert_eq!(hex_string(Srgb::new(255, 0, 16)), "#ff0010");
    }

    #[test]
    fn parse_triples() {
        assert_eq!(parse_rgb_triple("rgb(10, 20, 30)").map(triple), Some((10, 20, 30)));
        assert_eq!(parse_rgb_triple("rgba(1,2,3,0.5)").map(triple), Some((1, 2, 3)));
        assert_eq!(parse_rgb_triple("rgb(999,0,0)").map(triple), Some((255, 0, 0)));
        assert_eq!(parse_rgb_triple("not a color"), None);
        assert_eq!(parse_rgb_triple(""), None);
        assert_eq!(parse_rgb_triple("rgb(10, 20)"), None);
    }

    #[test]
    fn normalize_css_colors() {
        assert_eq!(normalize_css("hsl(120, 100%, 50%)").as_deref(), Some("rgb(0,255,0)"));
        assert_eq!(normalize_css("#0000ff").as_deref(), Some("rgb(0,0,255)"));
        assert_eq!(normalize_css("definitely not"), None);
    }
}
