//! The color being edited.

use tracing::trace;

use crate::color::{Channel, Color};

/// Holds the canonical color of the swatch currently being edited.
///
/// Empty when no swatch is active; reads then return [`Color::DEFAULT`].
#[derive(Debug, Clone, Default)]
pub struct ColorState {
    current: Option<Color>,
}

impl ColorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole color, clamping every channel.
    ///
    /// A NaN channel takes its default value.
    pub fn set(&mut self, h: f64, s: f64, l: f64) -> Color {
        let color = Color::new(h, s, l);
        trace!(%color, "Color state set");
        self.current = Some(color);
        color
    }

    /// Replace one channel. A NaN value leaves the channel unchanged.
    pub fn set_channel(&mut self, channel: Channel, value: f64) -> Color {
        let color = self.get().with(channel, value);
        self.current = Some(color);
        color
    }

    /// Apply numeric-field text to one channel.
    ///
    /// Returns `None` and keeps the last valid value when the text is not a
    /// number. Anything numeric is rounded and clamped, however large.
    pub fn apply_text(&mut self, channel: Channel, text: &str) -> Option<Color> {
        let value: f64 = text.trim().parse().ok().filter(|v: &f64| !v.is_nan())?;
        Some(self.set_channel(channel, value))
    }

    pub fn get(&self) -> Color {
        self.current.unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
