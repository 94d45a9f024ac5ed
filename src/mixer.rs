//! Two-way sync between the edited color and the mixer widgets.
//!
//! The mixer binds to one swatch at a time. For every HSL channel it owns a
//! slider value and a numeric field text; it also owns the preview surface.
//! Any channel change goes through [`ColorState`], then the HSL values are
//! pushed back to every slider and field and the RGB rendering is applied to
//! both the preview and the swatch.
//!
//! Activation derives the starting color from the swatch's *rendered* RGB,
//! so a color set at creation time goes through the lossy RGB -> HSL path
//! once. From then on HSL alone drives the edits.

use tracing::{debug, trace, warn};

use crate::color::{Channel, Color, rgb_string};
use crate::stage::{Stage, Swatch, SwatchId};
use crate::state::ColorState;

/// Slider and numeric field for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelWidgets {
    pub slider: i32,
    /// Field text; may hold unparsed input until the next sync
    pub field: String,
}

/// Everything the mixer panel displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixerWidgets {
    channels: [ChannelWidgets; 3],
    /// Preview surface color (`rgb(r,g,b)`)
    pub preview: String,
}

impl MixerWidgets {
    fn bound_to(color: Color) -> Self {
        let channel = |c: Channel| ChannelWidgets {
            slider: color.get(c),
            field: color.get(c).to_string(),
        };
        Self {
            channels: Channel::ALL.map(channel),
            preview: rgb_string(color.to_rgb()),
        }
    }

    pub fn channel(&self, channel: Channel) -> &ChannelWidgets {
        &self.channels[channel.index()]
    }

    fn channel_mut(&mut self, channel: Channel) -> &mut ChannelWidgets {
        &mut self.channels[channel.index()]
    }
}

/// Synchronizes [`ColorState`] with the mixer widgets and the edited swatch.
#[derive(Debug, Default)]
pub struct MixerSync {
    state: ColorState,
    target: Option<SwatchId>,
    widgets: Option<MixerWidgets>,
}

impl MixerSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// The swatch currently being edited.
    pub fn target(&self) -> Option<SwatchId> {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn widgets(&self) -> Option<&MixerWidgets> {
        self.widgets.as_ref()
    }

    /// Current color; the default color when nothing is active.
    pub fn color(&self) -> Color {
        self.state.get()
    }

    /// Start editing `id`, deactivating any previous swatch first.
    ///
    /// Returns `None` when `id` is not on the stage. A rendered color that
    /// cannot be read falls back to [`Color::DEFAULT`].
    #[cfg_attr(debug_assertions, tracing::instrument(skip(self, stage), fields(swatch = %id)))]
    pub fn activate(&mut self, stage: &mut Stage, id: SwatchId) -> Option<Color> {
        let rendered = stage.get(id).map(Swatch::rendered_rgb)?;
        self.deactivate(stage);

        let start = match rendered {
            Some(rgb) => Color::from_rgb(rgb),
            None => {
                warn!(swatch = %id, "Unreadable swatch color, using default");
                Color::DEFAULT
            }
        };

        stage.set_editing(id);
        self.target = Some(id);
        self.widgets = Some(MixerWidgets::bound_to(start));
        debug!(swatch = %id, color = %start, "Mixer activated");
        self.sync(stage, start)
    }

    /// Stop editing. Returns the swatch that was being edited.
    pub fn deactivate(&mut self, stage: &mut Stage) -> Option<SwatchId> {
        stage.clear_editing();
        self.widgets = None;
        self.state.clear();
        let previous = self.target.take();
        if let Some(id) = previous {
            debug!(swatch = %id, "Mixer deactivated");
        }
        previous
    }

    /// A slider moved to `value`.
    pub fn slider_input(&mut self, stage: &mut Stage, channel: Channel, value: f64) -> Option<Color> {
        if !self.is_active() {
            return None;
        }
        let color = self.state.get().with(channel, value);
        self.sync(stage, color)
    }

    /// Move a slider by `delta` from its current value.
    pub fn nudge(&mut self, stage: &mut Stage, channel: Channel, delta: i32) -> Option<Color> {
        let current = self.state.get().get(channel);
        self.slider_input(stage, channel, f64::from(current.saturating_add(delta)))
    }

    /// Text typed into a numeric field.
    ///
    /// Text that is not a number stays in the field and changes nothing
    /// else; the channel keeps its last valid value.
    pub fn field_input(&mut self, stage: &mut Stage, channel: Channel, text: &str) -> Option<Color> {
        let widgets = self.widgets.as_mut()?;
        widgets.channel_mut(channel).field = text.to_string();

        let Some(color) = self.state.apply_text(channel, text) else {
            trace!(?channel, text, "Ignoring unparsed field input");
            return None;
        };
        self.sync(stage, color)
    }

    /// A numeric field was committed (confirmed or left).
    ///
    /// Re-syncs every widget from the current state, replacing any stale text.
    pub fn field_commit(&mut self, stage: &mut Stage) -> Option<Color> {
        if !self.is_active() {
            return None;
        }
        let color = self.state.get();
        self.sync(stage, color)
    }

    /// Delete the edited swatch and deactivate.
    pub fn remove_active(&mut self, stage: &mut Stage) -> Option<Swatch> {
        let id = self.deactivate(stage)?;
        stage.remove(id)
    }

    /// Push `color` to the state, every widget, the preview and the swatch.
    fn sync(&mut self, stage: &mut Stage, color: Color) -> Option<Color> {
        let id = self.target?;
        if stage.get(id).is_none() {
            warn!(swatch = %id, "Edited swatch left the stage");
            self.deactivate(stage);
            return None;
        }

        let color = self.state.set(
            f64::from(color.hue()),
            f64::from(color.saturation()),
            f64::from(color.lightness()),
        );
        let rendered = rgb_string(color.to_rgb());
        if let Some(swatch) = stage.get_mut(id) {
            swatch.fill.clone_from(&rendered);
        }

        let widgets = self.widgets.get_or_insert_with(|| MixerWidgets::bound_to(color));
        for channel in Channel::ALL {
            let w = widgets.channel_mut(channel);
            w.slider = color.get(channel);
            w.field = color.get(channel).to_string();
        }
        widgets.preview = rendered;

        trace!(swatch = %id, %color, "Mixer synced");
        Some(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{Position, StageBounds};

    fn stage() -> (Stage, SwatchId, SwatchId) {
        let mut stage = Stage::new(StageBounds::new(200.0, 100.0));
        let a = stage.add("rgb(255,0,0)", Position::new(0.0, 0.0), 20.0);
        let b = stage.add("rgb(0,0,255)", Position::new(50.0, 0.0), 20.0);
        (stage, a, b)
    }

    #[test]
    fn activation_reads_rendered_color() {
        let (mut stage, _, b) = stage();
        let mut mixer = MixerSync::new();
        let color = mixer.activate(&mut stage, b).unwrap();
        assert_eq!((color.hue(), color.saturation(), color.lightness()), (240, 100, 50));

        let widgets = mixer.widgets().unwrap();
        assert_eq!(widgets.channel(Channel::Hue).slider, 240);
        assert_eq!(widgets.channel(Channel::Hue).field, "240");
        assert_eq!(widgets.preview, "rgb(0,0,255)");
    }

    #[test]
    fn unreadable_color_falls_back_to_default() {
        let (mut stage, a, _) = stage();
        stage.get_mut(a).unwrap().fill = "papayawhip-ish".to_string();
        let mut mixer = MixerSync::new();
        assert_eq!(mixer.activate(&mut stage, a), Some(Color::DEFAULT));
        assert_eq!(stage.get(a).unwrap().fill, "rgb(255,0,0)");
    }

    #[test]
    fn slider_updates_fields_preview_and_swatch() {
        let (mut stage, a, _) = stage();
        let mut mixer = MixerSync::new();
        mixer.activate(&mut stage, a);
        mixer.slider_input(&mut stage, Channel::Hue, 120.0).unwrap();

        let widgets = mixer.widgets().unwrap();
        assert_eq!(widgets.channel(Channel::Hue).field, "120");
        assert_eq!(widgets.preview, "rgb(0,255,0)");
        assert_eq!(stage.get(a).unwrap().fill, "rgb(0,255,0)");
    }

    #[test]
    fn field_input_is_clamped_and_mirrored() {
        let (mut stage, a, _) = stage();
        let mut mixer = MixerSync::new();
        mixer.activate(&mut stage, a);
        let color = mixer.field_input(&mut stage, Channel::Hue, "500").unwrap();
        assert_eq!(color.hue(), 360);
        let widgets = mixer.widgets().unwrap();
        assert_eq!(widgets.channel(Channel::Hue).slider, 360);
        assert_eq!(widgets.channel(Channel::Hue).field, "360");
    }

    #[test]
    fn unparsed_field_input_keeps_last_value() {
        let (mut stage, a, _) = stage();
        let mut mixer = MixerSync::new();
        mixer.activate(&mut stage, a);
        mixer.field_input(&mut stage, Channel::Lightness, "30");
        assert_eq!(mixer.field_input(&mut stage, Channel::Lightness, "3o"), None);

        assert_eq!(mixer.color().lightness(), 30);
        let widgets = mixer.widgets().unwrap();
        assert_eq!(widgets.channel(Channel::Lightness).field, "3o");
        assert_eq!(widgets.channel(Channel::Lightness).slider, 30);

        mixer.field_commit(&mut stage);
        let widgets = mixer.widgets().unwrap();
        assert_eq!(widgets.channel(Channel::Lightness).field, "30");
    }

    #[test]
    fn activating_second_swatch_deactivates_first() {
        let (mut stage, a, b) = stage();
        let mut mixer = MixerSync::new();
        mixer.activate(&mut stage, a);
        mixer.activate(&mut stage, b);
        assert_eq!(mixer.target(), Some(b));
        assert_eq!(stage.editing(), Some(b));
        assert!(!stage.get(a).unwrap().is_editing());
    }

    #[test]
    fn edits_only_touch_the_active_swatch() {
        let (mut stage, a, b) = stage();
        let mut mixer = MixerSync::new();
        mixer.activate(&mut stage, a);
        mixer.activate(&mut stage, b);
        mixer.nudge(&mut stage, Channel::Lightness, -25);
        assert_eq!(stage.get(a).unwrap().fill, "rgb(255,0,0)");
        assert_eq!(stage.get(b).unwrap().fill, "rgb(0,0,128)");
    }

    #[test]
    fn inactive_mixer_ignores_input() {
        let (mut stage, a, _) = stage();
        let mut mixer = MixerSync::new();
        assert_eq!(mixer.slider_input(&mut stage, Channel::Hue, 10.0), None);
        assert_eq!(mixer.field_input(&mut stage, Channel::Hue, "10"), None);
        assert_eq!(mixer.color(), Color::DEFAULT);
        assert_eq!(stage.get(a).unwrap().fill, "rgb(255,0,0)");
    }

    #[test]
    fn deactivate_tears_down_widgets() {
        let (mut stage, a, _) = stage();
        let mut mixer = MixerSync::new();
        mixer.activate(&mut stage, a);
        mixer.slider_input(&mut stage, Channel::Hue, 60.0);
        assert_eq!(mixer.deactivate(&mut stage), Some(a));
        assert!(mixer.widgets().is_none());
        assert_eq!(stage.editing(), None);
        assert_eq!(mixer.color(), Color::DEFAULT);
        assert_eq!(stage.get(a).unwrap().fill, "rgb(255,255,0)");
    }

    #[test]
    fn remove_active_deletes_swatch() {
        let (mut stage, a, b) = stage();
        let mut mixer = MixerSync::new();
        mixer.activate(&mut stage, a);
        let removed = mixer.remove_active(&mut stage).unwrap();
        assert_eq!(removed.id(), a);
        assert_eq!(stage.order(), vec![b]);
        assert!(!mixer.is_active());
    }

    #[test]
    fn swatch_removed_elsewhere_deactivates_on_next_input() {
        let (mut stage, a, _) = stage();
        let mut mixer = MixerSync::new();
        mixer.activate(&mut stage, a);
        stage.remove(a);
        assert_eq!(mixer.slider_input(&mut stage, Channel::Hue, 10.0), None);
        assert!(!mixer.is_active());
    }

    #[test]
    fn huge_nudges_saturate_at_the_range_ends() {
        let (mut stage, a, _) = stage();
        let mut mixer = MixerSync::new();
        mixer.activate(&mut stage, a);
        mixer.slider_input(&mut stage, Channel::Hue, 300.0);

        let color = mixer.nudge(&mut stage, Channel::Hue, i32::MAX).unwrap();
        assert_eq!(color.hue(), 360);
        let color = mixer.nudge(&mut stage, Channel::Hue, i32::MIN).unwrap();
        assert_eq!(color.hue(), 0);
    }
}
