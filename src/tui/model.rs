//! Board model for the TUI: the stage, the mixer and the pointer state.

use rand::rngs::StdRng;
use ratatui::layout::{Position as CellPosition, Rect};
use tracing::{debug, info};
use tuirealm::Update;

use crate::color::Channel;
use crate::config::BoardConfig;
use crate::drag::{DragController, DragEnd};
use crate::layout::LayoutReflow;
use crate::mixer::MixerSync;
use crate::spawn::SwatchFactory;
use crate::stage::{Position, Stage, StageBounds};

use super::activities::Msg;

/// Which mixer channel the keyboard edits, and whether its numeric field is
/// being typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixerFocus {
    pub channel: Channel,
    pub typing: bool,
}

impl Default for MixerFocus {
    fn default() -> Self {
        Self {
            channel: Channel::Hue,
            typing: false,
        }
    }
}

/// Application model containing all state.
pub struct Board {
    pub stage: Stage,
    pub mixer: MixerSync,
    pub drag: DragController,
    pub focus: MixerFocus,
    reflow: Option<LayoutReflow>,
    factory: SwatchFactory<StdRng>,
    config: BoardConfig,
    /// Stage area on screen
    area: Rect,
    /// Mixer panel area on screen; clicks there never cancel editing
    mixer_area: Rect,

    // UI state
    pub show_help: bool,
    pub quit: bool,
    pub message: Option<String>,
}

impl Board {
    /// Create an empty board. Swatches are placed once the stage is first
    /// measured.
    pub fn new(config: BoardConfig, rng: StdRng) -> Self {
        Self {
            stage: Stage::new(StageBounds::default()),
            mixer: MixerSync::new(),
            drag: DragController::new(config.drag),
            focus: MixerFocus::default(),
            reflow: None,
            factory: SwatchFactory::new(rng, config.stage.swatch_size),
            config,
            area: Rect::default(),
            mixer_area: Rect::default(),
            show_help: false,
            quit: false,
            message: None,
        }
    }

    /// Whether the stage has been measured and populated.
    pub fn is_laid_out(&self) -> bool {
        self.reflow.is_some()
    }

    /// The screen area the stage was last measured at.
    pub fn stage_area(&self) -> Rect {
        self.area
    }

    /// The screen area of the mixer panel.
    pub fn mixer_area(&self) -> Rect {
        self.mixer_area
    }

    /// Apply the on-screen stage area. The first call places the configured
    /// swatches; later calls reflow them.
    fn measure(&mut self, area: Rect) {
        self.area = area;
        let bounds = StageBounds::new(f64::from(area.width), f64::from(area.height) * 2.0);

        match self.reflow.as_mut() {
            Some(reflow) => {
                reflow.resize(&mut self.stage, bounds);
            }
            None => {
                self.stage.set_bounds(bounds);
                self.reflow = Some(LayoutReflow::new(bounds));
                self.populate();
            }
        }
    }

    fn populate(&mut self) {
        if self.config.swatches.is_empty() {
            for _ in 0..self.config.stage.initial_swatches {
                self.factory.spawn(&mut self.stage);
            }
        } else {
            self.config.seed_stage(&mut self.stage);
        }
        info!(count = self.stage.len(), "Stage populated");
    }

    /// Convert a screen cell to the stage point at its center. Cells outside
    /// the stage map to points outside its bounds.
    fn stage_point(&self, column: u16, row: u16) -> Position {
        let x = f64::from(column) - f64::from(self.area.x) + 0.5;
        let y = (f64::from(row) - f64::from(self.area.y)) * 2.0 + 1.0;
        Position::new(x, y)
    }

    fn on_stage(&self, point: Position) -> bool {
        let bounds = self.stage.bounds();
        point.x >= 0.0 && point.y >= 0.0 && point.x < bounds.width && point.y < bounds.height
    }

    fn stop_typing(&mut self) {
        if self.focus.typing {
            self.focus.typing = false;
            self.mixer.field_commit(&mut self.stage);
        }
    }

    fn type_into_field(&mut self, text: String) {
        self.focus.typing = true;
        self.mixer.field_input(&mut self.stage, self.focus.channel, &text);
    }

    fn current_field(&self) -> String {
        self.mixer
            .widgets()
            .map(|w| w.channel(self.focus.channel).field.clone())
            .unwrap_or_default()
    }

    fn nudge(&mut self, delta: i32) {
        self.stop_typing();
        self.mixer.nudge(&mut self.stage, self.focus.channel, delta);
    }
}

impl Update<Msg> for Board {
    fn update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        let msg = msg?;

        match msg {
            Msg::Quit => {
                self.quit = true;
                None
            }
            Msg::ShowHelp => {
                self.show_help = true;
                None
            }
            Msg::HideHelp => {
                self.show_help = false;
                None
            }

            Msg::Resized { stage, mixer } => {
                self.mixer_area = mixer;
                if !self.is_laid_out() || stage != self.area {
                    self.measure(stage);
                }
                Some(Msg::Refresh)
            }

            // Pointer
            Msg::PointerDown { column, row } => {
                if self.mixer_area.contains(CellPosition::new(column, row)) {
                    return None;
                }
                let point = self.stage_point(column, row);
                let hit = self
                    .on_stage(point)
                    .then(|| self.stage.swatch_at(point))
                    .flatten();
                match hit {
                    Some(id) => {
                        self.drag.pointer_down(&self.stage, id, point);
                        None
                    }
                    None => {
                        self.focus.typing = false;
                        self.mixer.deactivate(&mut self.stage);
                        self.message = None;
                        Some(Msg::Refresh)
                    }
                }
            }
            Msg::PointerDrag { column, row } => {
                let point = self.stage_point(column, row);
                let moved = self.drag.pointer_move(&mut self.stage, point)?;
                moved.position.map(|_| Msg::Refresh)
            }
            Msg::PointerUp => match self.drag.pointer_up(&mut self.stage)? {
                DragEnd::Click(id) => {
                    self.stop_typing();
                    if let Some(color) = self.mixer.activate(&mut self.stage, id) {
                        self.message = Some(format!("Editing {id}: {color}"));
                    }
                    Some(Msg::Refresh)
                }
                DragEnd::Moved(_) => Some(Msg::Refresh),
            },

            // Swatches
            Msg::AddSwatch => {
                if !self.is_laid_out() {
                    return None;
                }
                let id = self.factory.spawn(&mut self.stage);
                self.stop_typing();
                self.mixer.activate(&mut self.stage, id);
                self.message = Some(format!("Added {id}"));
                Some(Msg::Refresh)
            }
            Msg::RemoveSwatch => {
                self.focus.typing = false;
                let removed = self.mixer.remove_active(&mut self.stage)?;
                debug!(swatch = %removed.id(), "Removed from mixer");
                self.message = Some(format!("Removed {}", removed.id()));
                Some(Msg::Refresh)
            }
            Msg::Deselect => {
                self.focus.typing = false;
                self.mixer.deactivate(&mut self.stage)?;
                self.message = None;
                Some(Msg::Refresh)
            }

            // Mixer
            Msg::ChannelNext => {
                self.stop_typing();
                self.focus.channel = self.focus.channel.next();
                Some(Msg::Refresh)
            }
            Msg::ChannelPrev => {
                self.stop_typing();
                self.focus.channel = self.focus.channel.prev();
                Some(Msg::Refresh)
            }
            Msg::NudgeSmall(direction) => {
                self.nudge(direction.saturating_mul(self.config.mixer.small_step));
                Some(Msg::Refresh)
            }
            Msg::NudgeLarge(direction) => {
                self.nudge(direction.saturating_mul(self.config.mixer.large_step));
                Some(Msg::Refresh)
            }
            Msg::FieldType(c) => {
                if !self.mixer.is_active() {
                    return None;
                }
                let text = if self.focus.typing {
                    let mut text = self.current_field();
                    text.push(c);
                    text
                } else {
                    c.to_string()
                };
                self.type_into_field(text);
                Some(Msg::Refresh)
            }
            Msg::FieldBackspace => {
                if !self.focus.typing {
                    return None;
                }
                let mut text = self.current_field();
                text.pop();
                self.type_into_field(text);
                Some(Msg::Refresh)
            }
            Msg::FieldCommit => {
                self.stop_typing();
                Some(Msg::Refresh)
            }

            // Handled by the activity
            Msg::Refresh => None,
        }
    }
}
