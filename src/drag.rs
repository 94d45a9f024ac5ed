//! Pointer dragging of swatches.
//!
//! Idle -> Dragging on pointer-down over a swatch, back to Idle on
//! pointer-up. A session only moves its swatch once the pointer has
//! travelled past the movement threshold on either axis; a session that
//! never crosses it ends as a plain click.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::stage::{Position, Stage, StageBounds, SwatchId};

/// Drag tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    /// Distance on either axis before a press becomes a drag
    pub threshold: f64,
    /// Fraction of the swatch size allowed to hang past the stage edge
    pub overhang: f64,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            threshold: 5.0,
            overhang: 0.3,
        }
    }
}

/// State of one press-move-release gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub target: SwatchId,
    pub origin: Position,
    pub start: Position,
    pub moved: bool,
}

/// Result of a pointer-move while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMove {
    pub target: SwatchId,
    /// Position applied to the swatch; `None` while under the threshold
    pub position: Option<Position>,
    /// The host should suppress its default drag handling
    pub suppress_default: bool,
}

/// How a gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEnd {
    /// The swatch was moved and raised to the top
    Moved(SwatchId),
    /// The pointer never crossed the threshold
    Click(SwatchId),
}

/// Clamp a top-left coordinate so at most `overhang * size` of the swatch
/// leaves the stage on either side.
///
/// On a stage narrower than the swatch the lower bound wins.
pub fn clamp_axis(value: f64, bound: f64, size: f64, overhang: f64) -> f64 {
    let margin = size * overhang;
    let max = bound - size + margin;
    value.min(max).max(-margin)
}

/// Clamp a swatch position into the draggable area of `bounds`.
pub fn clamp_position(position: Position, bounds: StageBounds, size: f64, overhang: f64) -> Position {
    Position::new(
        clamp_axis(position.x, bounds.width, size, overhang),
        clamp_axis(position.y, bounds.height, size, overhang),
    )
}

/// Owns the single drag slot.
#[derive(Debug, Default)]
pub struct DragController {
    settings: DragSettings,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(settings: DragSettings) -> Self {
        Self {
            settings,
            session: None,
        }
    }

    pub fn settings(&self) -> DragSettings {
        self.settings
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Begin a session on the swatch `id`, replacing any stale session.
    pub fn pointer_down(&mut self, stage: &Stage, id: SwatchId, pointer: Position) -> bool {
        let Some(swatch) = stage.get(id) else {
            return false;
        };
        if let Some(stale) = self.session.take() {
            debug!(swatch = %stale.target, "Dropping stale drag session");
        }
        self.session = Some(DragSession {
            target: id,
            origin: pointer,
            start: swatch.position,
            moved: false,
        });
        trace!(swatch = %id, x = pointer.x, y = pointer.y, "Drag started");
        true
    }

    /// Track the pointer. Returns `None` when idle.
    pub fn pointer_move(&mut self, stage: &mut Stage, pointer: Position) -> Option<DragMove> {
        let session = self.session.as_mut()?;
        let dx = pointer.x - session.origin.x;
        let dy = pointer.y - session.origin.y;

        let crossed = dx.abs() > self.settings.threshold || dy.abs() > self.settings.threshold;
        if crossed && !session.moved {
            debug!(swatch = %session.target, "Drag crossed movement threshold");
        }
        session.moved |= crossed;
        let target = session.target;

        if !session.moved {
            return Some(DragMove {
                target,
                position: None,
                suppress_default: false,
            });
        }

        let bounds = stage.bounds();
        let start = session.start;
        let Some(swatch) = stage.get_mut(target) else {
            self.session = None;
            return None;
        };
        let position = clamp_position(
            Position::new(start.x + dx, start.y + dy),
            bounds,
            swatch.size,
            self.settings.overhang,
        );
        swatch.position = position;

        Some(DragMove {
            target,
            position: Some(position),
            suppress_default: true,
        })
    }

    /// End the session. A moved swatch is raised to the top of the paint
    /// order.
    pub fn pointer_up(&mut self, stage: &mut Stage) -> Option<DragEnd> {
        let session = self.session.take()?;
        if session.moved {
            stage.bring_to_front(session.target);
            debug!(swatch = %session.target, "Drag finished");
            Some(DragEnd::Moved(session.target))
        } else {
            Some(DragEnd::Click(session.target))
        }
    }

    /// Abandon the session without promoting anything.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}
