//! Swatches on a stage, in paint order.

use std::fmt;

use palette::Srgb;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::parse_rgb_triple;

/// Unique swatch identifier within a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SwatchId(pub u32);

impl fmt::Display for SwatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "swatch-{}", self.0)
    }
}

/// A point or offset in stage units, relative to the stage origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Measured size of the stage container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StageBounds {
    pub width: f64,
    pub height: f64,
}

impl StageBounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A circular color swatch.
///
/// `position` is the top-left corner of the swatch's bounding square.
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    id: SwatchId,
    /// Rendered color, as applied to the surface (normally `rgb(r,g,b)`)
    pub fill: String,
    pub position: Position,
    pub size: f64,
    editing: bool,
}

impl Swatch {
    pub fn id(&self) -> SwatchId {
        self.id
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn center(&self) -> Position {
        let r = self.size / 2.0;
        Position::new(self.position.x + r, self.position.y + r)
    }

    /// Whether `point` lies inside the circle.
    pub fn contains(&self, point: Position) -> bool {
        let c = self.center();
        let r = self.size / 2.0;
        let (dx, dy) = (point.x - c.x, point.y - c.y);
        dx * dx + dy * dy <= r * r
    }

    /// The rendered color read back as RGB, if it is in `rgb(...)` form.
    pub fn rendered_rgb(&self) -> Option<Srgb<u8>> {
        parse_rgb_triple(&self.fill)
    }
}

/// The stage: bounds plus swatches in paint order (last is topmost).
///
/// Enforces that at most one swatch carries the editing marker.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    bounds: StageBounds,
    swatches: Vec<Swatch>,
    next_id: u32,
}

impl Stage {
    pub fn new(bounds: StageBounds) -> Self {
        Self {
            bounds,
            swatches: Vec::new(),
            next_id: 1,
        }
    }

    pub fn bounds(&self) -> StageBounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: StageBounds) {
        self.bounds = bounds;
    }

    /// Add a swatch on top of the paint order.
    pub fn add(&mut self, fill: impl Into<String>, position: Position, size: f64) -> SwatchId {
        let id = SwatchId(self.next_id);
        self.next_id += 1;
        self.swatches.push(Swatch {
            id,
            fill: fill.into(),
            position,
            size,
            editing: false,
        });
        debug!(%id, "Swatch added");
        id
    }

    pub fn remove(&mut self, id: SwatchId) -> Option<Swatch> {
        let idx = self.index_of(id)?;
        debug!(%id, "Swatch removed");
        Some(self.swatches.remove(idx))
    }

    pub fn get(&self, id: SwatchId) -> Option<&Swatch> {
        self.swatches.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: SwatchId) -> Option<&mut Swatch> {
        self.swatches.iter_mut().find(|s| s.id == id)
    }

    /// Swatches bottom to top.
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn swatches_mut(&mut self) -> impl Iterator<Item = &mut Swatch> {
        self.swatches.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// Paint order of the swatch ids, bottom to top.
    pub fn order(&self) -> Vec<SwatchId> {
        self.swatches.iter().map(|s| s.id).collect()
    }

    /// Move a swatch to the top of the paint order.
    pub fn bring_to_front(&mut self, id: SwatchId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let swatch = self.swatches.remove(idx);
        self.swatches.push(swatch);
        true
    }

    /// Topmost swatch under `point`.
    pub fn swatch_at(&self, point: Position) -> Option<SwatchId> {
        self.swatches
            .iter()
            .rev()
            .find(|s| s.contains(point))
            .map(|s| s.id)
    }

    pub fn editing(&self) -> Option<SwatchId> {
        self.swatches.iter().find(|s| s.editing).map(|s| s.id)
    }

    /// Mark `id` as the editing swatch, clearing any previous one first.
    pub fn set_editing(&mut self, id: SwatchId) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        self.clear_editing();
        if let Some(swatch) = self.get_mut(id) {
            swatch.editing = true;
        }
        true
    }

    /// Clear the editing marker; returns the swatch that carried it.
    pub fn clear_editing(&mut self) -> Option<SwatchId> {
        let mut cleared = None;
        for swatch in self.swatches.iter_mut().filter(|s| s.editing) {
            swatch.editing = false;
            cleared = Some(swatch.id);
        }
        cleared
    }

    fn index_of(&self, id: SwatchId) -> Option<usize> {
        self.swatches.iter().position(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_with_two() -> (Stage, SwatchId, SwatchId) {
        let mut stage = Stage::new(StageBounds::new(100.0, 100.0));
        let a = stage.add("rgb(255,0,0)", Position::new(0.0, 0.0), 20.0);
        let b = stage.add("rgb(0,0,255)", Position::new(10.0, 0.0), 20.0);
        (stage, a, b)
    }

    #[test]
    fn ids_are_unique_after_removal() {
        let (mut stage, a, b) = stage_with_two();
        stage.remove(a);
        let c = stage.add("rgb(0,0,0)", Position::default(), 20.0);
        assert_ne!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let (mut stage, a, b) = stage_with_two();
        // Overlap region of both circles.
        let p = Position::new(15.0, 10.0);
        assert_eq!(stage.swatch_at(p), Some(b));
        stage.bring_to_front(a);
        assert_eq!(stage.swatch_at(p), Some(a));
        assert_eq!(stage.order(), vec![b, a]);
    }

    #[test]
    fn hit_test_ignores_bounding_box_corners() {
        let (stage, _, _) = stage_with_two();
        assert_eq!(stage.swatch_at(Position::new(0.5, 19.5)), None);
    }

    #[test]
    fn single_editing_marker() {
        let (mut stage, a, b) = stage_with_two();
        assert!(stage.set_editing(a));
        assert!(stage.set_editing(b));
        assert_eq!(stage.editing(), Some(b));
        assert!(!stage.get(a).unwrap().is_editing());
        assert_eq!(stage.clear_editing(), Some(b));
        assert_eq!(stage.editing(), None);
    }

    #[test]
    fn editing_unknown_swatch_keeps_current() {
        let (mut stage, a, _) = stage_with_two();
        stage.set_editing(a);
        assert!(!stage.set_editing(SwatchId(99)));
        assert_eq!(stage.editing(), Some(a));
    }
}
