//! Keeps swatches anchored to the stage center across resizes.

use tracing::debug;

use crate::stage::{Position, Stage, StageBounds};

/// Remembers the last stage size so resizes can be applied relative to it.
#[derive(Debug, Clone, Copy)]
pub struct LayoutReflow {
    previous: StageBounds,
}

impl LayoutReflow {
    /// Start tracking from the stage's initial measured size.
    pub fn new(initial: StageBounds) -> Self {
        Self { previous: initial }
    }

    pub fn previous(&self) -> StageBounds {
        self.previous
    }

    /// Apply a resize to every swatch on `stage`.
    ///
    /// Each swatch keeps its center's offset from the stage center: the offset
    /// is taken against the previous center and reapplied to the new one.
    /// Returns `false` when the size did not change.
    #[cfg_attr(debug_assertions, tracing::instrument(skip(self, stage)))]
    pub fn resize(&mut self, stage: &mut Stage, bounds: StageBounds) -> bool {
        if bounds == self.previous {
            return false;
        }
        let old_center = self.previous.center();
        let new_center = bounds.center();

        for swatch in stage.swatches_mut() {
            let half = swatch.size / 2.0;
            let offset_x = (swatch.position.x + half) - old_center.x;
            let offset_y = (swatch.position.y + half) - old_center.y;
            swatch.position = Position::new(
                new_center.x + offset_x - half,
                new_center.y + offset_y - half,
            );
        }

        debug!(
            from_w = self.previous.width,
            from_h = self.previous.height,
            to_w = bounds.width,
            to_h = bounds.height,
            "Stage reflowed"
        );
        stage.set_bounds(bounds);
        self.previous = bounds;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_size_is_a_no_op() {
        let bounds = StageBounds::new(80.0, 40.0);
        let mut stage = Stage::new(bounds);
        let id = stage.add("rgb(0,0,0)", Position::new(3.0, 4.0), 10.0);
        let mut reflow = LayoutReflow::new(bounds);
        assert!(!reflow.resize(&mut stage, bounds));
        assert_eq!(stage.get(id).unwrap().position, Position::new(3.0, 4.0));
    }

    #[test]
    fn shrinking_moves_swatches_toward_center() {
        let mut stage = Stage::new(StageBounds::new(100.0, 100.0));
        let id = stage.add("rgb(0,0,0)", Position::new(70.0, 10.0), 20.0);
        let mut reflow = LayoutReflow::new(stage.bounds());
        reflow.resize(&mut stage, StageBounds::new(60.0, 100.0));
        assert_eq!(stage.get(id).unwrap().position, Position::new(50.0, 10.0));
        assert_eq!(reflow.previous(), StageBounds::new(60.0, 100.0));
    }
}
