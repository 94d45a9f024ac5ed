//! Creating new swatches with a random hue and position.

use rand::Rng;

use crate::color::{Color, rgb_string};
use crate::stage::{Position, Stage, StageBounds, SwatchId};

/// Pick a random fully saturated, half-lightness color.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::new(f64::from(rng.gen_range(0u16..360)), 100.0, 50.0)
}

/// Pick a random whole-unit position that keeps a swatch of `size` on the
/// stage. Stages smaller than the swatch pin it to the origin.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, bounds: StageBounds, size: f64) -> Position {
    let max_x = (bounds.width - size).max(0.0).floor() as u32;
    let max_y = (bounds.height - size).max(0.0).floor() as u32;
    Position::new(
        f64::from(rng.gen_range(0..=max_x)),
        f64::from(rng.gen_range(0..=max_y)),
    )
}

/// Add swatches of a fixed size at random.
#[derive(Debug)]
pub struct SwatchFactory<R> {
    rng: R,
    size: f64,
}

impl<R: Rng> SwatchFactory<R> {
    pub fn new(rng: R, size: f64) -> Self {
        Self { rng, size }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Add a random swatch on top of `stage`.
    pub fn spawn(&mut self, stage: &mut Stage) -> SwatchId {
        let color = random_color(&mut self.rng);
        let position = random_position(&mut self.rng, stage.bounds(), self.size);
        stage.add(rgb_string(color.to_rgb()), position, self.size)
    }
}
