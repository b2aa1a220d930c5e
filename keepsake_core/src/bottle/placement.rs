//! Cosmetic placement of papers inside the bottle.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Where a folded paper sits in the bottle. Visual only, never state-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Degrees, -20 to 20.
    pub rotation: f32,
    /// Pixels, -30 to 30.
    pub offset_x: f32,
    /// Pixels, 0 to 80 plus 8 per stack position.
    pub offset_y: f32,
    /// 0.8 to 1.2.
    pub scale: f32,
    pub z_index: u32,
}

impl Placement {
    /// Random placement for the paper at `index` in a stack of `total`.
    pub fn random<R: Rng + ?Sized>(index: usize, total: usize, rng: &mut R) -> Self {
        Self {
            rotation: rng.gen_range(-20.0..20.0),
            offset_x: rng.gen_range(-30.0..30.0),
            offset_y: rng.gen_range(0.0f32..80.0) + index as f32 * 8.0,
            scale: rng.gen_range(0.8..1.2),
            z_index: total.saturating_sub(index) as u32,
        }
    }

    /// CSS transform string.
    pub fn transform(&self) -> String {
        format!(
            "rotate({:.1}deg) translate({:.1}px, {:.1}px) scale({:.2})",
            self.rotation, self.offset_x, self.offset_y, self.scale
        )
    }
}
