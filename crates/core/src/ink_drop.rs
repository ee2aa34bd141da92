//! Ink-drop warp: a circular drop pushes existing paint radially outward.
//!
//! For a destination pixel `p` at distance `d >= r` from the drop center,
//! the paint now at `p` used to sit at
//!
//! ```text
//! q = center + (p - center) * sqrt(max(1 - r²/d², EPSILON))
//! ```
//!
//! Pixels with `d < r` are covered by the drop itself and end up solid
//! fill color.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::MarblingError;
use crate::grid::{Grid, CHANNELS};
use crate::pixel::{Channel, Rgb};
use crate::warp::{Pickup, Warp, EPSILON};

/// A circular drop of ink.
///
/// `center` is `(row, col)` and may lie off the canvas; pickups are clamped
/// onto the canvas edge in that case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InkDrop<C = u16> {
    pub center: DVec2,
    pub radius: f64,
    pub color: Rgb<C>,
}

impl<C: Channel> InkDrop<C> {
    /// Creates a drop. Parameters are checked by [`Warp::validate`] when applied.
    pub fn new(center: DVec2, radius: f64, color: Rgb<C>) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }

    /// Whether `p` lies strictly inside the drop.
    pub fn covers(&self, p: DVec2) -> bool {
        (p - self.center).length() < self.radius
    }

    /// Pre-drop position of the paint now at `p`, or `None` when `p` is
    /// inside the drop. The result is not clamped.
    pub fn source_of(&self, p: DVec2) -> Option<DVec2> {
        let rel = p - self.center;
        let d = rel.length();
        if d < self.radius {
            return None;
        }
        let r2 = self.radius * self.radius;
        let scale = (1.0 - r2 / (d * d)).max(EPSILON).sqrt();
        Some(self.center + rel * scale)
    }

    /// Fills every covered pixel of `data` with the drop color.
    ///
    /// Only the drop's bounding box is scanned. Returns the number of
    /// pixels filled.
    pub(crate) fn stamp(&self, grid: &Grid, data: &mut [C]) -> usize {
        let Some((rows, cols)) = self.bounds(grid) else {
            return 0;
        };
        let mut filled = 0;
        for row in rows {
            for col in cols.clone() {
                if self.covers(DVec2::new(row as f64, col as f64)) {
                    let o = grid.index(row, col) * CHANNELS;
                    data[o..o + CHANNELS].copy_from_slice(&self.color.0);
                    filled += 1;
                }
            }
        }
        filled
    }

    /// Row and column ranges of the bounding box, intersected with the grid.
    fn bounds(
        &self,
        grid: &Grid,
    ) -> Option<(std::ops::RangeInclusive<usize>, std::ops::RangeInclusive<usize>)> {
        let span = |c: f64, len: usize| {
            let lo = (c - self.radius).floor().max(0.0);
            let hi = (c + self.radius).ceil().min((len - 1) as f64);
            (lo <= hi).then(|| lo as usize..=hi as usize)
        };
        Some((
            span(self.center.x, grid.height())?,
            span(self.center.y, grid.width())?,
        ))
    }
}

impl<C: Channel> Warp for InkDrop<C> {
    fn validate(&self) -> Result<(), MarblingError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(MarblingError::InvalidArgument(format!(
                "ink drop radius must be a positive finite number, got {}",
                self.radius
            )));
        }
        if !self.center.is_finite() {
            return Err(MarblingError::InvalidArgument(format!(
                "ink drop center must be finite, got {}",
                self.center
            )));
        }
        Ok(())
    }

    fn pickup(&self, grid: &Grid, row: usize, col: usize) -> Pickup {
        match self.source_of(DVec2::new(row as f64, col as f64)) {
            None => Pickup::Keep,
            Some(q) => {
                let (at, clamped) = grid.clamp(q);
                Pickup::Sample { at, clamped }
            }
        }
    }
}
