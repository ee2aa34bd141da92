//! Tine-line warp: a comb tooth dragged along a straight line.
//!
//! Paint is displaced along the line direction by an amount that decays
//! hyperbolically with distance from the line:
//!
//! ```text
//! d     = max(|<p - origin, n>|, EPSILON)
//! decay = shift * sharpness / (d + sharpness)
//! q     = p - decay * u
//! ```
//!
//! Pixel rows grow downward, so the displacement direction `u` is the
//! direction vector with its second component negated, while the distance
//! normal `n` is the direction vector as given. Both are normalized.
//! Pickups falling off the canvas are clamped onto the nearest edge.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::MarblingError;
use crate::grid::Grid;
use crate::warp::{Pickup, Warp, EPSILON};

/// A single tine stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TineLine {
    /// Stroke direction. Must be non-zero.
    pub direction: DVec2,
    /// A point on the line, `(row, col)`.
    pub origin: DVec2,
    /// Maximum displacement, reached on the line itself.
    pub shift: f64,
    /// Decay control; `0` disables displacement entirely.
    pub sharpness: f64,
}

impl TineLine {
    /// Creates a stroke. Parameters are checked by [`Warp::validate`] when applied.
    pub fn new(direction: DVec2, origin: DVec2, shift: f64, sharpness: f64) -> Self {
        Self {
            direction,
            origin,
            shift,
            sharpness,
        }
    }

    /// Unit vector paint is displaced along.
    ///
    /// Only meaningful after [`Warp::validate`] has accepted the line.
    pub fn displacement_direction(&self) -> DVec2 {
        DVec2::new(self.direction.x, -self.direction.y) / self.direction.length()
    }

    /// Unit normal used to measure distance from the line.
    pub fn normal(&self) -> DVec2 {
        self.direction / self.direction.length()
    }

    /// Distance of `p` from the line, floored at `EPSILON`.
    pub fn distance(&self, p: DVec2) -> f64 {
        (p - self.origin).dot(self.normal()).abs().max(EPSILON)
    }

    /// Displacement magnitude at distance `d`.
    ///
    /// Never exceeds `|shift|`: the falloff factor is formed first and lies
    /// in `[0, 1]`, so extreme but finite parameters cannot overflow.
    pub fn decay(&self, d: f64) -> f64 {
        if self.sharpness == 0.0 {
            return 0.0;
        }
        self.shift * (self.sharpness / (d + self.sharpness))
    }

    /// Pre-stroke position of the paint now at `p`. Not clamped.
    pub fn source_of(&self, p: DVec2) -> DVec2 {
        p - self.decay(self.distance(p)) * self.displacement_direction()
    }
}

impl Warp for TineLine {
    fn validate(&self) -> Result<(), MarblingError> {
        let norm = self.direction.length();
        if !(norm.is_finite() && norm > 0.0) {
            return Err(MarblingError::InvalidArgument(format!(
                "tine line direction must be a non-zero finite vector, got {}",
                self.direction
            )));
        }
        if !self.origin.is_finite() {
            return Err(MarblingError::InvalidArgument(format!(
                "tine line origin must be finite, got {}",
                self.origin
            )));
        }
        if !self.shift.is_finite() {
            return Err(MarblingError::InvalidArgument(format!(
                "tine line shift must be finite, got {}",
                self.shift
            )));
        }
        if !(self.sharpness.is_finite() && self.sharpness >= 0.0) {
            return Err(MarblingError::InvalidArgument(format!(
                "tine line sharpness must be finite and non-negative, got {}",
                self.sharpness
            )));
        }
        Ok(())
    }

    fn pickup(&self, grid: &Grid, row: usize, col: usize) -> Pickup {
        let q = self.source_of(DVec2::new(row as f64, col as f64));
        let (at, clamped) = grid.clamp(q);
        Pickup::Sample { at, clamped }
    }
}
