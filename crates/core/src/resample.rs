//! Pixel resampling at floating-point source coordinates.
//!
//! Coordinates are `(row, col)`. Both resamplers expect the warp layer to
//! have clamped the pickup coordinate onto the canvas already; anything
//! still outside is reported as [`MarblingError::SampleOutOfBounds`].

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::error::MarblingError;
use crate::grid::{Grid, CHANNELS};
use crate::pixel::{Channel, Rgb};

const INTERPOLATION_NAMES: &[&str] = &["nearest", "bilinear"];

/// Resampling strategy used by a warp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Round to the closest pixel (half away from zero).
    #[default]
    Nearest,
    /// Blend the four surrounding pixels by their fractional weights.
    Bilinear,
}

impl Interpolation {
    /// Looks up a mode by its lowercase name.
    pub fn from_name(name: &str) -> Result<Self, MarblingError> {
        match name {
            "nearest" => Ok(Interpolation::Nearest),
            "bilinear" => Ok(Interpolation::Bilinear),
            _ => Err(MarblingError::InvalidArgument(format!(
                "unknown interpolation '{name}' (expected one of: {})",
                INTERPOLATION_NAMES.join(", ")
            ))),
        }
    }

    /// Lowercase name accepted by [`from_name`](Self::from_name).
    pub fn name(self) -> &'static str {
        match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Bilinear => "bilinear",
        }
    }

    /// All recognized mode names.
    pub fn list_names() -> &'static [&'static str] {
        INTERPOLATION_NAMES
    }
}

/// Reads the color at `(row, col)` from `canvas` using `interpolation`.
pub fn sample<C: Channel>(
    canvas: &Canvas<C>,
    interpolation: Interpolation,
    row: f64,
    col: f64,
) -> Result<Rgb<C>, MarblingError> {
    match interpolation {
        Interpolation::Nearest => nearest(canvas, row, col),
        Interpolation::Bilinear => bilinear(canvas, row, col),
    }
}

/// Nearest-neighbor sample. Rounds half away from zero.
pub fn nearest<C: Channel>(canvas: &Canvas<C>, row: f64, col: f64) -> Result<Rgb<C>, MarblingError> {
    let grid = canvas.grid();
    let (r, c) = (row.round(), col.round());
    let in_rows = r >= 0.0 && r < grid.height() as f64;
    let in_cols = c >= 0.0 && c < grid.width() as f64;
    if !(in_rows && in_cols) {
        return Err(out_of_bounds(grid, row, col));
    }
    Ok(texel(canvas, r as usize, c as usize))
}

/// Bilinear sample over the four pixels around `(row, col)`.
///
/// The far neighbor index is clamped to the last row/column, so a pickup
/// exactly on the far edge blends with itself instead of reading past it.
pub fn bilinear<C: Channel>(canvas: &Canvas<C>, row: f64, col: f64) -> Result<Rgb<C>, MarblingError> {
    let grid = canvas.grid();
    if !grid.contains(glam::DVec2::new(row, col)) {
        return Err(out_of_bounds(grid, row, col));
    }

    let (x1, y1) = (row.floor(), col.floor());
    let (xr, yr) = (row - x1, col - y1);
    let (x1, y1) = (x1 as usize, y1 as usize);
    let x2 = (x1 + 1).min(grid.height() - 1);
    let y2 = (y1 + 1).min(grid.width() - 1);

    let q11 = texel(canvas, x1, y1).0;
    let q12 = texel(canvas, x1, y2).0;
    let q21 = texel(canvas, x2, y1).0;
    let q22 = texel(canvas, x2, y2).0;

    let w11 = (1.0 - xr) * (1.0 - yr);
    let w12 = (1.0 - xr) * yr;
    let w21 = xr * (1.0 - yr);
    let w22 = xr * yr;

    let blend = |i: usize| {
        C::from_f64(
            q11[i].to_f64() * w11
                + q12[i].to_f64() * w12
                + q21[i].to_f64() * w21
                + q22[i].to_f64() * w22,
        )
    };
    Ok(Rgb([blend(0), blend(1), blend(2)]))
}

fn texel<C: Channel>(canvas: &Canvas<C>, row: usize, col: usize) -> Rgb<C> {
    let o = canvas.grid().index(row, col) * CHANNELS;
    let px = &canvas.pixels()[o..o + CHANNELS];
    Rgb([px[0], px[1], px[2]])
}

fn out_of_bounds(grid: Grid, row: f64, col: f64) -> MarblingError {
    MarblingError::SampleOutOfBounds {
        row,
        col,
        height: grid.height(),
        width: grid.width(),
    }
}
