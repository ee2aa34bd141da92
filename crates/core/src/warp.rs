//! The inverse-mapping seam shared by every tool.
//!
//! A [`Warp`] answers one question per destination pixel: keep the pixel,
//! or sample it from which source coordinate? [`resample_pass`] runs that
//! question over the whole grid against an immutable pre-warp canvas and
//! returns a fresh buffer, so no pixel ever reads a value written by the
//! same pass.

use std::ops::AddAssign;

use glam::DVec2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::error::MarblingError;
use crate::grid::{Grid, CHANNELS};
use crate::pixel::Channel;
use crate::resample::{sample, Interpolation};

/// Floor applied to degenerate distances and square-root arguments.
pub const EPSILON: f64 = 1e-8;

/// What a warp does with one destination pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pickup {
    /// Leave the pre-warp color in place.
    Keep,
    /// Resample from `at` in the pre-warp canvas. `clamped` records whether
    /// `at` was pinned onto the canvas edge.
    Sample { at: DVec2, clamped: bool },
}

/// An inverse coordinate mapping over a canvas grid.
///
/// This trait is object-safe; the resampling pass takes `&dyn Warp`.
pub trait Warp: Sync {
    /// Rejects invalid parameters. Called before any buffer is allocated.
    fn validate(&self) -> Result<(), MarblingError>;

    /// Decides the fate of destination pixel `(row, col)`.
    ///
    /// Sample coordinates must already lie inside the grid.
    fn pickup(&self, grid: &Grid, row: usize, col: usize) -> Pickup;
}

/// Per-call counters reported by a warp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarpStats {
    /// Destination pixels resampled from a source coordinate.
    pub resampled: usize,
    /// Pickups that had to be clamped onto the canvas edge.
    pub clamped: usize,
    /// Pixels overwritten by a solid fill after resampling.
    pub filled: usize,
}

impl AddAssign for WarpStats {
    fn add_assign(&mut self, rhs: Self) {
        self.resampled += rhs.resampled;
        self.clamped += rhs.clamped;
        self.filled += rhs.filled;
    }
}

/// Computes the post-warp buffer of `source` under `warp`.
///
/// Rows are processed in parallel. Each row reads only `source` and writes
/// only its own slice of the output, so the result does not depend on
/// scheduling.
pub fn resample_pass<C: Channel>(
    source: &Canvas<C>,
    warp: &dyn Warp,
    interpolation: Interpolation,
) -> Result<(Vec<C>, WarpStats), MarblingError> {
    let grid = source.grid();
    let mut out = source.pixels().to_vec();

    let per_row = out
        .par_chunks_mut(grid.width() * CHANNELS)
        .enumerate()
        .map(|(r, dst)| -> Result<WarpStats, MarblingError> {
            let mut stats = WarpStats::default();
            for (row, col) in grid.row(r) {
                if let Pickup::Sample { at, clamped } = warp.pickup(&grid, row, col) {
                    let color = sample(source, interpolation, at.x, at.y)?;
                    let o = col * CHANNELS;
                    dst[o..o + CHANNELS].copy_from_slice(&color.0);
                    stats.resampled += 1;
                    stats.clamped += usize::from(clamped);
                }
            }
            Ok(stats)
        })
        .collect::<Result<Vec<WarpStats>, MarblingError>>()?;

    let mut stats = WarpStats::default();
    for s in per_row {
        stats += s;
    }
    Ok((out, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Rgb;

    /// Flips the canvas upside down.
    struct FlipRows;

    impl Warp for FlipRows {
        fn validate(&self) -> Result<(), MarblingError> {
            Ok(())
        }

        fn pickup(&self, grid: &Grid, row: usize, col: usize) -> Pickup {
            Pickup::Sample {
                at: DVec2::new((grid.height() - 1 - row) as f64, col as f64),
                clamped: false,
            }
        }
    }

    /// Samples from outside the canvas without clamping.
    struct Escapes;

    impl Warp for Escapes {
        fn validate(&self) -> Result<(), MarblingError> {
            Ok(())
        }

        fn pickup(&self, _grid: &Grid, _row: usize, _col: usize) -> Pickup {
            Pickup::Sample {
                at: DVec2::new(-5.0, 0.0),
                clamped: false,
            }
        }
    }

    /// Keeps every pixel.
    struct Identity;

    impl Warp for Identity {
        fn validate(&self) -> Result<(), MarblingError> {
            Ok(())
        }

        fn pickup(&self, _grid: &Grid, _row: usize, _col: usize) -> Pickup {
            Pickup::Keep
        }
    }

    fn rows(height: usize, width: usize) -> Canvas<u16> {
        let data = (0..height)
            .flat_map(|r| std::iter::repeat([r as u16; 3]).take(width).flatten())
            .collect();
        Canvas::from_raw(height, width, data).unwrap()
    }

    #[test]
    fn pass_reads_only_pre_warp_buffer() {
        let canvas = rows(5, 3);
        let (out, stats) = resample_pass(&canvas, &FlipRows, Interpolation::Nearest).unwrap();
        let flipped = Canvas::from_raw(5, 3, out).unwrap();
        for (row, col) in canvas.grid().coords() {
            assert_eq!(flipped.pixel(row, col), Rgb::splat(4 - row as u16));
        }
        assert_eq!(stats.resampled, 15);
        assert_eq!(stats.clamped, 0);
    }

    #[test]
    fn keep_leaves_buffer_untouched() {
        let canvas = rows(4, 4);
        let (out, stats) = resample_pass(&canvas, &Identity, Interpolation::Bilinear).unwrap();
        assert_eq!(out, canvas.pixels());
        assert_eq!(stats, WarpStats::default());
    }

    #[test]
    fn escaped_pickup_surfaces_as_out_of_bounds() {
        let canvas = rows(3, 3);
        let err = resample_pass(&canvas, &Escapes, Interpolation::Nearest).unwrap_err();
        assert!(matches!(err, MarblingError::SampleOutOfBounds { .. }));
    }

    #[test]
    fn warp_trait_is_object_safe() {
        let warps: Vec<Box<dyn Warp>> = vec![Box::new(FlipRows), Box::new(Identity)];
        assert!(warps.iter().all(|w| w.validate().is_ok()));
    }

    #[test]
    fn stats_add_assign_sums_fields() {
        let mut a = WarpStats {
            resampled: 1,
            clamped: 2,
            filled: 3,
        };
        a += WarpStats {
            resampled: 10,
            clamped: 20,
            filled: 30,
        };
        assert_eq!(
            a,
            WarpStats {
                resampled: 11,
                clamped: 22,
                filled: 33
            }
        );
    }
}
