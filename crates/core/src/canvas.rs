//! The marbling canvas and its composition rule.
//!
//! A [`Canvas`] owns an H×W×3 buffer. Every tool call validates its
//! parameters, computes the complete post-warp buffer from the current one,
//! and only then replaces it. A failed call leaves the canvas untouched, and
//! no pixel of a warp is ever computed from another pixel of the same warp.

use crate::error::MarblingError;
use crate::grid::{Grid, CHANNELS};
use crate::ink_drop::InkDrop;
use crate::pixel::{Channel, ChannelDepth, Rgb};
use crate::resample::Interpolation;
use crate::tine_line::TineLine;
use crate::tool::Tool;
use crate::warp::{resample_pass, Warp, WarpStats};

/// Raw pixels handed to an encoder: row-major, three interleaved channels.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer<C> {
    pub height: usize,
    pub width: usize,
    pub depth: ChannelDepth,
    pub data: Vec<C>,
}

/// A marbling canvas with channel type `C` (16-bit by default).
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas<C = u16> {
    grid: Grid,
    data: Vec<C>,
}

impl<C: Channel> Canvas<C> {
    /// Creates a canvas filled with `background`.
    ///
    /// Returns `MarblingError::InvalidDimensions` if height or width is
    /// zero, or if the buffer size would overflow `usize`.
    pub fn new(height: usize, width: usize, background: Rgb<C>) -> Result<Self, MarblingError> {
        let grid = Grid::new(height, width)?;
        let data = std::iter::repeat(background.0)
            .take(grid.len())
            .flatten()
            .collect();
        Ok(Self { grid, data })
    }

    /// Wraps already-decoded pixels (row-major, RGB interleaved).
    ///
    /// Returns `MarblingError::DimensionMismatch` if `data.len()` is not
    /// `height * width * 3`.
    pub fn from_raw(height: usize, width: usize, data: Vec<C>) -> Result<Self, MarblingError> {
        let grid = Grid::new(height, width)?;
        if data.len() != grid.buffer_len() {
            return Err(MarblingError::DimensionMismatch {
                expected: grid.buffer_len(),
                got: data.len(),
            });
        }
        Ok(Self { grid, data })
    }

    /// Rebuilds a canvas from an exported buffer, with the same checks as
    /// [`from_raw`](Self::from_raw).
    pub fn from_buffer(buffer: PixelBuffer<C>) -> Result<Self, MarblingError> {
        Self::from_raw(buffer.height, buffer.width, buffer.data)
    }

    /// The coordinate grid of this canvas.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Channel depth of `C`.
    pub fn depth(&self) -> ChannelDepth {
        C::DEPTH
    }

    /// Read-only access to the row-major channel data.
    pub fn pixels(&self) -> &[C] {
        &self.data
    }

    /// Color at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the canvas.
    pub fn pixel(&self, row: usize, col: usize) -> Rgb<C> {
        assert!(
            row < self.height() && col < self.width(),
            "pixel ({row}, {col}) outside {}x{} canvas",
            self.height(),
            self.width()
        );
        let o = self.grid.index(row, col) * CHANNELS;
        Rgb([self.data[o], self.data[o + 1], self.data[o + 2]])
    }

    /// Drops ink: pushes paint radially away from the drop center, then
    /// fills the drop disk with its color.
    pub fn apply_ink_drop(
        &mut self,
        drop: &InkDrop<C>,
        interpolation: Interpolation,
    ) -> Result<WarpStats, MarblingError> {
        drop.validate()?;
        let (mut next, mut stats) = resample_pass(self, drop, interpolation)?;
        stats.filled = drop.stamp(&self.grid, &mut next);
        self.data = next;
        tracing::debug!(
            center = %drop.center,
            radius = drop.radius,
            resampled = stats.resampled,
            clamped = stats.clamped,
            filled = stats.filled,
            "ink drop applied"
        );
        Ok(stats)
    }

    /// Drags a tine along a line, shearing paint near it.
    pub fn apply_tine_line(
        &mut self,
        line: &TineLine,
        interpolation: Interpolation,
    ) -> Result<WarpStats, MarblingError> {
        line.validate()?;
        let (next, stats) = resample_pass(self, line, interpolation)?;
        self.data = next;
        tracing::debug!(
            direction = %line.direction,
            origin = %line.origin,
            shift = line.shift,
            sharpness = line.sharpness,
            resampled = stats.resampled,
            clamped = stats.clamped,
            "tine line applied"
        );
        Ok(stats)
    }

    /// Applies any recorded tool.
    pub fn apply(
        &mut self,
        tool: &Tool<C>,
        interpolation: Interpolation,
    ) -> Result<WarpStats, MarblingError> {
        match tool {
            Tool::InkDrop(d) => self.apply_ink_drop(d, interpolation),
            Tool::TineLine(t) => self.apply_tine_line(t, interpolation),
        }
    }

    /// Copies the pixels out for an encoder.
    pub fn export(&self) -> PixelBuffer<C> {
        PixelBuffer {
            height: self.height(),
            width: self.width(),
            depth: C::DEPTH,
            data: self.data.clone(),
        }
    }

    /// Consumes the canvas into its pixel buffer.
    pub fn into_buffer(self) -> PixelBuffer<C> {
        PixelBuffer {
            height: self.grid.height(),
            width: self.grid.width(),
            depth: C::DEPTH,
            data: self.data,
        }
    }
}
