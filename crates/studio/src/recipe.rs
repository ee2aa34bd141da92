//! Reproducible description of a randomized composition.
//!
//! A [`Recipe`] captures everything needed to recreate a piece: tool method,
//! canvas dimensions, PRNG seed, number of tool applications, resampling
//! mode, working channel depth, and either the blank-canvas background or
//! the init image the piece started from. Two identical recipes rendered
//! onto identical canvases produce bit-identical output.

use std::path::PathBuf;

use marbling_core::{
    Canvas, Channel, ChannelDepth, Grid, Interpolation, MarblingError, Rgb, Tool, WarpStats,
};
use serde::{Deserialize, Serialize};

use crate::draw;
use crate::prng::Xorshift64;
use crate::ToolMethod;

fn default_count() -> usize {
    1
}

fn default_background() -> Rgb<u8> {
    Rgb::splat(255)
}

/// Reproducible specification for a marbled piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub method: ToolMethod,
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub interpolation: Interpolation,
    /// Fill of a blank canvas, as 8-bit values kept in the canvas channel type.
    #[serde(default = "default_background")]
    pub background: Rgb<u8>,
    /// Channel type the piece is rendered in.
    #[serde(default)]
    pub depth: ChannelDepth,
    /// Image the piece started from instead of a blank canvas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<PathBuf>,
}

impl Recipe {
    /// Creates a recipe applying the tool once, with nearest resampling on a
    /// blank 16-bit canvas with a `(255, 255, 255)` background.
    pub fn new(method: ToolMethod, width: usize, height: usize, seed: u64) -> Self {
        Self {
            method,
            width,
            height,
            seed,
            count: default_count(),
            interpolation: Interpolation::default(),
            background: default_background(),
            depth: ChannelDepth::default(),
            init: None,
        }
    }

    /// Validates that the canvas dimensions are non-zero and addressable.
    pub fn validate(&self) -> Result<(), MarblingError> {
        self.grid().map(|_| ())
    }

    fn grid(&self) -> Result<Grid, MarblingError> {
        Grid::new(self.height, self.width)
    }

    /// Draws the full tool sequence from a fresh generator.
    pub fn tools<C: Channel>(&self) -> Result<Vec<Tool<C>>, MarblingError> {
        let grid = self.grid()?;
        let mut rng = Xorshift64::new(self.seed);
        let tools = (0..self.count)
            .map(|_| match self.method {
                ToolMethod::InkDrop => Tool::InkDrop(draw::ink_drop(&mut rng, &grid)),
                ToolMethod::TineLine => Tool::TineLine(draw::tine_line(&mut rng, &grid)),
            })
            .collect();
        Ok(tools)
    }

    /// A canvas of the recipe size filled with its background.
    pub fn blank_canvas<C: Channel>(&self) -> Result<Canvas<C>, MarblingError> {
        let [r, g, b] = self.background.channels();
        Canvas::new(
            self.height,
            self.width,
            Rgb::new(C::from_u8(r), C::from_u8(g), C::from_u8(b)),
        )
    }

    /// Applies the recipe's tools to `canvas` in order.
    ///
    /// Fails with `InvalidArgument` if the canvas size or channel depth
    /// differs from the recipe's. A failing tool leaves the canvas as the
    /// previous tool left it.
    #[tracing::instrument(level = "debug", skip_all, fields(method = %self.method, seed = self.seed))]
    pub fn render<C: Channel>(&self, canvas: &mut Canvas<C>) -> Result<WarpStats, MarblingError> {
        if canvas.depth() != self.depth {
            return Err(MarblingError::InvalidArgument(format!(
                "recipe is {}-bit but canvas is {}-bit",
                self.depth.bits(),
                canvas.depth().bits()
            )));
        }
        if canvas.height() != self.height || canvas.width() != self.width {
            return Err(MarblingError::InvalidArgument(format!(
                "recipe is {}x{} but canvas is {}x{}",
                self.width,
                self.height,
                canvas.width(),
                canvas.height()
            )));
        }
        let mut total = WarpStats::default();
        for tool in self.tools::<C>()? {
            total += canvas.apply(&tool, self.interpolation)?;
        }
        tracing::info!(
            method = %self.method,
            width = self.width,
            height = self.height,
            seed = self.seed,
            count = self.count,
            clamped = total.clamped,
            filled = total.filled,
            "recipe rendered"
        );
        Ok(total)
    }
}
