#![deny(unsafe_code)]
//! Core warping engine for paper-marbling images.
//!
//! Provides the coordinate [`Grid`], the `Channel`/[`Rgb`] pixel model,
//! nearest and bilinear resampling, the [`InkDrop`] and [`TineLine`] inverse
//! mappings behind the object-safe [`Warp`] trait, and the [`Canvas`] that
//! composes them. The core is deterministic: it never draws random numbers
//! and never touches files.

pub mod canvas;
pub mod error;
pub mod grid;
pub mod ink_drop;
pub mod pixel;
pub mod resample;
pub mod tine_line;
pub mod tool;
pub mod warp;

pub use canvas::{Canvas, PixelBuffer};
pub use error::MarblingError;
pub use glam::DVec2;
pub use grid::Grid;
pub use ink_drop::InkDrop;
pub use pixel::{Channel, ChannelDepth, Rgb};
pub use resample::Interpolation;
pub use tine_line::TineLine;
pub use tool::Tool;
pub use warp::{Pickup, Warp, WarpStats, EPSILON};
