//! Channel types and RGB colors.
//!
//! A canvas stores three channels per pixel in an unsigned integer type.
//! 16-bit channels are the default working precision so that many composed
//! warps do not accumulate clipping artifacts; 8-bit channels are supported
//! for callers that want byte buffers directly.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::MarblingError;

/// Bit depth of a channel type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelDepth {
    Eight,
    #[default]
    Sixteen,
}

impl ChannelDepth {
    /// Looks up a depth by its bit count (8 or 16).
    pub fn from_bits(bits: u32) -> Result<Self, MarblingError> {
        match bits {
            8 => Ok(ChannelDepth::Eight),
            16 => Ok(ChannelDepth::Sixteen),
            other => Err(MarblingError::InvalidArgument(format!(
                "unsupported channel depth {other} (expected 8 or 16)"
            ))),
        }
    }

    /// Number of bits per channel.
    pub fn bits(self) -> u32 {
        match self {
            ChannelDepth::Eight => 8,
            ChannelDepth::Sixteen => 16,
        }
    }
}

/// An unsigned integer channel value.
///
/// Conversions from `f64` round half away from zero and saturate at
/// `[0, MAX]`, so resampled values always stay representable.
pub trait Channel: Copy + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Largest representable value.
    const MAX: Self;
    /// Depth tag reported in exported buffers.
    const DEPTH: ChannelDepth;

    /// Exact conversion to `f64`.
    fn to_f64(self) -> f64;

    /// Rounds half away from zero and saturates into the channel range.
    /// NaN maps to zero.
    fn from_f64(value: f64) -> Self;

    /// Keeps an 8-bit value unscaled in this channel type.
    fn from_u8(value: u8) -> Self;

    /// Widens into a 16-bit value without rescaling.
    fn to_u16(self) -> u16;

    /// Narrows into an 8-bit value, saturating at 255.
    fn to_u8(self) -> u8;
}

impl Channel for u8 {
    const MAX: Self = u8::MAX;
    const DEPTH: ChannelDepth = ChannelDepth::Eight;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Self {
        value.round().clamp(0.0, 255.0) as u8
    }

    fn from_u8(value: u8) -> Self {
        value
    }

    fn to_u16(self) -> u16 {
        u16::from(self)
    }

    fn to_u8(self) -> u8 {
        self
    }
}

impl Channel for u16 {
    const MAX: Self = u16::MAX;
    const DEPTH: ChannelDepth = ChannelDepth::Sixteen;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Self {
        value.round().clamp(0.0, 65535.0) as u16
    }

    fn from_u8(value: u8) -> Self {
        u16::from(value)
    }

    fn to_u16(self) -> u16 {
        self
    }

    fn to_u8(self) -> u8 {
        u8::try_from(self).unwrap_or(u8::MAX)
    }
}

/// A color triple in a canvas channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb<C>(pub [C; 3]);

impl<C: Channel> Rgb<C> {
    /// A color from its red, green and blue channels.
    pub fn new(r: C, g: C, b: C) -> Self {
        Self([r, g, b])
    }

    /// The same value in all three channels.
    pub fn splat(v: C) -> Self {
        Self([v; 3])
    }

    /// The channels as `[r, g, b]`.
    pub fn channels(self) -> [C; 3] {
        self.0
    }

    /// Parses `"#rrggbb"` or `"rrggbb"` (case insensitive).
    ///
    /// Each component keeps its 8-bit value in the target channel type, so
    /// `#ffffff` is `(255, 255, 255)` on both 8-bit and 16-bit canvases.
    pub fn from_hex(hex: &str) -> Result<Self, MarblingError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(MarblingError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let component = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&digits[range], 16)
                .map(C::from_u8)
                .map_err(|e| MarblingError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Self([
            component(0..2, "red")?,
            component(2..4, "green")?,
            component(4..6, "blue")?,
        ]))
    }
}
