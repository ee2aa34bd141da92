//! Min-max normalization of channel data.
//!
//! Used on the way in (an init image is squeezed into a working range) and
//! on the way out (the final canvas is stretched over the full channel
//! range before encoding). All three channels share one minimum and maximum.

use marbling_core::{Canvas, Channel, MarblingError};

/// Linearly maps `[min, max]` of `values` onto `[alpha, beta]`.
///
/// A constant input maps every value to `alpha`; an empty one stays empty.
/// Results are rounded and saturated into the channel type.
pub fn normalize_min_max<C: Channel>(values: &[C], alpha: f64, beta: f64) -> Vec<C> {
    let Some((lo, hi)) = value_range(values) else {
        return Vec::new();
    };
    let scale = if hi > lo { (beta - alpha) / (hi - lo) } else { 0.0 };
    values
        .iter()
        .map(|v| C::from_f64((v.to_f64() - lo) * scale + alpha))
        .collect()
}

/// Smallest and largest value, or `None` for an empty slice.
pub fn value_range<C: Channel>(values: &[C]) -> Option<(f64, f64)> {
    values.iter().map(|v| v.to_f64()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Returns a copy of `canvas` with its channels normalized onto
/// `[alpha, beta]`.
pub fn normalize_canvas<C: Channel>(
    canvas: &Canvas<C>,
    alpha: f64,
    beta: f64,
) -> Result<Canvas<C>, MarblingError> {
    if !(alpha.is_finite() && beta.is_finite()) {
        return Err(MarblingError::InvalidArgument(format!(
            "normalization bounds must be finite, got [{alpha}, {beta}]"
        )));
    }
    Canvas::from_raw(
        canvas.height(),
        canvas.width(),
        normalize_min_max(canvas.pixels(), alpha, beta),
    )
}

/// Stretches `canvas` over the full range of its channel type.
pub fn stretch_to_full_range<C: Channel>(canvas: &Canvas<C>) -> Result<Canvas<C>, MarblingError> {
    normalize_canvas(canvas, 0.0, C::MAX.to_f64())
}

/// Squeezes `canvas` into the working range used for loaded images:
/// `[0, max(height, width) - 1]`, capped at the channel maximum.
pub fn to_working_range<C: Channel>(canvas: &Canvas<C>) -> Result<Canvas<C>, MarblingError> {
    let beta = (canvas.height().max(canvas.width()) - 1) as f64;
    normalize_canvas(canvas, 0.0, beta.min(C::MAX.to_f64()))
}
