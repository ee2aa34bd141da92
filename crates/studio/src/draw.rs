//! Random tool parameters.
//!
//! Each function consumes draws from the generator in a fixed order, so a
//! seed fully determines the resulting tool. The order is part of the recipe
//! format: reordering draws changes every replayed image.

use marbling_core::{Channel, DVec2, Grid, InkDrop, Rgb, TineLine};

use crate::prng::Xorshift64;

/// Smallest drop radius drawn.
pub const MIN_RADIUS: usize = 10;
/// Largest drop radius drawn (exclusive).
pub const MAX_RADIUS: usize = 100;
/// Upper bound (exclusive) of drawn tine sharpness.
pub const MAX_SHARPNESS: usize = 32;

/// Exclusive upper bound of the radius range on a canvas of this size.
fn radius_limit(grid: &Grid) -> usize {
    let half = grid.height().min(grid.width()) / 2;
    half.max(MIN_RADIUS).min(MAX_RADIUS)
}

/// Draws a random ink drop.
///
/// Order: red, green, blue in `[0, 256)`, column, row, radius.
pub fn ink_drop<C: Channel>(rng: &mut Xorshift64, grid: &Grid) -> InkDrop<C> {
    let mut channel = || C::from_u8(rng.next_in(0, 256) as u8);
    let color = Rgb::new(channel(), channel(), channel());
    let col = rng.next_coord(0, grid.width());
    let row = rng.next_coord(0, grid.height());
    let radius = rng.next_coord(MIN_RADIUS, radius_limit(grid));
    InkDrop::new(DVec2::new(row, col), radius, color)
}

/// Draws a random tine line.
///
/// Order: direction row and column components (each at least 1, so the
/// direction is never zero), origin row, origin column, shift, sharpness.
pub fn tine_line(rng: &mut Xorshift64, grid: &Grid) -> TineLine {
    let (h, w) = (grid.height(), grid.width());
    let a = rng.next_coord(1, h);
    let b = rng.next_coord(1, w);
    let i = rng.next_coord(0, h);
    let j = rng.next_coord(0, w);
    let shift = rng.next_coord(0, 2 * h.min(w));
    let sharpness = rng.next_coord(0, MAX_SHARPNESS);
    TineLine::new(DVec2::new(a, b), DVec2::new(i, j), shift, sharpness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use marbling_core::Warp;

    fn grid(h: usize, w: usize) -> Grid {
        Grid::new(h, w).unwrap()
    }

    #[test]
    fn radius_limit_follows_canvas_size() {
        assert_eq!(radius_limit(&grid(112, 112)), 56);
        assert_eq!(radius_limit(&grid(12, 400)), 10);
        assert_eq!(radius_limit(&grid(1000, 800)), 100);
    }

    #[test]
    fn ink_drop_first_draws_are_the_color() {
        let mut rng = Xorshift64::new(42);
        let drop: InkDrop<u8> = ink_drop(&mut rng, &grid(112, 112));
        assert_eq!(drop.color, Rgb::new(170, 191, 122));
    }

    #[test]
    fn small_canvas_radius_is_minimum() {
        // Empty range [10, 10) yields the lower bound.
        let mut rng = Xorshift64::new(5);
        for _ in 0..20 {
            let drop: InkDrop = ink_drop(&mut rng, &grid(8, 8));
            assert_eq!(drop.radius, 10.0);
        }
    }

    #[test]
    fn ink_drops_are_valid_and_on_canvas() {
        let g = grid(64, 48);
        let mut rng = Xorshift64::new(2024);
        for _ in 0..200 {
            let drop: InkDrop = ink_drop(&mut rng, &g);
            drop.validate().unwrap();
            assert!(g.contains(drop.center));
            assert!(drop.radius >= 10.0 && drop.radius < 24.0);
            assert!(drop.color.channels().iter().all(|&c| c < 256));
        }
    }

    #[test]
    fn tine_lines_are_valid() {
        let g = grid(64, 48);
        let mut rng = Xorshift64::new(7);
        for _ in 0..200 {
            let line = tine_line(&mut rng, &g);
            line.validate().unwrap();
            assert!(line.direction.x >= 1.0 && line.direction.x < 64.0);
            assert!(line.direction.y >= 1.0 && line.direction.y < 48.0);
            assert!(line.shift >= 0.0 && line.shift < 96.0);
            assert!(line.sharpness >= 0.0 && line.sharpness < 32.0);
        }
    }

    #[test]
    fn one_pixel_canvas_still_draws_valid_tools() {
        let g = grid(1, 1);
        let mut rng = Xorshift64::new(3);
        let line = tine_line(&mut rng, &g);
        assert_eq!(line.direction, DVec2::new(1.0, 1.0));
        line.validate().unwrap();
        let drop: InkDrop = ink_drop(&mut rng, &g);
        assert_eq!(drop.center, DVec2::ZERO);
    }

    #[test]
    fn same_seed_same_tools() {
        let g = grid(100, 80);
        let mut a = Xorshift64::new(11);
        let mut b = Xorshift64::new(11);
        for _ in 0..10 {
            assert_eq!(tine_line(&mut a, &g), tine_line(&mut b, &g));
            let da: InkDrop = ink_drop(&mut a, &g);
            let db: InkDrop = ink_drop(&mut b, &g);
            assert_eq!(da, db);
        }
    }
}
