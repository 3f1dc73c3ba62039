//! Web Mercator sample coordinates for tile pixels.
//!
//! Pure arithmetic, no failure modes. Cache correctness depends on
//! these functions being bit-for-bit deterministic: identical tile
//! addresses must always produce identical coordinate arrays.

use std::f64::consts::PI;

/// Latitude limit of the square Web Mercator world (degrees).
pub const MAX_LAT: f64 = 85.0511287798;

/// Latitude of each pixel-row center in tile row `y` at zoom `z`,
/// strictly decreasing north to south.
pub fn latitude_samples(z: u32, y: u32, tile_size: usize) -> Vec<f64> {
    let n = f64::from(1u32 << z);
    (0..tile_size)
        .map(|i| {
            let y_frac = f64::from(y) + (i as f64 + 0.5) / tile_size as f64;
            (PI * (1.0 - 2.0 * y_frac / n)).sinh().atan().to_degrees()
        })
        .collect()
}

/// Longitude of each pixel-column center in tile column `x` at zoom
/// `z`, strictly increasing west to east.
pub fn longitude_samples(z: u32, x: u32, tile_size: usize) -> Vec<f64> {
    let n = f64::from(1u32 << z);
    (0..tile_size)
        .map(|i| {
            let x_frac = f64::from(x) + (i as f64 + 0.5) / tile_size as f64;
            x_frac / n * 360.0 - 180.0
        })
        .collect()
}
