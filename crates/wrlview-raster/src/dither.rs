#![forbid(unsafe_code)]

//! Ordered dithering.
//!
//! A 4×4 Bayer matrix turns a continuous brightness into a spatial on/off
//! pattern. Thresholds are `matrix[y % 4][x % 4] / 16`, so brightness 1.0
//! clears every threshold and brightness 0.0 clears none.

/// The 4×4 Bayer index matrix.
pub const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Dither threshold for a pixel position, in `[0, 15/16]`.
#[inline]
#[must_use]
pub fn threshold(x: i32, y: i32) -> f32 {
    f32::from(BAYER_4X4[y.rem_euclid(4) as usize][x.rem_euclid(4) as usize]) / 16.0
}

/// Whether a pixel at `(x, y)` survives dithering at the given brightness.
#[inline]
#[must_use]
pub fn keeps(brightness: f32, x: i32, y: i32) -> bool {
    brightness > threshold(x, y)
}
