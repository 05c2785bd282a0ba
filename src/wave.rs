//! Wave descriptors and the random source they are drawn from.

use std::ops::Range;

/// Number of waves in a field. The field is always rebuilt at this size.
pub const WAVE_COUNT: usize = 5;

pub const WAVELENGTH: Range<f64> = 200.0..400.0;
pub const AMPLITUDE: Range<f64> = 50.0..100.0;
pub const PHASE_SPEED: Range<f64> = 0.1..0.2;

/// Supplier of uniform samples in `[0, 1)`.
///
/// Production code uses [`fastrand::Rng`]; tests plug in seeded or scripted
/// sources to get reproducible wave sets.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform sample in `range`. An empty range yields its start.
    fn uniform(&mut self, range: Range<f64>) -> f64 {
        if range.is_empty() {
            return range.start;
        }
        let v = range.start + self.next_unit() * (range.end - range.start);
        // rounding can land on the excluded upper bound
        if v < range.end {
            v
        } else {
            range.start
        }
    }
}

impl RandomSource for fastrand::Rng {
    fn next_unit(&mut self) -> f64 {
        self.f64()
    }
}

/// One rendered ripple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    /// Vertical centre line in pixels.
    pub baseline_y: f64,
    /// Horizontal period divisor in pixels.
    pub wavelength: f64,
    /// Vertical displacement in pixels.
    pub amplitude: f64,
    /// Multiplier applied to the millisecond clock.
    pub phase_speed: f64,
}

impl Wave {
    /// Draws a wave with its baseline somewhere in `[0, height)`.
    pub fn random(rng: &mut impl RandomSource, height: u32) -> Self {
        Self {
            baseline_y: rng.uniform(0.0..f64::from(height)),
            wavelength: rng.uniform(WAVELENGTH),
            amplitude: rng.uniform(AMPLITUDE),
            phase_speed: rng.uniform(PHASE_SPEED),
        }
    }

    /// Height of the curve at column `x` when the clock reads `now_ms`.
    pub fn y_at(&self, x: f64, now_ms: f64) -> f64 {
        self.baseline_y + self.amplitude * ((x + now_ms * self.phase_speed) / self.wavelength).sin()
    }
}
