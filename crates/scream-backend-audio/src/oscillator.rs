//! Phase accumulator oscillator.

use std::f64::consts::PI;

/// Stateful oscillator whose phase stays in [0, 1).
///
/// The phase wraps instead of growing without bound, so long runs do not
/// lose precision.
#[derive(Debug, Clone)]
pub struct Oscillator {
    phase: f64,
    sample_rate: f64,
}

impl Oscillator {
    /// Creates an oscillator at phase zero.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            sample_rate,
        }
    }

    /// Returns a sine sample at the current phase, then advances by `freq`.
    #[inline]
    pub fn sin(&mut self, freq: f64) -> f64 {
        let sample = (2.0 * PI * self.phase).sin();
        self.advance(freq);
        sample
    }

    /// Returns a sawtooth sample in [-1, 1) at the current phase, then advances by `freq`.
    #[inline]
    pub fn saw(&mut self, freq: f64) -> f64 {
        let sample = 2.0 * self.phase - 1.0;
        self.advance(freq);
        sample
    }

    /// Current phase in [0, 1).
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Resets the phase to zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    #[inline]
    fn advance(&mut self, freq: f64) {
        self.phase += freq / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
    }
}
