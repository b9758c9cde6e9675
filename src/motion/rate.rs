//! Phase-accumulator rate generation.

/// 16-bit phase accumulator converting a per-tick speed word into step
/// events.
///
/// Each control tick the current speed is added with wraparound; the carry
/// out of bit 15 marks a step event. A speed of `s` therefore produces one
/// step every `65536 / s` ticks on average, with the fractional remainder
/// carried across ticks rather than discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateAccumulator {
    counter: u16,
}

impl RateAccumulator {
    /// Create an accumulator at zero phase.
    #[inline]
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Clear the accumulated phase (start of a move).
    #[inline]
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Add one tick's speed; returns true when a step event fires.
    #[inline]
    pub fn advance(&mut self, speed: u16) -> bool {
        let before = self.counter;
        self.counter = self.counter.wrapping_add(speed);
        self.counter < before
    }
}
