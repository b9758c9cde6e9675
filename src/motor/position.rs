//! Position tracking in sub-steps.

use crate::motion::Direction;

/// Signed position counter in sub-step units.
///
/// Advances by exactly one unit per step event, in lock-step with the phase
/// sequencer, so the count and the coil pattern can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    substeps: i32,
}

impl Position {
    /// Create a position at a given sub-step count.
    #[inline]
    pub const fn new(substeps: i32) -> Self {
        Self { substeps }
    }

    /// Current sub-step count.
    #[inline]
    pub const fn substeps(self) -> i32 {
        self.substeps
    }

    /// Advance one sub-step in `direction`.
    #[inline]
    pub fn advance(&mut self, direction: Direction) {
        self.substeps += direction.sign();
    }

    /// Redefine the current location as `substeps` without moving.
    #[inline]
    pub fn set(&mut self, substeps: i32) {
        self.substeps = substeps;
    }

    /// Redefine the current location as zero without moving.
    #[inline]
    pub fn reset(&mut self) {
        self.substeps = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_direction() {
        let mut p = Position::new(0);
        p.advance(Direction::Clockwise);
        p.advance(Direction::Clockwise);
        p.advance(Direction::CounterClockwise);
        assert_eq!(p.substeps(), 1);
    }

    #[test]
    fn test_set_and_reset() {
        let mut p = Position::new(100);
        p.set(-42);
        assert_eq!(p.substeps(), -42);
        p.reset();
        assert_eq!(p.substeps(), 0);
    }
}
