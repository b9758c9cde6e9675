//! Trapezoidal velocity profile planning.
//!
//! All planning is done in the DDA speed domain: speeds are the u16 values
//! added to the rate accumulator each tick, accelerations are speed deltas
//! per tick, distances are sub-steps. The plan is computed once per move in
//! u64 arithmetic and then drives a per-tick speed update that needs only
//! compares and adds.

use serde::Deserialize;

/// Direction of rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Positive displacement.
    #[default]
    Clockwise,
    /// Negative displacement.
    CounterClockwise,
}

impl Direction {
    /// Direction implied by a signed sub-step displacement.
    ///
    /// Zero maps to clockwise; a zero-length move never advances the
    /// sequencer so the choice is unobservable.
    #[inline]
    pub const fn from_substeps(substeps: i32) -> Self {
        if substeps < 0 {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        }
    }

    /// Position increment per step event (+1 or -1).
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Phase of a move, derived from remaining distance and current speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Speed climbing toward the limit.
    Accelerating,
    /// Holding the speed limit.
    Cruising,
    /// Speed falling toward standstill.
    Decelerating,
    /// No sub-steps remain.
    Complete,
}

/// Planned velocity profile for one move.
///
/// `decel_threshold` is the remaining-distance mark at which the profile
/// switches from the rising/cruise leg to the falling leg. For a trapezoid
/// it is the distance needed to brake from the speed limit; for a triangle
/// it is the geometric peak position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampProfile {
    direction: Direction,
    total_substeps: u32,
    decel_threshold: u32,
    accel: u16,
    decel: u16,
    speed_limit: u16,
    trapezoidal: bool,
}

impl RampProfile {
    /// Plan a profile for a signed sub-step displacement.
    ///
    /// `accel` and `decel` are speed deltas per tick, `speed_limit` the peak
    /// DDA speed. A zero displacement yields an already complete profile.
    pub fn plan(displacement: i32, accel: u16, decel: u16, speed_limit: u16) -> Self {
        let direction = Direction::from_substeps(displacement);
        let total = displacement.unsigned_abs();

        if total == 0 || accel == 0 || decel == 0 || speed_limit == 0 {
            return Self {
                direction,
                total_substeps: total,
                decel_threshold: 0,
                accel,
                decel,
                speed_limit,
                trapezoidal: false,
            };
        }

        // Peak speed squared the distance allows, against the limit squared.
        // The 65536 factor converts between the per-tick speed delta domain
        // and the sub-step distance domain of the rate accumulator.
        let a = accel as u64;
        let d = decel as u64;
        let t = total as u64;
        let sq_top = 2 * a * d * t * 65536 / (a + d);
        let sq_limit = (speed_limit as u64) * (speed_limit as u64);

        let (trapezoidal, decel_threshold) = if sq_top > sq_limit {
            // Cruise is reached; brake distance from the limit
            (true, (sq_limit / (2 * 65536 * d)) as u32)
        } else {
            // Triangular; peak sits where the legs meet
            (false, (a * t / (a + d)) as u32)
        };

        Self {
            direction,
            total_substeps: total,
            decel_threshold,
            accel,
            decel,
            speed_limit,
            trapezoidal,
        }
    }

    /// Direction of the move.
    #[inline]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Total distance in sub-steps.
    #[inline]
    pub const fn total_substeps(&self) -> u32 {
        self.total_substeps
    }

    /// Remaining-distance mark where deceleration begins.
    #[inline]
    pub const fn decel_threshold(&self) -> u32 {
        self.decel_threshold
    }

    /// Peak DDA speed the profile will command.
    #[inline]
    pub const fn speed_limit(&self) -> u16 {
        self.speed_limit
    }

    /// True if the profile has a cruise leg.
    #[inline]
    pub const fn is_trapezoidal(&self) -> bool {
        self.trapezoidal
    }

    /// Next commanded speed given remaining distance and current speed.
    ///
    /// Called once per tick. Above the deceleration threshold the speed
    /// ramps up by `accel` until near the limit, then trickles to it one
    /// unit per tick so the limit is hit exactly. At or below the threshold
    /// it ramps down by `decel` with a floor of one, so the final sub-steps
    /// always complete.
    pub fn next_speed(&self, remaining: u32, speed: u16) -> u16 {
        if remaining > self.decel_threshold {
            if speed < self.speed_limit.saturating_sub(self.accel) {
                speed + self.accel
            } else if speed < self.speed_limit {
                speed + 1
            } else {
                speed
            }
        } else if speed > self.decel {
            speed - self.decel
        } else if speed > 1 {
            speed - 1
        } else {
            1
        }
    }

    /// Phase of the move given remaining distance and current speed.
    pub fn phase(&self, remaining: u32, speed: u16) -> MotionPhase {
        if remaining == 0 {
            MotionPhase::Complete
        } else if remaining > self.decel_threshold {
            if speed >= self.speed_limit {
                MotionPhase::Cruising
            } else {
                MotionPhase::Accelerating
            }
        } else {
            MotionPhase::Decelerating
        }
    }

    /// Peak DDA speed the profile actually reaches (diagnostics).
    ///
    /// For a trapezoid this is the speed limit; for a triangle it is the
    /// geometric peak, which the quantized ramp approaches from below.
    pub fn peak_speed(&self) -> u16 {
        if self.trapezoidal {
            return self.speed_limit;
        }
        let a = self.accel as u64;
        let d = self.decel as u64;
        let t = self.total_substeps as u64;
        if a + d == 0 {
            return 0;
        }
        let sq = 2 * a * d * t * 65536 / (a + d);
        let peak = libm::sqrtf(sq as f32) as u32;
        if peak > self.speed_limit as u32 {
            self.speed_limit
        } else {
            peak as u16
        }
    }
}
