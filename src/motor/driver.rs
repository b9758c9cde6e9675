//! Blocking motion driver.
//!
//! Ties the planner, rate generator, phase sequencer and amplitude
//! compensation together into blocking move calls. One driver owns one
//! motor's waveform state and position; moves run to completion on the
//! caller's thread, paced by the tick source.

use crate::config::units::{Amplitude, Degrees, DegreesPerSec, DegreesPerSecSquared, DriveVector};
use crate::config::DriveParameters;
use crate::error::{DriveError, Error, MotionError, Result};
use crate::motion::{BusCompensation, Direction, RampProfile, RateAccumulator};
use crate::motor::hal::{BusVoltageSense, TickSource, WaveOutput};
use crate::motor::position::Position;
use crate::wave::PhaseSequencer;

/// Blocking stepper drive for one motor.
///
/// The phase sequencer state persists across moves, so consecutive moves
/// join without a coil-current discontinuity, and the position counter
/// stays in lock-step with it.
pub struct StepperDriver<W, T, V> {
    wave: W,
    ticks: T,
    bus_sense: V,
    params: DriveParameters,
    sequencer: PhaseSequencer,
    position: Position,
    raw_drive: DriveVector,
    name: heapless::String<32>,
}

impl<W, T, V> StepperDriver<W, T, V>
where
    W: WaveOutput,
    T: TickSource,
    V: BusVoltageSense,
{
    /// Create a driver; used by [`StepperDriverBuilder`](crate::motor::StepperDriverBuilder).
    pub(crate) fn new(
        wave: W,
        ticks: T,
        bus_sense: V,
        params: DriveParameters,
        name: heapless::String<32>,
    ) -> Self {
        Self {
            wave,
            ticks,
            bus_sense,
            sequencer: PhaseSequencer::new(params.stepping_mode()),
            params,
            position: Position::new(0),
            raw_drive: DriveVector::ZERO,
            name,
        }
    }

    /// Re-establish the power-on state: zero position, zero phase, all
    /// channels de-energized.
    pub fn initialize(&mut self) -> Result<()> {
        self.sequencer.reset();
        self.position.reset();
        self.raw_drive = DriveVector::ZERO;
        self.write(DriveVector::ZERO)
    }

    /// Motor name from the configuration.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Drive parameters this motor runs with.
    pub fn params(&self) -> &DriveParameters {
        &self.params
    }

    /// Current position in sub-steps.
    pub fn position_substeps(&self) -> i32 {
        self.position.substeps()
    }

    /// Current position as an angle.
    pub fn position_degrees(&self) -> Degrees {
        self.params.degrees_from_substeps(self.position.substeps())
    }

    /// Redefine the current location as `substeps` without moving.
    pub fn set_position(&mut self, substeps: i32) {
        self.position.set(substeps);
    }

    /// Move a signed sub-step displacement with a trapezoidal ramp,
    /// sampling the bus voltage once at the start.
    ///
    /// `accel` and `decel` are speed deltas per tick, `speed_limit` the
    /// peak speed word (clamped to 32768). Blocks until the move completes
    /// and returns the new position.
    pub fn move_substeps(
        &mut self,
        displacement: i32,
        accel: u16,
        decel: u16,
        speed_limit: u16,
    ) -> Result<i32> {
        let vbus_mv = self.bus_sense.read_bus_voltage_mv();
        self.move_with_bus_voltage(displacement, accel, decel, speed_limit, vbus_mv)
    }

    /// Move a signed angle with a trapezoidal ramp in physical units.
    pub fn move_degrees(
        &mut self,
        angle: Degrees,
        accel: DegreesPerSecSquared,
        decel: DegreesPerSecSquared,
        max_rate: DegreesPerSec,
    ) -> Result<Degrees> {
        let displacement = self.params.substeps_from_degrees(angle);
        let accel = self.params.speed_delta_from_accel(accel);
        let decel = self.params.speed_delta_from_accel(decel);
        let speed_limit = self.params.speed_from_rate(max_rate);
        let position = self.move_substeps(displacement, accel, decel, speed_limit)?;
        Ok(self.params.degrees_from_substeps(position))
    }

    /// Move with a ramp using an externally supplied bus-voltage sample.
    ///
    /// The amplitude law is fixed for the whole move from this one sample.
    /// A zero sample drives every channel at zero duty while still walking
    /// the sequencer, which keeps position bookkeeping consistent when the
    /// supply measurement is absent.
    pub fn move_with_bus_voltage(
        &mut self,
        displacement: i32,
        accel: u16,
        decel: u16,
        speed_limit: u16,
        vbus_mv: u16,
    ) -> Result<i32> {
        if accel == 0 {
            return Err(MotionError::ZeroAcceleration.into());
        }
        if decel == 0 {
            return Err(MotionError::ZeroDeceleration.into());
        }
        if speed_limit == 0 {
            return Err(MotionError::ZeroSpeedLimit.into());
        }
        let speed_limit = self.params.clamp_speed_limit(speed_limit);

        let profile = RampProfile::plan(displacement, accel, decel, speed_limit);
        let comp = BusCompensation::from_bus_voltage(vbus_mv, &self.params);
        let direction = profile.direction();

        let mut rate = RateAccumulator::new();
        let mut remaining = profile.total_substeps();
        let mut speed: u16 = 0;

        self.write(self.raw_drive.scale(comp.amplitude()))?;

        while remaining > 0 {
            speed = profile.next_speed(remaining, speed);
            let amplitude = comp.dynamic_amplitude(speed);
            self.write(self.raw_drive.scale(amplitude))?;

            self.ticks.wait_for_tick();
            if rate.advance(speed) {
                remaining -= 1;
                self.step(direction, amplitude)?;
            }
        }

        self.finish(comp.amplitude())?;
        Ok(self.position.substeps())
    }

    /// Move a signed sub-step displacement at one constant speed.
    ///
    /// No ramp: the full speed applies from the first tick. Suited to
    /// short moves and speeds the motor can start at from standstill.
    pub fn move_constant(&mut self, displacement: i32, speed: u16) -> Result<i32> {
        if speed == 0 {
            return Err(MotionError::ZeroSpeedLimit.into());
        }
        let speed = self.params.clamp_speed_limit(speed);

        let vbus_mv = self.bus_sense.read_bus_voltage_mv();
        let comp = BusCompensation::from_bus_voltage(vbus_mv, &self.params);
        let amplitude = comp.dynamic_amplitude(speed);
        let direction = Direction::from_substeps(displacement);

        let mut rate = RateAccumulator::new();
        let mut remaining = displacement.unsigned_abs();

        self.write(self.raw_drive.scale(amplitude))?;

        while remaining > 0 {
            self.ticks.wait_for_tick();
            if rate.advance(speed) {
                remaining -= 1;
                self.step(direction, amplitude)?;
            }
        }

        self.finish(comp.amplitude())?;
        Ok(self.position.substeps())
    }

    /// Advance one step event: new waveform state, scaled output, position.
    fn step(&mut self, direction: Direction, amplitude: Amplitude) -> Result<()> {
        self.raw_drive = self.sequencer.advance(direction);
        self.write(self.raw_drive.scale(amplitude))?;
        self.position.advance(direction);
        Ok(())
    }

    /// Settle the output after a move.
    ///
    /// Drops back to the static holding amplitude; with idle release the
    /// channels are then de-energized entirely. The sequencer phase is kept
    /// either way so the next move continues the waveform.
    fn finish(&mut self, holding: Amplitude) -> Result<()> {
        self.write(self.raw_drive.scale(holding))?;
        if self.params.release_idle_current() {
            self.raw_drive = DriveVector::ZERO;
            self.write(DriveVector::ZERO)?;
        }
        Ok(())
    }

    fn write(&mut self, drive: DriveVector) -> Result<()> {
        self.wave
            .apply(drive)
            .map_err(|_| Error::Drive(DriveError::OutputFault))
    }

    /// Release the hardware resources.
    pub fn free(self) -> (W, T, V) {
        (self.wave, self.ticks, self.bus_sense)
    }
}
